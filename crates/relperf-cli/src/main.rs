mod catalog;
mod command;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
