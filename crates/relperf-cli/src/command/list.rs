use crate::catalog;

pub(crate) fn run() {
    let width = catalog::ENTRIES
        .iter()
        .map(|entry| entry.name.len())
        .max()
        .unwrap_or(0);

    println!("  {:<width$}  Title", "Name");
    println!("  {}", "-".repeat(width + 40));
    for entry in catalog::ENTRIES {
        println!("  {:<width$}  {}", entry.name, entry.spec().title);
    }
}
