//! Result file loader
//!
//! Reads `;`-delimited result files with the `csv` crate. Header lines are
//! consumed before the csv reader is attached, so their content does not
//! need to follow the delimiter convention. Each file is opened read-only and
//! closed before [`load_table`] moves on to the next one. Rows are read as
//! bytes, so a field that is not valid UTF-8 is reported like any other
//! malformed field.

use std::{
    fs::File,
    io::{BufRead as _, BufReader},
    path::Path,
    str,
};

use tracing::debug;

use crate::{error::LoadError, schema::TrialSchema, table::TrialTable};

/// Loads one or more result files into a single table.
///
/// Rows keep their file order; files are concatenated in the order given.
///
/// # Errors
///
/// Returns [`LoadError::MalformedInput`] naming the file and line of the
/// first row that violates `schema`, or an I/O error if a file cannot be read.
pub fn load_table<P>(paths: &[P], schema: &TrialSchema) -> Result<TrialTable, LoadError>
where
    P: AsRef<Path>,
{
    let mut table = TrialTable::new(schema.clone());
    for path in paths {
        load_file_into(&mut table, path.as_ref())?;
    }
    Ok(table)
}

fn load_file_into(table: &mut TrialTable, path: &Path) -> Result<(), LoadError> {
    let schema = table.schema().clone();
    let delimiter = schema
        .delimiter_byte()
        .ok_or(LoadError::InvalidDelimiter {
            delimiter: schema.delimiter,
        })?;
    let display_path = || path.display().to_string();

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display_path(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut header = Vec::new();
    let mut skipped = 0;
    while skipped < schema.skip_lines {
        header.clear();
        let read = reader
            .read_until(b'\n', &mut header)
            .map_err(|source| LoadError::Io {
                path: display_path(),
                source,
            })?;
        if read == 0 {
            break;
        }
        skipped += 1;
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let file_index = table.push_file(path);
    let before = table.len();
    for record in csv_reader.byte_records() {
        let record = record.map_err(|source| LoadError::Csv {
            path: display_path(),
            source,
        })?;
        let line = record.position().map_or(0, csv::Position::line) + skipped as u64;
        let malformed = |reason: String| LoadError::MalformedInput {
            path: display_path(),
            line,
            reason,
        };
        let raw = record
            .iter()
            .enumerate()
            .map(|(index, bytes)| {
                str::from_utf8(bytes).map_err(|_| format!("column {index} is not valid UTF-8"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(malformed)?;
        let fields = schema.parse_fields(raw).map_err(malformed)?;
        table.push_row(file_index, line, fields);
    }

    debug!(
        path = %path.display(),
        rows = table.len() - before,
        "loaded result file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use tempfile::TempDir;

    use super::*;
    use crate::{schema::ColumnType, table::Field};

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn count_schema() -> TrialSchema {
        TrialSchema::new(
            vec![ColumnType::Text, ColumnType::Text, ColumnType::Integer],
            3,
        )
        .with_skip_lines(2)
    }

    #[test]
    fn test_load_with_header() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "count.txt",
            "Count degree of 10 random nodes\nserialization;cache;degree\n\
             SINGLE_PROP;nocache;10;100;110;120\n\
             SINGLE_PROP;highcache;10;10;11;12\n",
        );

        let table = load_table(&[&path], &count_schema()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.rows()[0].fields()[1],
            Field::Text("nocache".to_owned())
        );
        assert_eq!(table.rows()[1].fields()[5], Field::Integer(12));
        assert_eq!(table.rows()[0].line(), 3);
    }

    #[test]
    fn test_load_concatenates_files_in_order() {
        let dir = TempDir::new().unwrap();
        let schema = TrialSchema::numeric(2, 2);
        let first = write(&dir, "a.txt", "1;1;5;6\n1;10;7;8\n");
        let second = write(&dir, "b.txt", "2;1;9;9\n");

        let table = load_table(&[first, second], &schema).unwrap();
        let params = table
            .rows()
            .iter()
            .map(|r| (r.fields()[0].as_integer(), r.fields()[1].as_integer()))
            .collect::<Vec<_>>();
        assert_eq!(
            params,
            vec![(Some(1), Some(1)), (Some(1), Some(10)), (Some(2), Some(1))]
        );
        assert_eq!(table.files().len(), 2);
    }

    #[test]
    fn test_malformed_row_names_file_and_line() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.txt", "1;1;5;6\n1;10;7\n");

        let err = load_table(&[&path], &TrialSchema::numeric(2, 2)).unwrap_err();
        match err {
            LoadError::MalformedInput { path: p, line, .. } => {
                assert!(p.ends_with("bad.txt"), "{p}");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_integer_sample_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.txt", "1;1;5;abc\n");

        let err = load_table(&[&path], &TrialSchema::numeric(2, 2)).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_invalid_utf8_row_is_malformed_at_file_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.txt");
        fs::write(&path, b"h1\nh2\nh3\nA;1;2\nB\xff;3;4\n").unwrap();
        let schema = TrialSchema::new(vec![ColumnType::Text], 2).with_skip_lines(3);

        let err = load_table(&[&path], &schema).unwrap_err();
        match err {
            LoadError::MalformedInput { path: p, line, reason } => {
                assert!(p.ends_with("latin1.txt"), "{p}");
                assert_eq!(line, 5);
                assert!(reason.contains("column 0"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_lines_need_not_be_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.txt");
        fs::write(&path, b"caf\xe9 run\n1;2;3\n").unwrap();
        let schema = TrialSchema::numeric(1, 2).with_skip_lines(1);

        let table = load_table(&[&path], &schema).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].line(), 2);
    }

    #[test]
    fn test_trailing_delimiter_and_whitespace() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "t.txt", " 1 ; 100 ; 5;6;\n2;1000;7;8;\n");
        let schema = TrialSchema::numeric(2, 2).with_trailing_delimiter();

        let table = load_table(&[&path], &schema).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].fields()[1], Field::Integer(100));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_table(&[dir.path().join("missing.txt")], &TrialSchema::numeric(0, 1))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_loading_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "r.txt", "1;3;4;5\n10;30;40;50\n");
        let schema = TrialSchema::numeric(1, 3);

        let first = load_table(&[&path], &schema).unwrap();
        let second = load_table(&[&path], &schema).unwrap();
        assert_eq!(first, second);
    }
}
