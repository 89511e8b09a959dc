//! In-memory trial tables
//!
//! A [`TrialTable`] is the immutable result of loading one or more result
//! files: every row has been validated against the table's
//! [`TrialSchema`], and each row remembers where it came from so later
//! stages can point at the offending line.

use std::path::{Path, PathBuf};

use crate::{
    error::AnalysisError,
    schema::{ColumnType, TrialSchema},
};

/// A single parsed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Text(String),
    Integer(i64),
    /// Placeholder for a column declared as [`ColumnType::Ignored`]
    Ignored,
}

impl Field {
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Field::Integer(value) => Some(*value),
            Field::Text(_) | Field::Ignored => None,
        }
    }

    /// Equality against the textual form used in predicates.
    ///
    /// Integers compare numerically, so `"010"` matches `10`.
    #[must_use]
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            Field::Text(value) => value == expected,
            Field::Integer(value) => expected.trim().parse::<i64>() == Ok(*value),
            Field::Ignored => false,
        }
    }
}

/// One row of a trial table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRow {
    file: usize,
    line: u64,
    fields: Vec<Field>,
}

impl TrialRow {
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Line number in the source file (1-based, header lines included).
    #[must_use]
    pub fn line(&self) -> u64 {
        self.line
    }
}

/// Rectangular table of metadata and trial samples, in file row order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialTable {
    schema: TrialSchema,
    files: Vec<PathBuf>,
    rows: Vec<TrialRow>,
}

impl TrialTable {
    /// Creates an empty table for `schema`.
    #[must_use]
    pub fn new(schema: TrialSchema) -> Self {
        Self {
            schema,
            files: vec![],
            rows: vec![],
        }
    }

    /// Builds a table from already parsed rows, checking them against `schema`.
    ///
    /// Rows are attributed to a synthetic `<memory>` source with line numbers
    /// starting at 1.
    pub fn from_rows(schema: TrialSchema, rows: Vec<Vec<Field>>) -> Result<Self, AnalysisError> {
        let mut table = Self::new(schema);
        let file = table.push_file(Path::new("<memory>"));
        for (index, fields) in rows.into_iter().enumerate() {
            table.check_fields(&fields).map_err(|reason| {
                AnalysisError::schema(format!("row {}: {reason}", index + 1))
            })?;
            table.push_row(file, index as u64 + 1, fields);
        }
        Ok(table)
    }

    fn check_fields(&self, fields: &[Field]) -> Result<(), String> {
        if fields.len() != self.schema.column_count() {
            return Err(format!(
                "expected {} columns, found {}",
                self.schema.column_count(),
                fields.len()
            ));
        }
        for (index, field) in fields.iter().enumerate() {
            let ok = matches!(
                (self.schema.column_type(index), field),
                (Some(ColumnType::Text), Field::Text(_))
                    | (Some(ColumnType::Integer), Field::Integer(_))
                    | (Some(ColumnType::Ignored), Field::Ignored)
            );
            if !ok {
                return Err(format!("column {index} does not match the declared type"));
            }
        }
        Ok(())
    }

    pub(crate) fn push_file(&mut self, path: &Path) -> usize {
        self.files.push(path.to_owned());
        self.files.len() - 1
    }

    pub(crate) fn push_row(&mut self, file: usize, line: u64, fields: Vec<Field>) {
        debug_assert_eq!(fields.len(), self.schema.column_count());
        self.rows.push(TrialRow { file, line, fields });
    }

    /// A table with the same schema and sources holding only `rows`.
    pub(crate) fn with_rows(&self, rows: Vec<TrialRow>) -> Self {
        Self {
            schema: self.schema.clone(),
            files: self.files.clone(),
            rows,
        }
    }

    #[must_use]
    pub fn schema(&self) -> &TrialSchema {
        &self.schema
    }

    #[must_use]
    pub fn rows(&self) -> &[TrialRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Source files in load order.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Human-readable `file:line` location of a row of this table.
    #[must_use]
    pub fn location(&self, row: &TrialRow) -> String {
        let file = self
            .files
            .get(row.file)
            .map_or_else(|| "<unknown>".to_owned(), |p| p.display().to_string());
        format!("{file}:{}", row.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Field {
        Field::Text(s.to_owned())
    }

    #[test]
    fn test_from_rows() {
        let schema = TrialSchema::new(vec![ColumnType::Text], 3);
        let table = TrialTable::from_rows(
            schema,
            vec![
                vec![text("A"), Field::Integer(10), Field::Integer(20), Field::Integer(30)],
                vec![text("B"), Field::Integer(10), Field::Integer(90), Field::Integer(110)],
            ],
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].field(0), Some(&text("B")));
        assert_eq!(table.location(&table.rows()[1]), "<memory>:2");
    }

    #[test]
    fn test_from_rows_rejects_type_mismatch() {
        let schema = TrialSchema::new(vec![ColumnType::Integer], 1);
        let err = TrialTable::from_rows(schema, vec![vec![text("A"), Field::Integer(1)]])
            .unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_field_matches() {
        assert!(text("CACHED").matches("CACHED"));
        assert!(!text("CACHED").matches("cached"));
        assert!(Field::Integer(10).matches("10"));
        assert!(Field::Integer(10).matches("010"));
        assert!(!Field::Integer(10).matches("ten"));
        assert!(!Field::Ignored.matches(""));
    }
}
