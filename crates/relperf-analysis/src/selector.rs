//! Row selection by metadata predicates
//!
//! A [`Selection`] is a conjunction of column equality predicates plus an
//! optional row range applied to the rows that pass the predicates. The
//! range covers result files where configurations are distinguished only by
//! position (e.g. the first 13 rows measure the plain database, the next 13
//! the module).

use serde::{Deserialize, Serialize};

use crate::{
    error::AnalysisError,
    schema::ColumnRange,
    table::{TrialRow, TrialTable},
};

/// `column == equals` on one metadata column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: usize,
    pub equals: String,
}

impl Predicate {
    #[must_use]
    pub fn new(column: usize, equals: impl Into<String>) -> Self {
        Self {
            column,
            equals: equals.into(),
        }
    }

    #[must_use]
    pub fn matches(&self, row: &TrialRow) -> bool {
        row.field(self.column)
            .is_some_and(|field| field.matches(&self.equals))
    }
}

/// Rows to keep from a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// All predicates must hold
    #[serde(default)]
    pub predicates: Vec<Predicate>,
    /// Range over the rows that passed the predicates
    #[serde(default)]
    pub rows: Option<ColumnRange>,
}

impl Selection {
    /// Selects every row.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a `column == equals` predicate.
    #[must_use]
    pub fn with(mut self, column: usize, equals: impl Into<String>) -> Self {
        self.predicates.push(Predicate::new(column, equals));
        self
    }

    /// Restricts the selection to rows `start..end` of the filtered rows.
    #[must_use]
    pub fn row_range(mut self, start: usize, end: usize) -> Self {
        self.rows = Some(ColumnRange::new(start, end));
        self
    }

    #[must_use]
    pub fn matches(&self, row: &TrialRow) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }
}

impl TrialTable {
    /// Returns the sub-table of rows matching `selection`.
    ///
    /// The result has the same schema and keeps the relative row order. A
    /// selection matching nothing yields an empty table, not an error;
    /// callers must check [`TrialTable::is_empty`] before aggregating.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::SchemaMismatch`] if a predicate names a column that
    ///   is not a readable metadata column
    /// * [`AnalysisError::RowRangeOutOfBounds`] if the row range reaches past
    ///   the rows left after filtering
    pub fn select(&self, selection: &Selection) -> Result<TrialTable, AnalysisError> {
        for predicate in &selection.predicates {
            self.schema().check_predicate_column(predicate.column)?;
        }

        let mut rows = self
            .rows()
            .iter()
            .filter(|row| selection.matches(row))
            .cloned()
            .collect::<Vec<_>>();

        if let Some(range) = selection.rows {
            if range.start > range.end || range.end > rows.len() {
                return Err(AnalysisError::RowRangeOutOfBounds {
                    start: range.start,
                    end: range.end,
                    rows: rows.len(),
                });
            }
            rows = rows.drain(range.as_range()).collect();
        }

        Ok(self.with_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::{ColumnType, TrialSchema},
        table::Field,
    };

    fn table() -> TrialTable {
        let schema = TrialSchema::new(
            vec![ColumnType::Text, ColumnType::Text, ColumnType::Integer],
            2,
        );
        let row = |storage: &str, algo: &str, degree: i64, sample: i64| {
            vec![
                Field::Text(storage.to_owned()),
                Field::Text(algo.to_owned()),
                Field::Integer(degree),
                Field::Integer(sample),
                Field::Integer(sample + 1),
            ]
        };
        TrialTable::from_rows(
            schema,
            vec![
                row("SINGLE_PROP", "NO_FRAMEWORK", 10, 100),
                row("SINGLE_PROP", "CACHED", 10, 20),
                row("MULTI_PROP", "CACHED", 10, 30),
                row("SINGLE_PROP", "NO_FRAMEWORK", 100, 1000),
                row("SINGLE_PROP", "CACHED", 100, 25),
            ],
        )
        .unwrap()
    }

    fn degrees(table: &TrialTable) -> Vec<i64> {
        table
            .rows()
            .iter()
            .filter_map(|r| r.fields()[2].as_integer())
            .collect()
    }

    #[test]
    fn test_conjunction_of_predicates() {
        let table = table();
        let selection = Selection::all().with(0, "SINGLE_PROP").with(1, "CACHED");
        let selected = table.select(&selection).unwrap();

        assert_eq!(selected.len(), 2);
        assert_eq!(degrees(&selected), vec![10, 100]);
        assert!(selected.rows().iter().all(|r| selection.matches(r)));
        let expected = table
            .rows()
            .iter()
            .filter(|r| selection.matches(r))
            .count();
        assert_eq!(selected.len(), expected);
    }

    #[test]
    fn test_integer_predicate() {
        let selected = table().select(&Selection::all().with(2, "100")).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let selected = table()
            .select(&Selection::all().with(1, "NAIVE"))
            .unwrap();
        assert!(selected.is_empty());
        assert_eq!(selected.schema().column_count(), 5);
    }

    #[test]
    fn test_empty_selection_keeps_everything() {
        let table = table();
        assert_eq!(table.select(&Selection::all()).unwrap(), table);
    }

    #[test]
    fn test_row_range_after_predicates() {
        let selected = table()
            .select(&Selection::all().with(0, "SINGLE_PROP").row_range(1, 3))
            .unwrap();
        assert_eq!(degrees(&selected), vec![10, 100]);
        assert!(selected.rows()[0].fields()[1].matches("CACHED"));
    }

    #[test]
    fn test_row_range_out_of_bounds() {
        let err = table()
            .select(&Selection::all().with(1, "CACHED").row_range(0, 4))
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::RowRangeOutOfBounds {
                start: 0,
                end: 4,
                rows: 3
            }
        );
    }

    #[test]
    fn test_predicate_on_sample_column_is_schema_mismatch() {
        let err = table().select(&Selection::all().with(3, "100")).unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }
}
