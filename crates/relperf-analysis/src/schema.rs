//! Declared layout of a result file
//!
//! The harness writes one line per (configuration, parameter point): a few
//! metadata columns followed by one column per trial run. A [`TrialSchema`]
//! states that layout explicitly so that every row can be checked on load.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, table::Field};

/// Type of a single metadata column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Categorical value compared by exact string equality
    Text,
    /// Signed integer (parameter values, counts)
    Integer,
    /// Present in the file but never read
    Ignored,
}

/// Layout of one result file: header lines, metadata columns, sample columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialSchema {
    /// Number of leading lines to skip before the first data row
    #[serde(default)]
    pub skip_lines: usize,
    /// Field separator
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Types of the leading metadata columns, in file order
    pub metadata: Vec<ColumnType>,
    /// Number of trailing integer sample columns
    pub samples: usize,
    /// Accept one extra empty field left by a delimiter at the end of each line
    #[serde(default)]
    pub trailing_delimiter: bool,
}

fn default_delimiter() -> char {
    ';'
}

/// Half-open range of column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: usize,
    pub end: usize,
}

impl ColumnRange {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for ColumnRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl TrialSchema {
    /// Creates a schema with `;` delimiter, no header and no trailing delimiter.
    #[must_use]
    pub fn new(metadata: Vec<ColumnType>, samples: usize) -> Self {
        Self {
            skip_lines: 0,
            delimiter: default_delimiter(),
            metadata,
            samples,
            trailing_delimiter: false,
        }
    }

    /// Creates a schema whose metadata columns are all integers.
    #[must_use]
    pub fn numeric(metadata: usize, samples: usize) -> Self {
        Self::new(vec![ColumnType::Integer; metadata], samples)
    }

    #[must_use]
    pub fn with_skip_lines(mut self, skip_lines: usize) -> Self {
        self.skip_lines = skip_lines;
        self
    }

    #[must_use]
    pub fn with_trailing_delimiter(mut self) -> Self {
        self.trailing_delimiter = true;
        self
    }

    /// Total number of columns in a row.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.metadata.len() + self.samples
    }

    #[must_use]
    pub fn metadata_count(&self) -> usize {
        self.metadata.len()
    }

    /// The trailing sample columns.
    #[must_use]
    pub fn sample_columns(&self) -> ColumnRange {
        ColumnRange::new(self.metadata.len(), self.column_count())
    }

    /// Type of the column at `index`, or `None` past the last column.
    #[must_use]
    pub fn column_type(&self, index: usize) -> Option<ColumnType> {
        if let Some(ty) = self.metadata.get(index) {
            Some(*ty)
        } else if index < self.column_count() {
            Some(ColumnType::Integer)
        } else {
            None
        }
    }

    /// Checks that `range` is a non-empty run of integer columns.
    pub fn check_integer_range(&self, range: ColumnRange) -> Result<(), AnalysisError> {
        if range.is_empty() {
            return Err(AnalysisError::schema(format!(
                "sample range {}..{} is empty",
                range.start, range.end
            )));
        }
        if range.end > self.column_count() {
            return Err(AnalysisError::schema(format!(
                "sample range {}..{} exceeds the {} declared columns",
                range.start,
                range.end,
                self.column_count()
            )));
        }
        if let Some(index) = range
            .as_range()
            .find(|&i| self.column_type(i) != Some(ColumnType::Integer))
        {
            return Err(AnalysisError::schema(format!(
                "sample range {}..{} includes non-integer column {index}",
                range.start, range.end
            )));
        }
        Ok(())
    }

    /// Checks that a predicate may compare against column `index`.
    pub fn check_predicate_column(&self, index: usize) -> Result<(), AnalysisError> {
        match self.metadata.get(index) {
            Some(ColumnType::Text | ColumnType::Integer) => Ok(()),
            Some(ColumnType::Ignored) => Err(AnalysisError::schema(format!(
                "predicate column {index} is declared as ignored"
            ))),
            None => Err(AnalysisError::schema(format!(
                "predicate column {index} is not one of the {} metadata columns",
                self.metadata.len()
            ))),
        }
    }

    pub(crate) fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter
            .is_ascii()
            .then(|| u8::try_from(self.delimiter).ok())
            .flatten()
    }

    /// Parses the raw fields of one line.
    ///
    /// On failure, returns a description of the violation (without location).
    pub(crate) fn parse_fields<'a, I>(&self, raw: I) -> Result<Vec<Field>, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut values = raw.into_iter().collect::<Vec<_>>();
        if self.trailing_delimiter
            && values.len() == self.column_count() + 1
            && values.last().is_some_and(|v| v.is_empty())
        {
            values.pop();
        }
        if values.len() != self.column_count() {
            return Err(format!(
                "expected {} columns, found {}",
                self.column_count(),
                values.len()
            ));
        }

        values
            .iter()
            .enumerate()
            .map(|(index, value)| self.parse_field(index, value))
            .collect()
    }

    fn parse_field(&self, index: usize, value: &str) -> Result<Field, String> {
        match self.column_type(index) {
            Some(ColumnType::Text) => Ok(Field::Text(value.to_owned())),
            Some(ColumnType::Ignored) => Ok(Field::Ignored),
            Some(ColumnType::Integer) => value
                .parse::<i64>()
                .map(Field::Integer)
                .map_err(|_| format!("column {index}: expected an integer, found {value:?}")),
            None => Err(format!("column {index} is not declared")),
        }
    }
}
