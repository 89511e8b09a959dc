use crate::{error::AnalysisError, schema::ColumnRange, table::TrialTable};

/// Trial samples laid out as `[parameter point][trial run]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleMatrix {
    rows: Vec<Vec<i64>>,
    trials: usize,
}

impl SampleMatrix {
    /// Extracts the sample columns `range` from every row of `table`.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::EmptySelection`] if the table has no rows
    /// * [`AnalysisError::SchemaMismatch`] if `range` is not a run of integer
    ///   columns of the table's schema
    pub fn from_table(table: &TrialTable, range: ColumnRange) -> Result<Self, AnalysisError> {
        table.schema().check_integer_range(range)?;
        if table.is_empty() {
            return Err(AnalysisError::EmptySelection);
        }

        let rows = table
            .rows()
            .iter()
            .map(|row| {
                row.fields()[range.as_range()]
                    .iter()
                    .map(|field| {
                        field.as_integer().ok_or_else(|| {
                            AnalysisError::schema(format!(
                                "{}: non-integer value in sample range",
                                table.location(row)
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rows,
            trials: range.len(),
        })
    }

    /// Builds a matrix from raw rows.
    ///
    /// # Errors
    ///
    /// * [`AnalysisError::EmptySelection`] if there are no rows
    /// * [`AnalysisError::SchemaMismatch`] if rows differ in length or are empty
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, AnalysisError> {
        let trials = rows.first().ok_or(AnalysisError::EmptySelection)?.len();
        if trials == 0 {
            return Err(AnalysisError::schema("rows have no trial samples"));
        }
        if let Some(index) = rows.iter().position(|row| row.len() != trials) {
            return Err(AnalysisError::schema(format!(
                "row {index} has {} samples, expected {trials}",
                rows[index].len()
            )));
        }
        Ok(Self { rows, trials })
    }

    /// Number of parameter points.
    #[must_use]
    pub fn points(&self) -> usize {
        self.rows.len()
    }

    /// Number of trial runs per point.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i64]> {
        self.rows.iter().map(Vec::as_slice)
    }
}
