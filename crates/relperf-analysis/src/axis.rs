//! Independent-variable axis of a report
//!
//! Parameter values come either from a numeric column of the result file
//! (relationships per transaction, vertex degree) or from a fixed list when
//! the file does not record them. An optional scale factor converts stored
//! values into displayed ones.

use serde::{Deserialize, Serialize};

use crate::{error::AnalysisError, schema::ColumnType, table::TrialTable};

/// Where parameter values come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSource {
    /// Integer column of the table, one value per row
    Column(usize),
    /// Fixed values, one per selected row
    Values(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterAxis {
    pub source: ParameterSource,
    /// Multiplier applied to every value
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl ParameterAxis {
    #[must_use]
    pub fn column(index: usize) -> Self {
        Self {
            source: ParameterSource::Column(index),
            scale: unit_scale(),
        }
    }

    #[must_use]
    pub fn values(values: impl Into<Vec<f64>>) -> Self {
        Self {
            source: ParameterSource::Values(values.into()),
            scale: unit_scale(),
        }
    }

    #[must_use]
    pub fn scaled(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Parameter value of every row of `table`, in row order.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::SchemaMismatch`] if the column is not an integer
    /// column, or if a fixed axis has a different length than the table.
    #[expect(clippy::cast_precision_loss)]
    pub fn resolve(&self, table: &TrialTable) -> Result<Vec<f64>, AnalysisError> {
        let values = match &self.source {
            ParameterSource::Column(index) => {
                if table.schema().column_type(*index) != Some(ColumnType::Integer) {
                    return Err(AnalysisError::schema(format!(
                        "parameter column {index} is not an integer column"
                    )));
                }
                table
                    .rows()
                    .iter()
                    .map(|row| {
                        row.field(*index)
                            .and_then(crate::table::Field::as_integer)
                            .map(|v| v as f64)
                            .ok_or_else(|| {
                                AnalysisError::schema(format!(
                                    "{}: missing parameter value",
                                    table.location(row)
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
            ParameterSource::Values(values) => {
                if values.len() != table.len() {
                    return Err(AnalysisError::schema(format!(
                        "fixed parameter axis has {} values but {} rows are selected",
                        values.len(),
                        table.len()
                    )));
                }
                values.clone()
            }
        };
        Ok(values.into_iter().map(|v| v * self.scale).collect())
    }
}

/// Whether `values` is non-decreasing or non-increasing.
#[must_use]
pub fn is_monotonic(values: &[f64]) -> bool {
    values.is_sorted_by(|a, b| a <= b) || values.is_sorted_by(|a, b| a >= b)
}
