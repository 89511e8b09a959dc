//! Trial-axis aggregation
//!
//! Reduces every row of a (selected) trial table to a [`SummaryStat`] over
//! its sample columns. Rows are never merged, even when two rows share a
//! parameter value: each row is one measurement point.

use relperf_stats::descriptive::SummaryStat;
use tracing::{debug, warn};

use crate::{
    axis::{self, ParameterAxis},
    error::AnalysisError,
    samples::SampleMatrix,
    schema::ColumnRange,
    table::TrialTable,
};

/// Parallel sequences of parameter values and per-row statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub parameters: Vec<f64>,
    pub stats: Vec<SummaryStat>,
}

impl AggregatedSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, SummaryStat)> {
        self.parameters
            .iter()
            .copied()
            .zip(self.stats.iter().copied())
    }
}

/// Computes (parameter, mean, stddev) for every row of `table`.
///
/// # Errors
///
/// * [`AnalysisError::EmptySelection`] if `table` has no rows
/// * [`AnalysisError::SchemaMismatch`] if `samples` is not a run of integer
///   columns, or the parameter axis does not fit the table
pub fn aggregate(
    table: &TrialTable,
    samples: ColumnRange,
    axis: &ParameterAxis,
) -> Result<AggregatedSeries, AnalysisError> {
    let matrix = SampleMatrix::from_table(table, samples)?;
    let parameters = axis.resolve(table)?;
    if !axis::is_monotonic(&parameters) {
        warn!(?parameters, "parameter axis is not monotonic");
    }

    let stats = matrix
        .rows()
        .map(|row| SummaryStat::from_samples(row).ok_or(AnalysisError::EmptySelection))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        points = stats.len(),
        trials = matrix.trials(),
        "aggregated trial samples"
    );
    Ok(AggregatedSeries { parameters, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        schema::{ColumnType, TrialSchema},
        selector::Selection,
        table::Field,
    };

    fn scenario() -> TrialTable {
        let row = |label: &str, values: [i64; 3]| {
            let mut fields = vec![Field::Text(label.to_owned())];
            fields.extend(values.map(Field::Integer));
            fields
        };
        TrialTable::from_rows(
            TrialSchema::new(vec![ColumnType::Text], 3),
            vec![row("A", [10, 20, 30]), row("B", [10, 90, 110])],
        )
        .unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-2,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_scenario_population_statistics() {
        let table = scenario();
        let series = aggregate(
            &table,
            table.schema().sample_columns(),
            &ParameterAxis::values([1.0, 2.0]),
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_close(series.stats[0].mean, 20.0);
        assert_close(series.stats[0].std_dev, 8.16);
        assert_close(series.stats[1].mean, 70.0);
        assert_close(series.stats[1].std_dev, 43.20);
    }

    #[test]
    fn test_one_pair_per_row_with_non_negative_std_dev() {
        let schema = TrialSchema::numeric(1, 4);
        let rows = (0..7)
            .map(|i| {
                let mut fields = vec![Field::Integer(10 * i)];
                fields.extend((0..4).map(|t| Field::Integer((i * 37 + t * 11) % 23)));
                fields
            })
            .collect();
        let table = TrialTable::from_rows(schema, rows).unwrap();

        let series = aggregate(
            &table,
            table.schema().sample_columns(),
            &ParameterAxis::column(0),
        )
        .unwrap();
        assert_eq!(series.len(), table.len());
        assert!(series.stats.iter().all(|s| s.std_dev >= 0.0));
    }

    #[test]
    fn test_repeated_parameters_are_not_merged() {
        let schema = TrialSchema::numeric(1, 1);
        let table = TrialTable::from_rows(
            schema,
            vec![
                vec![Field::Integer(10), Field::Integer(1)],
                vec![Field::Integer(10), Field::Integer(3)],
            ],
        )
        .unwrap();
        let series = aggregate(
            &table,
            table.schema().sample_columns(),
            &ParameterAxis::column(0),
        )
        .unwrap();
        assert_eq!(series.parameters, vec![10.0, 10.0]);
        assert_eq!(series.stats[0].mean, 1.0);
        assert_eq!(series.stats[1].mean, 3.0);
        assert_eq!(series.stats[1].std_dev, 0.0);
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let table = scenario();
        let empty = table.select(&Selection::all().with(0, "C")).unwrap();
        let err = aggregate(
            &empty,
            table.schema().sample_columns(),
            &ParameterAxis::values(Vec::new()),
        )
        .unwrap_err();
        assert_eq!(err, AnalysisError::EmptySelection);
    }

    #[test]
    fn test_sample_range_outside_schema() {
        let table = scenario();
        let err = aggregate(
            &table,
            ColumnRange::new(1, 6),
            &ParameterAxis::values([1.0, 2.0]),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_repeatable() {
        let table = scenario();
        let run = || {
            aggregate(
                &table.select(&Selection::all().with(0, "B")).unwrap(),
                table.schema().sample_columns(),
                &ParameterAxis::values([5.0]),
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }
}
