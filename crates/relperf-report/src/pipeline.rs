use std::{collections::HashMap, path::Path};

use relperf_analysis::{
    aggregate, axis, loader, ratio,
    samples::SampleMatrix,
    schema::ColumnRange,
    table::TrialTable,
};
use relperf_render::{
    chart::Chart,
    series::{Series, StatCell},
    style::{Color, SeriesStyle},
    table::Table,
    RenderError,
};
use tracing::{debug, info, warn};

use crate::{
    error::{ReportError, SpecError},
    spec::{ChartSpec, EmptySelectionPolicy, ReportSpec, StatKind, TableSpec},
};

/// Everything a report produced, ready to save or print.
#[derive(Debug, Clone)]
pub struct ReportOutput {
    pub chart: Option<Chart>,
    pub tables: Vec<Table>,
}

/// Selected rows of every configuration that matched at least one row.
struct Configurations<'a> {
    spec: &'a ReportSpec,
    selected: HashMap<&'a str, TrialTable>,
}

/// Runs a report end to end: load, select, aggregate or compare, render.
///
/// Input file paths are resolved against `data_dir`. Nothing is written; the
/// caller decides where the chart and tables go.
///
/// # Errors
///
/// Any stage failure aborts the whole report. See [`ReportError`].
pub fn generate_report(spec: &ReportSpec, data_dir: &Path) -> Result<ReportOutput, ReportError> {
    spec.validate().map_err(ReportError::Spec)?;
    info!(report = %spec.name, "generating report");

    let mut inputs = HashMap::new();
    for input in &spec.inputs {
        let paths = input
            .files
            .iter()
            .map(|file| data_dir.join(file))
            .collect::<Vec<_>>();
        let table = loader::load_table(&paths, &spec.schema).map_err(|source| {
            ReportError::Load {
                input: input.id.clone(),
                source,
            }
        })?;
        debug!(input = %input.id, rows = table.len(), "loaded input");
        inputs.insert(input.id.as_str(), table);
    }

    let mut selected = HashMap::new();
    for config in &spec.configurations {
        let table = inputs
            .get(config.input.as_str())
            .ok_or_else(|| unknown(spec, format!("unknown input '{}'", config.input)))?;
        let rows = table
            .select(&config.selection)
            .map_err(|source| ReportError::Analysis {
                configuration: config.name.clone(),
                source,
            })?;
        if rows.is_empty() {
            match spec.on_empty {
                EmptySelectionPolicy::Fail => {
                    return Err(ReportError::EmptySelection {
                        configuration: config.name.clone(),
                    });
                }
                EmptySelectionPolicy::Skip => {
                    warn!(configuration = %config.name, "selection matched no rows, skipping");
                    continue;
                }
            }
        }
        debug!(configuration = %config.name, rows = rows.len(), "selected rows");
        selected.insert(config.name.as_str(), rows);
    }

    let configurations = Configurations { spec, selected };
    let chart = spec
        .chart
        .as_ref()
        .map(|chart| configurations.build_chart(chart))
        .transpose()?;
    let tables = spec
        .tables
        .iter()
        .map(|table| configurations.build_table(table))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        report = %spec.name,
        chart = chart.is_some(),
        tables = tables.len(),
        "report generated"
    );
    Ok(ReportOutput { chart, tables })
}

impl Configurations<'_> {
    fn build_chart(&self, spec: &ChartSpec) -> Result<Chart, ReportError> {
        let title = spec.title.as_deref().unwrap_or(&self.spec.title);
        let samples = spec.samples.unwrap_or_else(|| self.spec.default_samples());
        let mut chart =
            Chart::new(title, spec.x.clone(), spec.y.clone()).with_legend(spec.legend);
        for series in &spec.series {
            let Some(points) = self.points(&series.configuration, &series.value, samples)? else {
                continue;
            };
            let label = series.label.as_deref().unwrap_or(&series.configuration);
            chart
                .push_series(Series::new(label, series.style, points))
                .map_err(ReportError::Render)?;
        }
        if chart.series().is_empty() {
            return Err(ReportError::Render(RenderError::EmptySeries {
                label: title.to_owned(),
            }));
        }
        Ok(chart)
    }

    fn build_table(&self, spec: &TableSpec) -> Result<Table, ReportError> {
        let title = spec.title.as_deref().unwrap_or(&self.spec.title);
        let samples = spec.samples.unwrap_or_else(|| self.spec.default_samples());
        let mut table =
            Table::new(spec.parameter_header.as_str(), spec.layout, spec.format).with_title(title);
        for column in &spec.columns {
            let Some(points) = self.points(&column.configuration, &column.value, samples)? else {
                continue;
            };
            let header = column.header.as_deref().unwrap_or(&column.configuration);
            table
                .push_series(Series::new(header, SeriesStyle::solid(Color::Black), points))
                .map_err(ReportError::Render)?;
        }
        if table.series().is_empty() {
            return Err(ReportError::Render(RenderError::EmptySeries {
                label: title.to_owned(),
            }));
        }
        Ok(table)
    }

    /// Per-point statistics of one configuration, or `None` if it (or its
    /// baseline) was skipped for matching no rows.
    fn points(
        &self,
        configuration: &str,
        value: &StatKind,
        samples: ColumnRange,
    ) -> Result<Option<Vec<(f64, StatCell)>>, ReportError> {
        let Some(candidate) = self.selected.get(configuration) else {
            return Ok(None);
        };
        let analysis_error = |source| ReportError::Analysis {
            configuration: configuration.to_owned(),
            source,
        };

        match value {
            StatKind::Absolute => {
                let series = aggregate::aggregate(candidate, samples, &self.spec.parameter)
                    .map_err(analysis_error)?;
                Ok(Some(
                    series
                        .iter()
                        .map(|(x, stat)| (x, StatCell::from(stat)))
                        .collect(),
                ))
            }
            StatKind::Ratio { baseline } => {
                let Some(base) = self.selected.get(baseline.as_str()) else {
                    warn!(
                        configuration,
                        baseline = %baseline,
                        "baseline was skipped, dropping ratio series"
                    );
                    return Ok(None);
                };
                let base = SampleMatrix::from_table(base, samples).map_err(analysis_error)?;
                let cand = SampleMatrix::from_table(candidate, samples).map_err(analysis_error)?;
                let stats = ratio::ratio(&base, &cand).map_err(analysis_error)?;
                let parameters = self
                    .spec
                    .parameter
                    .resolve(candidate)
                    .map_err(analysis_error)?;
                if !axis::is_monotonic(&parameters) {
                    warn!(configuration, ?parameters, "parameter axis is not monotonic");
                }
                debug!(configuration, baseline = %baseline, points = stats.len(), "computed ratios");
                Ok(Some(
                    parameters
                        .into_iter()
                        .zip(stats)
                        .map(|(x, stat)| (x, StatCell::from(stat)))
                        .collect(),
                ))
            }
        }
    }
}

fn unknown(spec: &ReportSpec, problem: String) -> ReportError {
    ReportError::Spec(SpecError::SchemaMismatch {
        report: spec.name.clone(),
        problems: vec![problem],
    })
}
