//! Declarative report description
//!
//! A [`ReportSpec`] names everything a report needs: which files to read and
//! how they are laid out, which rows make up each configuration, and which
//! charts and tables to produce from them. Specs are plain serde values so
//! they can be written by hand as JSON:
//!
//! ```json
//! {
//!   "name": "delete",
//!   "title": "Deleting Relationships",
//!   "schema": { "metadata": ["integer", "integer"], "samples": 20 },
//!   "inputs": [
//!     { "id": "plain", "files": ["plainDelete.txt"] },
//!     { "id": "full", "files": ["fullDelete.txt"] }
//!   ],
//!   "parameter": { "source": { "column": 1 } },
//!   "configurations": [
//!     { "name": "plain", "input": "plain" },
//!     { "name": "full", "input": "full" }
//!   ],
//!   "tables": [{
//!     "parameter_header": "Rels / Tx",
//!     "format": { "decimals": 0, "percent": true },
//!     "columns": [
//!       { "configuration": "full", "value": { "kind": "ratio", "baseline": "plain" } }
//!     ]
//!   }]
//! }
//! ```

use std::{collections::HashSet, path::PathBuf};

use relperf_analysis::{
    axis::{ParameterAxis, ParameterSource},
    schema::{ColumnRange, ColumnType, TrialSchema},
    selector::Selection,
};
use relperf_render::{
    chart::{Axis, LegendPosition},
    format::NumberFormat,
    style::SeriesStyle,
    table::TableLayout,
};
use serde::{Deserialize, Serialize};

use crate::error::SpecError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSpec {
    pub name: String,
    pub title: String,
    /// Layout shared by every input file
    pub schema: TrialSchema,
    pub inputs: Vec<InputSpec>,
    pub parameter: ParameterAxis,
    /// Sample columns to reduce; defaults to the schema's sample columns
    #[serde(default)]
    pub samples: Option<ColumnRange>,
    pub configurations: Vec<ConfigurationSpec>,
    #[serde(default)]
    pub on_empty: EmptySelectionPolicy,
    #[serde(default)]
    pub chart: Option<ChartSpec>,
    #[serde(default)]
    pub tables: Vec<TableSpec>,
}

/// A named group of result files, concatenated in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpec {
    pub id: String,
    /// Paths relative to the data directory
    pub files: Vec<PathBuf>,
}

/// A variant under comparison: the rows of one input matching a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSpec {
    pub name: String,
    pub input: String,
    #[serde(default)]
    pub selection: Selection,
}

/// What to do when a configuration's selection matches no rows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptySelectionPolicy {
    /// Abort the report
    #[default]
    Fail,
    /// Drop every series built from the configuration
    Skip,
}

/// The statistic a chart series or table column shows.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatKind {
    /// Mean and stddev of the raw samples
    #[default]
    Absolute,
    /// Ratio of the baseline's samples to this configuration's
    Ratio { baseline: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Defaults to the report title
    #[serde(default)]
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    #[serde(default)]
    pub legend: LegendPosition,
    /// Overrides the report's sample columns
    #[serde(default)]
    pub samples: Option<ColumnRange>,
    pub series: Vec<ChartSeriesSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeriesSpec {
    pub configuration: String,
    /// Legend entry; defaults to the configuration name
    #[serde(default)]
    pub label: Option<String>,
    pub style: SeriesStyle,
    #[serde(default)]
    pub value: StatKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default)]
    pub title: Option<String>,
    pub parameter_header: String,
    #[serde(default)]
    pub layout: TableLayout,
    #[serde(default)]
    pub format: NumberFormat,
    /// Overrides the report's sample columns
    #[serde(default)]
    pub samples: Option<ColumnRange>,
    pub columns: Vec<TableColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumnSpec {
    pub configuration: String,
    /// Column header; defaults to the configuration name
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub value: StatKind,
}

impl ReportSpec {
    /// Sample columns used unless a chart or table overrides them.
    #[must_use]
    pub fn default_samples(&self) -> ColumnRange {
        self.samples.unwrap_or_else(|| self.schema.sample_columns())
    }

    #[must_use]
    pub fn input(&self, id: &str) -> Option<&InputSpec> {
        self.inputs.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn configuration(&self, name: &str) -> Option<&ConfigurationSpec> {
        self.configurations.iter().find(|c| c.name == name)
    }

    /// Checks every cross reference and column index in the spec.
    ///
    /// All problems are collected before returning, so a hand-written spec
    /// can be fixed in one pass.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut problems = vec![];

        if self.inputs.is_empty() {
            problems.push("no inputs declared".to_owned());
        }
        for id in duplicates(self.inputs.iter().map(|i| i.id.as_str())) {
            problems.push(format!("duplicate input '{id}'"));
        }
        for input in self.inputs.iter().filter(|i| i.files.is_empty()) {
            problems.push(format!("input '{}' has no files", input.id));
        }

        if self.configurations.is_empty() {
            problems.push("no configurations declared".to_owned());
        }
        for name in duplicates(self.configurations.iter().map(|c| c.name.as_str())) {
            problems.push(format!("duplicate configuration '{name}'"));
        }
        for config in &self.configurations {
            if self.input(&config.input).is_none() {
                problems.push(format!(
                    "configuration '{}' refers to unknown input '{}'",
                    config.name, config.input
                ));
            }
            for predicate in &config.selection.predicates {
                if let Err(err) = self.schema.check_predicate_column(predicate.column) {
                    problems.push(format!("configuration '{}': {err}", config.name));
                }
            }
            if let Some(rows) = config.selection.rows {
                if rows.start > rows.end {
                    problems.push(format!(
                        "configuration '{}': row range {}..{} is reversed",
                        config.name, rows.start, rows.end
                    ));
                }
            }
        }

        match &self.parameter.source {
            ParameterSource::Column(index) => {
                if self.schema.metadata.get(*index) != Some(&ColumnType::Integer) {
                    problems.push(format!(
                        "parameter column {index} is not an integer metadata column"
                    ));
                }
            }
            ParameterSource::Values(values) => {
                if values.is_empty() {
                    problems.push("fixed parameter axis has no values".to_owned());
                }
            }
        }
        if !self.parameter.scale.is_finite() || self.parameter.scale == 0.0 {
            problems.push(format!(
                "parameter scale {} must be finite and non-zero",
                self.parameter.scale
            ));
        }

        self.check_samples("report", self.default_samples(), &mut problems);

        if let Some(chart) = &self.chart {
            if chart.series.is_empty() {
                problems.push("chart has no series".to_owned());
            }
            if let Some(samples) = chart.samples {
                self.check_samples("chart", samples, &mut problems);
            }
            for series in &chart.series {
                self.check_stat_source("chart", &series.configuration, &series.value, &mut problems);
            }
        }

        for (i, table) in self.tables.iter().enumerate() {
            let context = format!("table {i}");
            if table.columns.is_empty() {
                problems.push(format!("{context} has no columns"));
            }
            if let Some(samples) = table.samples {
                self.check_samples(&context, samples, &mut problems);
            }
            for column in &table.columns {
                self.check_stat_source(&context, &column.configuration, &column.value, &mut problems);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(SpecError::SchemaMismatch {
                report: self.name.clone(),
                problems,
            })
        }
    }

    fn check_samples(&self, context: &str, samples: ColumnRange, problems: &mut Vec<String>) {
        if let Err(err) = self.schema.check_integer_range(samples) {
            problems.push(format!("{context}: {err}"));
        }
    }

    fn check_stat_source(
        &self,
        context: &str,
        configuration: &str,
        value: &StatKind,
        problems: &mut Vec<String>,
    ) {
        if self.configuration(configuration).is_none() {
            problems.push(format!("{context} refers to unknown configuration '{configuration}'"));
        }
        if let StatKind::Ratio { baseline } = value {
            if self.configuration(baseline).is_none() {
                problems.push(format!(
                    "{context} refers to unknown baseline configuration '{baseline}'"
                ));
            }
        }
    }
}

fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut duplicates = vec![];
    for name in names {
        if !seen.insert(name) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}
