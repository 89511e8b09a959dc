//! Relationship counting benchmarks
//!
//! All variants share one result file per run whose metadata columns are:
//!
//! ```text
//! serialization;cache;degree;framework;properties;<100 samples>
//! SINGLE_PROP;lowcache;100;CACHED;TWO_PROPS;...
//! ```

use relperf_analysis::{
    axis::ParameterAxis,
    schema::{ColumnType, TrialSchema},
    selector::Selection,
};
use relperf_render::{
    chart::{Axis, LegendPosition},
    format::NumberFormat,
    style::{Color, LineStyle},
    table::TableLayout,
};
use relperf_report::spec::{ChartSpec, EmptySelectionPolicy, ReportSpec, TableSpec};

use super::{configuration, input, line, ratio};

const SERIALIZATION: usize = 0;
const CACHE: usize = 1;
const DEGREE: usize = 2;
const FRAMEWORK: usize = 3;
const PROPERTIES: usize = 4;

/// Cache tier: column value, legend suffix, color.
const CACHES: [(&str, &str, Color); 3] = [
    ("nocache", "disk", Color::Purple),
    ("lowcache", "low level cache", Color::Green),
    ("highcache", "high level cache", Color::Blue),
];

/// Algorithm under test: column value, legend prefix, line style.
type Framework = (&'static str, &'static str, LineStyle);

const PLAIN: Framework = ("NO_FRAMEWORK", "Plain Neo4j", LineStyle::Dotted);
const NAIVE: Framework = ("NAIVE_OPTIMIZED", "RelCount Module Naive", LineStyle::DashDot);
const CACHED: Framework = ("CACHED", "RelCount Module Cached", LineStyle::Solid);

pub(super) fn count_relationships() -> ReportSpec {
    spec(
        "Create 1,000 Relationships Between Random Pairs of 100 Nodes",
        "countRelationships-slow-pc.txt",
        "TWO_PROPS",
        &[PLAIN, CACHED],
        "Number of Relationships per Transaction",
    )
}

pub(super) fn count_relationships_2_1() -> ReportSpec {
    spec(
        "Counting Relationships for 10 Nodes (Two Properties per Relationship)",
        "countRelationships.txt",
        "NO_PROPS",
        &[PLAIN, NAIVE, CACHED],
        "Relationships per Node",
    )
}

fn spec(
    title: &str,
    file: &str,
    properties: &str,
    frameworks: &[Framework],
    x_label: &str,
) -> ReportSpec {
    let mut configurations = vec![];
    let mut series = vec![];
    let mut columns = vec![];
    for (cache, cache_label, color) in CACHES {
        for &(framework, framework_label, style) in frameworks {
            let name = format!("{cache}/{framework}");
            let selection = Selection::all()
                .with(SERIALIZATION, "SINGLE_PROP")
                .with(PROPERTIES, properties)
                .with(CACHE, cache)
                .with(FRAMEWORK, framework);
            configurations.push(configuration(&name, "results", selection));
            series.push(line(
                &name,
                &format!("{framework_label} ({cache_label})"),
                color,
                style,
            ));
            if framework != PLAIN.0 {
                columns.push(ratio(
                    &name,
                    &format!("{framework_label} ({cache_label})"),
                    &format!("{cache}/{}", PLAIN.0),
                ));
            }
        }
    }

    ReportSpec {
        name: String::new(),
        title: title.to_owned(),
        schema: TrialSchema::new(
            vec![
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Integer,
                ColumnType::Text,
                ColumnType::Text,
            ],
            100,
        )
        .with_skip_lines(3)
        .with_trailing_delimiter(),
        inputs: vec![input("results", file)],
        parameter: ParameterAxis::column(DEGREE),
        samples: None,
        configurations,
        on_empty: EmptySelectionPolicy::Skip,
        chart: Some(ChartSpec {
            title: None,
            x: Axis::log(x_label),
            y: Axis::log("Time (microseconds)"),
            legend: LegendPosition::UpperLeft,
            samples: None,
            series,
        }),
        tables: vec![TableSpec {
            title: Some("Speedup over plain Neo4j".to_owned()),
            parameter_header: "Degree".to_owned(),
            layout: TableLayout::PointRows,
            format: NumberFormat::decimals(2),
            samples: None,
            columns,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixture::{generate, line, means, xs};

    /// Result file without high level cache runs, plus two-property rows
    /// that the report must filter out.
    fn results() -> String {
        let mut content =
            "countRelationships\nrun 1\nserialization;cache;degree;framework;properties\n"
                .to_owned();
        for cache in ["nocache", "lowcache"] {
            for (framework, latency) in
                [("NO_FRAMEWORK", 1000), ("NAIVE_OPTIMIZED", 500), ("CACHED", 100)]
            {
                for degree in ["1", "10", "100"] {
                    for (properties, latency) in [("NO_PROPS", latency), ("TWO_PROPS", 7)] {
                        content.push_str(&line(
                            &["SINGLE_PROP", cache, degree, framework, properties],
                            &[latency; 100],
                            true,
                        ));
                    }
                }
            }
        }
        content
    }

    #[test]
    fn test_missing_cache_tier_is_skipped() {
        let mut spec = count_relationships_2_1();
        spec.name = "count-relationships-2-1".to_owned();
        let output = generate(&spec, &[("countRelationships.txt", results())]);

        let chart = output.chart.unwrap();
        assert_eq!(chart.series().len(), 6);
        assert_eq!(xs(&chart.series()[0]), [1.0, 10.0, 100.0]);
        assert_eq!(means(&chart.series()[0]), [1000.0; 3]);

        let table = &output.tables[0];
        let headers = table.series().iter().map(|s| s.label.as_str()).collect::<Vec<_>>();
        assert_eq!(
            headers,
            [
                "RelCount Module Naive (disk)",
                "RelCount Module Cached (disk)",
                "RelCount Module Naive (low level cache)",
                "RelCount Module Cached (low level cache)",
            ]
        );
        assert_eq!(means(&table.series()[0]), [2.0; 3]);
        assert_eq!(means(&table.series()[3]), [10.0; 3]);
    }

    #[test]
    fn test_configurations_cover_every_cache_tier() {
        let spec = count_relationships_2_1();
        assert_eq!(spec.configurations.len(), 9);
        assert_eq!(spec.chart.as_ref().unwrap().series.len(), 9);
        assert_eq!(spec.tables[0].columns.len(), 6);

        let config = spec.configuration("lowcache/CACHED").unwrap();
        assert_eq!(config.selection.predicates.len(), 4);
        assert!(spec.configuration("highcache/NO_FRAMEWORK").is_some());
    }
}
