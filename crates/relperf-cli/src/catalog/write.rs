use relperf_analysis::{axis::ParameterAxis, schema::TrialSchema};
use relperf_render::{
    chart::{Axis, LegendPosition},
    format::NumberFormat,
    style::{Color, LineStyle},
    table::TableLayout,
};
use relperf_report::spec::{ChartSpec, EmptySelectionPolicy, ReportSpec, TableSpec};

use super::{absolute, input, line, ratio, rels_per_tx_axis, whole_input};

/// Batch sizes of the 100,000-relationship write runs, which do not record
/// them in the result files.
const WRITE_BATCHES: [f64; 4] = [1.0, 10.0, 100.0, 1000.0];

pub(super) fn no_props_write() -> ReportSpec {
    ReportSpec {
        name: String::new(),
        title: "Creating 100,000 Relationships with No Properties".to_owned(),
        schema: TrialSchema::numeric(2, 10),
        inputs: vec![
            input("plain", "noPropsPlainDatabaseWrite.txt"),
            input("empty", "noPropsEmptyFrameworkWrite.txt"),
            input("simple", "noPropsSimpleRelcountWrite.txt"),
            input("full", "noPropsFullRelcountWrite.txt"),
        ],
        parameter: ParameterAxis::values(WRITE_BATCHES),
        samples: None,
        configurations: vec![
            whole_input("plain"),
            whole_input("empty"),
            whole_input("simple"),
            whole_input("full"),
        ],
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: rels_per_tx_axis(),
            y: Axis::log("Time (ms)"),
            legend: LegendPosition::LowerLeft,
            samples: None,
            series: vec![
                line("plain", "Plain Database", Color::Purple, LineStyle::Solid),
                line("empty", "Empty Framework", Color::Red, LineStyle::Solid),
                line("simple", "Simple Relcount", Color::Green, LineStyle::Solid),
                line("full", "Full Relcount", Color::Orange, LineStyle::Solid),
            ],
        }),
        tables: vec![TableSpec {
            title: Some("Write throughput relative to the plain database".to_owned()),
            parameter_header: String::new(),
            layout: TableLayout::SeriesRows,
            format: NumberFormat::percent(0),
            samples: None,
            columns: vec![
                ratio("plain", "No Framework", "plain"),
                ratio("empty", "Empty Framework", "plain"),
                ratio("simple", "Simple Relcount", "plain"),
                ratio("full", "Full Relcount", "plain"),
            ],
        }],
    }
}

pub(super) fn two_props_write_compact() -> ReportSpec {
    ReportSpec {
        name: String::new(),
        title: "Creating 100,000 Rels with Two Props per Rel, With Compaction".to_owned(),
        schema: TrialSchema::numeric(2, 10),
        inputs: vec![
            input("plain", "twoPropsPlainDatabaseWriteCompact.txt"),
            input("full", "twoPropsFullRelcountWriteCompact.txt"),
        ],
        parameter: ParameterAxis::values(WRITE_BATCHES),
        samples: None,
        configurations: vec![whole_input("plain"), whole_input("full")],
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: rels_per_tx_axis(),
            y: Axis::log("Time taken (ms)"),
            legend: LegendPosition::LowerLeft,
            samples: None,
            series: vec![
                line("plain", "Plain Database", Color::Purple, LineStyle::Solid),
                line("full", "Full Relcount", Color::Orange, LineStyle::Solid),
            ],
        }),
        tables: vec![TableSpec {
            title: Some("Write throughput relative to the plain database".to_owned()),
            parameter_header: String::new(),
            layout: TableLayout::SeriesRows,
            format: NumberFormat::percent(0),
            samples: None,
            columns: vec![
                ratio("plain", "No Framework", "plain"),
                ratio("full", "Full Relcount", "plain"),
            ],
        }],
    }
}

pub(super) fn two_props_write_no_compact() -> ReportSpec {
    ReportSpec {
        name: String::new(),
        title: "Creating 10,000 Relationships with Two Properties (No Compaction)".to_owned(),
        schema: TrialSchema::numeric(2, 20).with_trailing_delimiter(),
        inputs: vec![
            input("plain", "twoPropsPlainDatabaseWriteNoCompaction.txt"),
            input("full", "twoPropsFullRelcountWriteNoCompaction.txt"),
        ],
        parameter: ParameterAxis::column(1),
        samples: None,
        configurations: vec![whole_input("plain"), whole_input("full")],
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: rels_per_tx_axis(),
            y: Axis::log("Time (microseconds)"),
            legend: LegendPosition::LowerLeft,
            samples: None,
            series: vec![
                line("plain", "Plain Database", Color::Purple, LineStyle::Solid),
                line("full", "Full Relcount", Color::Blue, LineStyle::Solid),
            ],
        }),
        tables: vec![
            TableSpec {
                title: Some("Write throughput relative to the plain database".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::percent(0),
                samples: None,
                columns: vec![ratio("full", "Full Relcount", "plain")],
            },
            TableSpec {
                title: Some("Write time (ms)".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::decimals(0).with_divisor(1000.0),
                samples: None,
                columns: vec![
                    absolute("plain", "No Framework"),
                    absolute("full", "Full Relcount"),
                ],
            },
        ],
    }
}

/// Plain database against the full module with two and four properties per
/// relationship, measured over the first and second thousand relationships.
pub(super) fn compact_write() -> ReportSpec {
    ReportSpec {
        name: String::new(),
        title: "Creating Relationships with Two Properties (Compaction)".to_owned(),
        schema: TrialSchema::numeric(2, 20).with_trailing_delimiter(),
        inputs: vec![
            input("A", "twoPropsPlainDatabaseWriteCompact.txt"),
            input("B", "fourPropsPlainDatabaseWrite.txt"),
            input("C", "twoPropsFullRelcountWriteCompact-first1k.txt"),
            input("D", "twoPropsFullRelcountWriteCompact-second1k.txt"),
            input("E", "fourPropsFullRelcountWrite-first1k.txt"),
            input("F", "fourPropsFullRelcountWrite-second1k.txt"),
        ],
        parameter: ParameterAxis::column(1),
        samples: None,
        configurations: ["A", "B", "C", "D", "E", "F"]
            .into_iter()
            .map(whole_input)
            .collect(),
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: rels_per_tx_axis(),
            y: Axis::log("Time (microseconds)"),
            legend: LegendPosition::LowerLeft,
            // the chart leaves out the first sample column
            samples: Some((3..22).into()),
            series: vec![
                line("A", "Plain Database, 2 Props (A)", Color::Purple, LineStyle::Solid),
                line("B", "Plain Database, 4 Props (B)", Color::Pink, LineStyle::Solid),
                line("C", "Full Relcount, 2 Props, First 1k (C)", Color::Blue, LineStyle::Solid),
                line("D", "Full Relcount, 2 Props, Second 1k (D)", Color::Blue, LineStyle::DashDot),
                line("E", "Full Relcount, 4 Props, First 1k (E)", Color::Red, LineStyle::Solid),
                line("F", "Full Relcount, 4 Props, Second 1k (F)", Color::Red, LineStyle::DashDot),
            ],
        }),
        tables: vec![
            TableSpec {
                title: Some("Write throughput relative to the plain database".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::percent(1),
                samples: None,
                columns: vec![
                    ratio("C", "C", "A"),
                    ratio("D", "D", "A"),
                    ratio("E", "E", "B"),
                    ratio("F", "F", "B"),
                ],
            },
            TableSpec {
                title: Some("Write time (ms)".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::decimals(1).with_divisor(1000.0),
                samples: None,
                columns: ["A", "B", "C", "D", "E", "F"]
                    .into_iter()
                    .map(|id| absolute(id, id))
                    .collect(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use relperf_render::table::TableStyle;

    use super::*;
    use crate::catalog::fixture::{generate, line, means, xs};

    /// Four runs of ten samples each, one per batch size, without a
    /// parameter column.
    fn batch_file(latency: i64) -> String {
        (0..4)
            .map(|run| line(&["1", run.to_string().as_str()], &[latency; 10], false))
            .collect()
    }

    #[test]
    fn test_no_props_write_from_files() {
        let mut spec = no_props_write();
        spec.name = "no-props-write".to_owned();
        let output = generate(
            &spec,
            &[
                ("noPropsPlainDatabaseWrite.txt", batch_file(100)),
                ("noPropsEmptyFrameworkWrite.txt", batch_file(100)),
                ("noPropsSimpleRelcountWrite.txt", batch_file(125)),
                ("noPropsFullRelcountWrite.txt", batch_file(200)),
            ],
        );

        let chart = output.chart.unwrap();
        assert_eq!(chart.series().len(), 4);
        assert_eq!(xs(&chart.series()[0]), WRITE_BATCHES);

        let table = &output.tables[0];
        assert_eq!(means(&table.series()[0]), [1.0; 4]);
        assert_eq!(means(&table.series()[3]), [0.5; 4]);
        let text = table.render(TableStyle::Console).unwrap();
        assert!(text.contains("80% ± 0%"), "{text}");
        assert!(text.contains("50% ± 0%"), "{text}");
        assert!(!text.contains('!'), "{text}");
    }

    #[test]
    fn test_compact_write_chart_leaves_out_first_sample() {
        let file = |first: i64, rest: i64| -> String {
            let mut samples = vec![rest; 20];
            samples[0] = first;
            [1, 10, 100]
                .iter()
                .map(|rels| line(&["0", rels.to_string().as_str()], &samples, true))
                .collect::<String>()
        };
        let mut spec = compact_write();
        spec.name = "compact-write".to_owned();
        let output = generate(
            &spec,
            &[
                ("twoPropsPlainDatabaseWriteCompact.txt", file(1000, 100)),
                ("fourPropsPlainDatabaseWrite.txt", file(1000, 100)),
                ("twoPropsFullRelcountWriteCompact-first1k.txt", file(2000, 50)),
                ("twoPropsFullRelcountWriteCompact-second1k.txt", file(1000, 100)),
                ("fourPropsFullRelcountWrite-first1k.txt", file(1000, 100)),
                ("fourPropsFullRelcountWrite-second1k.txt", file(1000, 100)),
            ],
        );

        let chart = output.chart.unwrap();
        assert_eq!(xs(&chart.series()[0]), [1.0, 10.0, 100.0]);
        assert_eq!(means(&chart.series()[0]), [100.0; 3]);
        assert_eq!(means(&chart.series()[2]), [50.0; 3]);

        let times = &output.tables[1];
        assert_eq!(times.series().len(), 6);
        assert_eq!(means(&times.series()[0]), [145.0; 3]);
        assert_eq!(means(&times.series()[2]), [147.5; 3]);
    }
}
