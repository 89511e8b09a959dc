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

const AVERAGE_DEGREE: &str = "Average Vertex Degree";

pub(super) fn no_props_read() -> ReportSpec {
    ReportSpec {
        name: String::new(),
        title: "Computing Degrees of 1 Mil. Random Vertices, No Rel Properties".to_owned(),
        schema: TrialSchema::numeric(2, 10),
        inputs: vec![input("reading", "noPropsReading.txt")],
        parameter: ParameterAxis::values([10.0, 100.0, 1000.0, 10_000.0]),
        samples: None,
        configurations: vec![
            configuration("simple", "reading", Selection::all().row_range(0, 4)),
            configuration("plain", "reading", Selection::all().row_range(4, 8)),
        ],
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: Axis::log(AVERAGE_DEGREE),
            y: Axis::log("Time (ms)"),
            legend: LegendPosition::UpperLeft,
            samples: None,
            series: vec![
                line("plain", "Plain Database", Color::Purple, LineStyle::Solid),
                line("simple", "Simple Relcount", Color::Green, LineStyle::Solid),
            ],
        }),
        tables: vec![TableSpec {
            title: Some("Read speedup over the plain database".to_owned()),
            parameter_header: String::new(),
            layout: TableLayout::SeriesRows,
            format: NumberFormat::decimals(2),
            samples: None,
            columns: vec![ratio("simple", "Speedup", "plain")],
        }],
    }
}

/// Each file holds 13 plain-database rows followed by 13 full-module rows,
/// measured under one cache setting.
pub(super) fn two_props_read_degree() -> ReportSpec {
    const CACHES: [(&str, &str, &str, LineStyle); 3] = [
        ("disk", "twoPropsReading-disk.txt", "No Cache", LineStyle::Dotted),
        ("low", "twoPropsReading-nocache.txt", "Low Level", LineStyle::DashDot),
        ("high", "twoPropsReading-strong-cache.txt", "High Level", LineStyle::Solid),
    ];

    let mut configurations = vec![];
    let mut plain_lines = vec![];
    let mut full_lines = vec![];
    let mut columns = vec![];
    for (id, _, cache, style) in CACHES {
        let plain = format!("plain-{id}");
        let full = format!("full-{id}");
        configurations.push(configuration(&plain, id, Selection::all().row_range(0, 13)));
        configurations.push(configuration(&full, id, Selection::all().row_range(13, 26)));
        plain_lines.push(line(
            &plain,
            &format!("Plain Database ({cache})"),
            Color::Purple,
            style,
        ));
        full_lines.push(line(
            &full,
            &format!("Full Relcount ({cache})"),
            Color::Blue,
            style,
        ));
        columns.push(ratio(&full, cache, &plain));
    }

    ReportSpec {
        name: String::new(),
        title: "Computing Degrees of 10 Random Vertices, Two Rel Properties".to_owned(),
        schema: TrialSchema::new(vec![ColumnType::Ignored, ColumnType::Integer], 100)
            .with_trailing_delimiter(),
        inputs: CACHES
            .iter()
            .map(|(id, file, _, _)| input(id, file))
            .collect(),
        // the degree column holds 50 × the average vertex degree
        parameter: ParameterAxis::column(1).scaled(0.02),
        samples: None,
        configurations,
        on_empty: EmptySelectionPolicy::Fail,
        chart: Some(ChartSpec {
            title: None,
            x: Axis::log(AVERAGE_DEGREE),
            y: Axis::log("Time (microseconds)"),
            legend: LegendPosition::UpperLeft,
            samples: None,
            series: plain_lines.into_iter().chain(full_lines).collect(),
        }),
        tables: vec![TableSpec {
            title: Some("Read speedup over the plain database".to_owned()),
            parameter_header: "Avg Degree".to_owned(),
            layout: TableLayout::PointRows,
            format: NumberFormat::decimals(2),
            samples: None,
            columns,
        }],
    }
}
