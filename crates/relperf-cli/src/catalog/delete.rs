use relperf_analysis::{axis::ParameterAxis, schema::TrialSchema};
use relperf_render::{
    chart::{Axis, LegendPosition},
    format::NumberFormat,
    style::{Color, LineStyle},
    table::TableLayout,
};
use relperf_report::spec::{ChartSpec, EmptySelectionPolicy, ReportSpec, TableSpec};

use super::{absolute, input, line, ratio, rels_per_tx_axis, whole_input};

pub(super) fn no_props_delete() -> ReportSpec {
    let with_error_bars = |mut series: relperf_report::spec::ChartSeriesSpec| {
        series.style = series.style.with_error_bars();
        series
    };

    ReportSpec {
        name: String::new(),
        title: "Deleting 10,000 Relationships with No Properties".to_owned(),
        schema: TrialSchema::numeric(2, 20),
        inputs: vec![
            input("plain", "noPropsPlainDatabaseDelete.txt"),
            input("simple", "noPropsSimpleRelcountDelete.txt"),
            input("full", "noPropsFullRelcountDelete.txt"),
        ],
        parameter: ParameterAxis::column(1),
        samples: None,
        configurations: vec![
            whole_input("plain"),
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
                line("simple", "Simple Relcount", Color::Green, LineStyle::Solid),
                line("full", "Full Relcount", Color::Orange, LineStyle::Solid),
            ]
            .into_iter()
            .map(with_error_bars)
            .collect(),
        }),
        tables: vec![
            TableSpec {
                title: Some("Delete throughput relative to the plain database".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::percent(0),
                samples: None,
                columns: vec![
                    ratio("simple", "Simple Relcount", "plain"),
                    ratio("full", "Full Relcount", "plain"),
                ],
            },
            TableSpec {
                title: Some("Delete time (ms)".to_owned()),
                parameter_header: "Rels / Tx".to_owned(),
                layout: TableLayout::PointRows,
                format: NumberFormat::decimals(0).with_divisor(1000.0),
                samples: None,
                columns: vec![
                    absolute("plain", "No Framework"),
                    absolute("simple", "Simple Relcount"),
                    absolute("full", "Full Relcount"),
                ],
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use relperf_render::table::TableStyle;

    use super::*;
    use crate::catalog::fixture::{generate, line, means, xs};

    fn file(latency: i64) -> String {
        [1, 10, 100, 1000]
            .iter()
            .map(|rels| line(&["0", rels.to_string().as_str()], &[latency; 20], false))
            .collect()
    }

    #[test]
    fn test_no_props_delete_from_files() {
        let mut spec = no_props_delete();
        spec.name = "no-props-delete".to_owned();
        let output = generate(
            &spec,
            &[
                ("noPropsPlainDatabaseDelete.txt", file(10_000)),
                ("noPropsSimpleRelcountDelete.txt", file(12_500)),
                ("noPropsFullRelcountDelete.txt", file(20_000)),
            ],
        );

        let chart = output.chart.unwrap();
        assert!(chart.series().iter().all(|s| s.style.error_bars));
        assert_eq!(xs(&chart.series()[2]), [1.0, 10.0, 100.0, 1000.0]);
        assert_eq!(means(&chart.series()[2]), [20_000.0; 4]);

        let overhead = output.tables[0].render(TableStyle::Latex).unwrap();
        assert!(overhead.contains(r"$80\% \pm 0\%$"), "{overhead}");
        assert!(overhead.contains(r"$50\% \pm 0\%$"), "{overhead}");
        let times = output.tables[1].render(TableStyle::Console).unwrap();
        assert!(times.contains("10 ± 0"), "{times}");
        assert!(times.contains("20 ± 0"), "{times}");
    }
}
