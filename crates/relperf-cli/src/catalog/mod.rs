//! Built-in reports
//!
//! Each entry reproduces one of the analyses run on the relationship-count
//! module's performance results. File names are the ones the performance
//! harness writes, resolved against `--data-dir`.

use relperf_analysis::selector::Selection;
use relperf_render::{
    chart::Axis,
    style::{Color, LineStyle, SeriesStyle},
};
use relperf_report::spec::{
    ChartSeriesSpec, ConfigurationSpec, InputSpec, ReportSpec, StatKind, TableColumnSpec,
};

mod count;
mod delete;
mod read;
mod write;

#[derive(Debug)]
pub(crate) struct CatalogEntry {
    pub name: &'static str,
    build: fn() -> ReportSpec,
}

impl CatalogEntry {
    pub(crate) fn spec(&self) -> ReportSpec {
        let mut spec = (self.build)();
        spec.name = self.name.to_owned();
        spec
    }
}

pub(crate) const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry {
        name: "no-props-write",
        build: write::no_props_write,
    },
    CatalogEntry {
        name: "no-props-read",
        build: read::no_props_read,
    },
    CatalogEntry {
        name: "no-props-delete",
        build: delete::no_props_delete,
    },
    CatalogEntry {
        name: "two-props-write-compact",
        build: write::two_props_write_compact,
    },
    CatalogEntry {
        name: "two-props-write-no-compact",
        build: write::two_props_write_no_compact,
    },
    CatalogEntry {
        name: "compact-write",
        build: write::compact_write,
    },
    CatalogEntry {
        name: "two-props-read-degree",
        build: read::two_props_read_degree,
    },
    CatalogEntry {
        name: "count-relationships",
        build: count::count_relationships,
    },
    CatalogEntry {
        name: "count-relationships-2-1",
        build: count::count_relationships_2_1,
    },
];

pub(crate) fn find(name: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|entry| entry.name == name)
}

pub(crate) fn names() -> Vec<&'static str> {
    ENTRIES.iter().map(|entry| entry.name).collect()
}

const RELS_PER_TX: &str = "Number of Relationships per Transaction";

fn rels_per_tx_axis() -> Axis {
    Axis::log(RELS_PER_TX)
}

fn input(id: &str, file: &str) -> InputSpec {
    InputSpec {
        id: id.to_owned(),
        files: vec![file.into()],
    }
}

/// One configuration per input, using all of its rows.
fn whole_input(id: &str) -> ConfigurationSpec {
    configuration(id, id, Selection::all())
}

fn configuration(name: &str, input: &str, selection: Selection) -> ConfigurationSpec {
    ConfigurationSpec {
        name: name.to_owned(),
        input: input.to_owned(),
        selection,
    }
}

fn line(configuration: &str, label: &str, color: Color, line: LineStyle) -> ChartSeriesSpec {
    ChartSeriesSpec {
        configuration: configuration.to_owned(),
        label: Some(label.to_owned()),
        style: SeriesStyle::new(color, line),
        value: StatKind::Absolute,
    }
}

fn absolute(configuration: &str, header: &str) -> TableColumnSpec {
    TableColumnSpec {
        configuration: configuration.to_owned(),
        header: Some(header.to_owned()),
        value: StatKind::Absolute,
    }
}

fn ratio(configuration: &str, header: &str, baseline: &str) -> TableColumnSpec {
    TableColumnSpec {
        configuration: configuration.to_owned(),
        header: Some(header.to_owned()),
        value: StatKind::Ratio {
            baseline: baseline.to_owned(),
        },
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use relperf_report::spec::ReportSpec;

    use super::*;

    #[test]
    fn test_every_entry_is_valid() {
        for entry in ENTRIES {
            let spec = entry.spec();
            assert_eq!(spec.name, entry.name);
            if let Err(err) = spec.validate() {
                panic!("{}: {err}", entry.name);
            }
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names = names();
        assert_eq!(names.iter().collect::<HashSet<_>>().len(), names.len());
        assert_eq!(names.len(), 9);
    }

    #[test]
    fn test_specs_survive_json() {
        for entry in ENTRIES {
            let spec = entry.spec();
            let json = serde_json::to_string(&spec).unwrap();
            let parsed: ReportSpec = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.configurations, spec.configurations, "{}", entry.name);
            assert_eq!(parsed.chart.is_some(), spec.chart.is_some(), "{}", entry.name);
            assert_eq!(parsed.tables.len(), spec.tables.len(), "{}", entry.name);
            assert!(parsed.validate().is_ok(), "{}", entry.name);
        }
    }

    #[test]
    fn test_find() {
        assert!(find("no-props-delete").is_some());
        assert!(find("no-such-report").is_none());
    }
}
