use relperf_stats::{descriptive::SummaryStat, ratio::RatioStat};

use crate::{error::RenderError, style::SeriesStyle};

/// One "mean ± stddev" value as shown in a chart or table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCell {
    pub mean: f64,
    pub std_dev: f64,
    /// Set when the value rests on an undefined ratio
    pub undefined: bool,
}

impl StatCell {
    #[must_use]
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self {
            mean,
            std_dev,
            undefined: !mean.is_finite() || !std_dev.is_finite(),
        }
    }

    /// Whether the cell should be flagged in rendered output.
    #[must_use]
    pub fn is_flagged(&self) -> bool {
        self.undefined || !self.mean.is_finite() || !self.std_dev.is_finite()
    }
}

impl From<SummaryStat> for StatCell {
    fn from(stat: SummaryStat) -> Self {
        Self::new(stat.mean, stat.std_dev)
    }
}

impl From<RatioStat> for StatCell {
    fn from(stat: RatioStat) -> Self {
        Self {
            mean: stat.mean,
            std_dev: stat.std_dev,
            undefined: stat.is_undefined(),
        }
    }
}

/// A named, styled sequence of (parameter, cell) points.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub style: SeriesStyle,
    pub points: Vec<(f64, StatCell)>,
}

impl Series {
    pub fn new<I, C>(label: impl Into<String>, style: SeriesStyle, points: I) -> Self
    where
        I: IntoIterator<Item = (f64, C)>,
        C: Into<StatCell>,
    {
        Self {
            label: label.into(),
            style,
            points: points.into_iter().map(|(x, c)| (x, c.into())).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of flagged points.
    #[must_use]
    pub fn undefined_count(&self) -> usize {
        self.points.iter().filter(|(_, c)| c.is_flagged()).count()
    }

    pub(crate) fn ensure_not_empty(&self) -> Result<(), RenderError> {
        if self.is_empty() {
            return Err(RenderError::EmptySeries {
                label: self.label.clone(),
            });
        }
        Ok(())
    }
}
