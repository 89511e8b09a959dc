use serde::{Deserialize, Serialize};

/// How values are scaled and printed in a table.
///
/// Values are first divided by `divisor` (e.g. 1000 to show µs as ms), then
/// multiplied by 100 when `percent` is set, and finally printed with
/// `decimals` digits after the point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub decimals: usize,
    #[serde(default)]
    pub percent: bool,
    #[serde(default)]
    pub divisor: Option<f64>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::decimals(2)
    }
}

impl NumberFormat {
    #[must_use]
    pub fn decimals(decimals: usize) -> Self {
        Self {
            decimals,
            percent: false,
            divisor: None,
        }
    }

    #[must_use]
    pub fn percent(decimals: usize) -> Self {
        Self {
            decimals,
            percent: true,
            divisor: None,
        }
    }

    #[must_use]
    pub fn with_divisor(mut self, divisor: f64) -> Self {
        self.divisor = Some(divisor);
        self
    }

    /// Applies divisor and percentage scaling.
    #[must_use]
    pub fn scale(&self, value: f64) -> f64 {
        let value = self.divisor.map_or(value, |d| value / d);
        if self.percent { value * 100.0 } else { value }
    }

    /// Scales and prints `value`, with a `%` (or `\%` for LaTeX) suffix when
    /// formatting as a percentage.
    #[must_use]
    pub fn format(&self, value: f64, latex: bool) -> String {
        let number = format!("{:.*}", self.decimals, self.scale(value));
        match (self.percent, latex) {
            (true, true) => format!(r"{number}\%"),
            (true, false) => format!("{number}%"),
            (false, _) => number,
        }
    }
}

/// Prints a parameter value: integral values without decimals.
#[must_use]
pub fn format_parameter(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
