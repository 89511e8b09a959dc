use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Fixed palette used by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Purple,
    Green,
    Blue,
    Orange,
    Red,
    Pink,
    Black,
    Gray,
}

impl Color {
    #[must_use]
    pub fn rgb(self) -> RGBColor {
        match self {
            Color::Purple => RGBColor(128, 0, 128),
            Color::Green => RGBColor(0, 128, 0),
            Color::Blue => RGBColor(0, 0, 255),
            Color::Orange => RGBColor(255, 165, 0),
            Color::Red => RGBColor(255, 0, 0),
            Color::Pink => RGBColor(255, 105, 180),
            Color::Black => RGBColor(0, 0, 0),
            Color::Gray => RGBColor(128, 128, 128),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    DashDot,
    Dotted,
}

impl LineStyle {
    /// Dash length and gap in pixels, `None` for a continuous line.
    #[must_use]
    pub fn dash_pattern(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((12, 6)),
            LineStyle::DashDot => Some((8, 4)),
            LineStyle::Dotted => Some((2, 4)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: Color,
    #[serde(default)]
    pub line: LineStyle,
    /// Draw mean ± stddev bars at every point
    #[serde(default)]
    pub error_bars: bool,
}

impl SeriesStyle {
    #[must_use]
    pub fn new(color: Color, line: LineStyle) -> Self {
        Self {
            color,
            line,
            error_bars: false,
        }
    }

    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self::new(color, LineStyle::Solid)
    }

    #[must_use]
    pub fn with_error_bars(mut self) -> Self {
        self.error_bars = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_json_defaults() {
        let style: SeriesStyle = serde_json::from_str(r#"{"color": "purple"}"#).unwrap();
        assert_eq!(style, SeriesStyle::solid(Color::Purple));

        let style: SeriesStyle =
            serde_json::from_str(r#"{"color": "red", "line": "dash_dot", "error_bars": true}"#)
                .unwrap();
        assert_eq!(
            style,
            SeriesStyle::new(Color::Red, LineStyle::DashDot).with_error_bars()
        );
    }

    #[test]
    fn test_style_json_names_are_snake_case() {
        let json = serde_json::to_value(SeriesStyle::new(Color::Gray, LineStyle::DashDot)).unwrap();
        assert_eq!(json["color"], "gray");
        assert_eq!(json["line"], "dash_dot");
        assert!(serde_json::from_str::<SeriesStyle>(r#"{"color": "Gray"}"#).is_err());
    }
}
