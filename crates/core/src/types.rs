//! Core data types for the OHLCV chart panes.

use serde::{Deserialize, Serialize};

/// Daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Open price.
    pub open: f64,
    /// High price.
    pub high: f64,
    /// Low price.
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Bar {
    /// Create a bar.
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Whether all five numeric fields are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.volume.is_finite()
    }

    /// Values in candlestick series order: `[open, close, low, high]`.
    #[inline]
    pub fn candle_values(&self) -> [f64; 4] {
        [self.open, self.close, self.low, self.high]
    }

    /// Highest of the four prices, tolerant of swapped high/low fields.
    #[inline]
    pub fn price_max(&self) -> f64 {
        self.high.max(self.low).max(self.open).max(self.close)
    }

    /// Lowest of the four prices, tolerant of swapped high/low fields.
    #[inline]
    pub fn price_min(&self) -> f64 {
        self.high.min(self.low).min(self.open).min(self.close)
    }
}

/// Proportional sub-range `[start, end]` over a bar sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// Start fraction in `[0, 1]`.
    pub start: f64,
    /// End fraction in `[0, 1]`.
    pub end: f64,
}

impl Window {
    /// Create a window from fractions.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The whole sequence.
    pub fn full() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Build from zoom percentages (`0..=100`).
    pub fn from_percent(start_pct: f64, end_pct: f64) -> Self {
        Self::new(start_pct / 100.0, end_pct / 100.0)
    }
}

impl Default for Window {
    fn default() -> Self {
        Self::full()
    }
}

/// One of the two chart panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pane {
    /// Candlestick pane.
    Price,
    /// Volume bar pane.
    Volume,
}

/// Values of the currently hovered bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverState {
    /// Absolute index into the full bar sequence.
    pub index: Option<usize>,
    /// Open of the hovered bar.
    pub open: Option<f64>,
    /// Volume of the hovered bar.
    pub volume: Option<f64>,
}

impl HoverState {
    /// Capture the hover values of a bar. Non-finite values are stored as absent.
    pub fn from_bar(index: usize, bar: &Bar) -> Self {
        Self {
            index: Some(index),
            open: Some(bar.open).filter(|v| v.is_finite()),
            volume: Some(bar.volume).filter(|v| v.is_finite()),
        }
    }

    /// Whether a bar is highlighted.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    /// Reference value shown on the given pane.
    #[inline]
    pub fn value_for(&self, pane: Pane) -> Option<f64> {
        match pane {
            Pane::Price => self.open,
            Pane::Volume => self.volume,
        }
    }

    /// Reset to nothing highlighted.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Axis dimension of an axis pointer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDim {
    X,
    Y,
}

/// Value carried by an axis pointer entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    /// Numeric value (category index on the x-axis, data value on the y-axis).
    Number(f64),
    /// Category label.
    Category(String),
}

/// One axis entry of an axis pointer event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisInfo {
    /// Axis dimension.
    #[serde(alias = "axisDimension")]
    pub axis_dim: AxisDim,
    /// Axis index within the chart.
    #[serde(default)]
    pub axis_index: usize,
    /// Pointer value on that axis.
    pub value: AxisValue,
}

/// Axis pointer notification emitted by a chart widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisEvent {
    /// Per-axis pointer values.
    #[serde(default)]
    pub axes_info: Vec<AxisInfo>,
}

impl AxisEvent {
    /// Event pointing at a category index on x-axis 0.
    pub fn at_index(index: f64) -> Self {
        Self {
            axes_info: vec![AxisInfo {
                axis_dim: AxisDim::X,
                axis_index: 0,
                value: AxisValue::Number(index),
            }],
        }
    }

    /// Event pointing at a category label on x-axis 0.
    pub fn at_category(label: impl Into<String>) -> Self {
        Self {
            axes_info: vec![AxisInfo {
                axis_dim: AxisDim::X,
                axis_index: 0,
                value: AxisValue::Category(label.into()),
            }],
        }
    }

    /// Add a y-axis entry.
    pub fn with_y(mut self, axis_index: usize, value: f64) -> Self {
        self.axes_info.push(AxisInfo {
            axis_dim: AxisDim::Y,
            axis_index,
            value: AxisValue::Number(value),
        });
        self
    }

    /// First x-axis entry.
    pub fn x(&self) -> Option<&AxisInfo> {
        self.axes_info.iter().find(|a| a.axis_dim == AxisDim::X)
    }

    /// Numeric value of the y-axis entry with the given index.
    pub fn y_value(&self, axis_index: usize) -> Option<f64> {
        self.axes_info
            .iter()
            .find(|a| a.axis_dim == AxisDim::Y && a.axis_index == axis_index)
            .and_then(|a| match a.value {
                AxisValue::Number(v) if v.is_finite() => Some(v),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candle_values_order() {
        let bar = Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0);
        assert_eq!(bar.candle_values(), [10.0, 11.0, 9.0, 12.0]);
    }

    #[test]
    fn test_price_extremes_with_swapped_fields() {
        let bar = Bar::new("2024-01-02", 10.0, 9.0, 12.0, 11.0, 500.0);
        assert_eq!(bar.price_max(), 12.0);
        assert_eq!(bar.price_min(), 9.0);
    }

    #[test]
    fn test_hover_state_from_bar() {
        let bar = Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, f64::NAN);
        let state = HoverState::from_bar(3, &bar);
        assert!(state.is_active());
        assert_eq!(state.value_for(Pane::Price), Some(10.0));
        assert_eq!(state.value_for(Pane::Volume), None);
    }

    #[test]
    fn test_axis_event_deserialize() {
        let json = r#"{"axesInfo":[{"axisDim":"x","axisIndex":0,"value":"2024-01-02"},{"axisDimension":"y","axisIndex":1,"value":42.5}]}"#;
        let event: AxisEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.x().map(|a| &a.value),
            Some(&AxisValue::Category("2024-01-02".to_string()))
        );
        assert_eq!(event.y_value(1), Some(42.5));
        assert_eq!(event.y_value(0), None);
    }

    #[test]
    fn test_window_from_percent() {
        let w = Window::from_percent(25.0, 75.0);
        assert_eq!(w, Window::new(0.25, 0.75));
        assert_eq!(Window::default(), Window::full());
    }
}
