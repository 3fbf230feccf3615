//! Chart widget collaborator interface.
//!
//! The widget owns layout, rendering and hit-testing. This crate only feeds it
//! option documents and reacts to the notifications it emits.

use ohlcv_core::AxisEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification emitted by a chart widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// Axis pointer moved.
    PointerMove(AxisEvent),
    /// Pointer left the render surface.
    PointerLeave,
    /// Rendering finished (after a resize or full re-layout).
    Finished,
}

/// How an option document is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMode {
    /// Discard prior state.
    Replace,
    /// Merge into prior state.
    Merge,
}

/// Axis of grid 0 used for pixel conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisRef {
    /// Category axis; values are category indices.
    X,
    /// Value axis.
    Y,
}

/// Plot rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pixel and index extents of the category axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisExtent {
    /// `[start, end]` in pixels.
    pub pixel: (f64, f64),
    /// `[first, last]` category index.
    pub index: (f64, f64),
}

impl AxisExtent {
    /// Pixel width of one category step.
    pub fn band_width(&self) -> f64 {
        let px = (self.pixel.1 - self.pixel.0).abs();
        px / (self.index.1 - self.index.0).max(1.0)
    }
}

/// One chart widget instance.
pub trait ChartWidget {
    /// Apply an option document.
    fn set_option(&mut self, option: &Value, mode: OptionMode);

    /// Convert a value on an axis of grid 0 to a pixel coordinate.
    fn convert_to_pixel(&self, axis: AxisRef, value: f64) -> Option<f64>;

    /// Extents of x-axis 0, if laid out.
    fn x_axis_extent(&self) -> Option<AxisExtent>;

    /// Plot rectangle of grid 0, if laid out.
    fn grid_rect(&self) -> Option<Rect>;

    /// Rendered width of `text` at `font_size` pixels.
    fn measure_text(&self, text: &str, font_size: f64) -> f64;

    /// Move the axis pointer to a pixel position.
    ///
    /// Returns the notifications the widget emitted in response.
    fn dispatch_pointer(&mut self, x: f64, y: f64) -> Vec<WidgetEvent>;

    /// Re-layout to the current container size.
    fn resize(&mut self);
}
