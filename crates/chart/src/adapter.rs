//! Chart adapters: one per pane, each owning a widget instance.

use crate::badge::{place, BadgeStyle, YAxisBadge};
use crate::widget::{AxisRef, ChartWidget, OptionMode, WidgetEvent};
use crate::{price, volume};
use ohlcv_core::config::{HoverConfig, ThemeConfig};
use ohlcv_core::format::{f3, fmt_volume_axis};
use ohlcv_core::{Bar, Config, HoverState, Pane, Window};
use ohlcv_ingestion::{index_range, slice};
use serde_json::{json, Value};
use tracing::debug;

/// Binds pane options and hover indicators to one chart widget.
pub struct ChartAdapter<W: ChartWidget> {
    pane: Pane,
    widget: W,
    badge: YAxisBadge,
    theme: ThemeConfig,
    hover: HoverConfig,
    /// Absolute index of the first visible category.
    offset: usize,
}

impl<W: ChartWidget> ChartAdapter<W> {
    /// Build the full pane option and bind it to the widget.
    pub fn init(pane: Pane, mut widget: W, bars: &[Bar], config: &Config) -> Self {
        let option = match pane {
            Pane::Price => price::build_option(bars, config),
            Pane::Volume => volume::build_option(bars, config),
        };
        widget.set_option(&option, OptionMode::Replace);

        let badge = YAxisBadge::new(
            format!("ybadge-{}", series_id(pane)),
            BadgeStyle::from_theme(&config.theme),
        );
        widget.set_option(&badge.init_graphic(), OptionMode::Merge);
        debug!(?pane, bars = bars.len(), "chart initialised");

        Self {
            pane,
            widget,
            badge,
            theme: config.theme.clone(),
            hover: config.hover.clone(),
            offset: 0,
        }
    }

    /// Price pane adapter.
    pub fn price(widget: W, bars: &[Bar], config: &Config) -> Self {
        Self::init(Pane::Price, widget, bars, config)
    }

    /// Volume pane adapter.
    pub fn volume(widget: W, bars: &[Bar], config: &Config) -> Self {
        Self::init(Pane::Volume, widget, bars, config)
    }

    pub fn pane(&self) -> Pane {
        self.pane
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Absolute index of the first visible category.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Show only the windowed slice of `bars`. Axes and styling are kept.
    pub fn update_window(&mut self, bars: &[Bar], window: Window) {
        let (start, end) = index_range(bars.len(), window).unwrap_or((0, 0));
        let patch = match self.pane {
            Pane::Price => price::window_patch(slice(bars, window)),
            Pane::Volume => volume::window_patch(bars, start, end, &self.theme),
        };
        self.widget.set_option(&patch, OptionMode::Merge);
        self.offset = start;
        debug!(pane = ?self.pane, start, end, "window applied");
    }

    /// Re-layout after a container size change.
    pub fn resize(&mut self) {
        self.widget.resize();
    }

    /// Draw the horizontal reference line at `value`, or clear it.
    pub fn set_reference_line(&mut self, value: Option<f64>) {
        let data = match value.filter(|v| v.is_finite()) {
            Some(v) => json!([{ "yAxis": v }]),
            None => json!([]),
        };
        let patch = json!({
            "series": [{"id": series_id(self.pane), "markLine": {"data": data}}]
        });
        self.widget.set_option(&patch, OptionMode::Merge);
    }

    /// Reflect the shared hover state on this pane's reference line.
    pub fn apply_hover(&mut self, state: &HoverState) {
        self.set_reference_line(state.value_for(self.pane));
    }

    /// Pixel position of an absolute bar index and a value on this pane.
    ///
    /// `None` when the bar is scrolled out of view or the widget has no layout.
    pub fn pointer_position(&self, index: usize, value: f64) -> Option<(f64, f64)> {
        let local = index.checked_sub(self.offset)?;
        let x = self.widget.convert_to_pixel(AxisRef::X, local as f64)?;
        let y = self.widget.convert_to_pixel(AxisRef::Y, value)?;
        Some((x, y))
    }

    /// Push a synthetic pointer update; returns the widget's echoed notifications.
    pub fn dispatch_pointer(&mut self, x: f64, y: f64) -> Vec<WidgetEvent> {
        self.widget.dispatch_pointer(x, y)
    }

    /// Pixel width of one bar, clamped to the configured band limits.
    pub fn bar_width_px(&self) -> Option<f64> {
        let width = self.widget.x_axis_extent()?.band_width();
        Some(
            width
                .max(self.hover.min_bar_width_px)
                .min(self.hover.max_bar_width_px),
        )
    }

    /// Match the hover band thickness to the current bar width.
    pub fn sync_bar_width(&mut self) -> Option<f64> {
        let width = self.bar_width_px()?;
        let patch = json!({"xAxis": [{"axisPointer": {"lineStyle": {"width": width}}}]});
        self.widget.set_option(&patch, OptionMode::Merge);
        Some(width)
    }

    /// Label text for a value on this pane's y-axis.
    pub fn format_value(&self, value: f64) -> String {
        match self.pane {
            Pane::Price => f3(value),
            Pane::Volume => fmt_volume_axis(value),
        }
    }

    /// Place the y-axis badge at `value`, or hide it. Returns whether it is shown.
    pub fn show_badge(&mut self, value: Option<f64>) -> bool {
        let patch = match value.filter(|v| v.is_finite()).and_then(|v| self.badge_patch(v)) {
            Some(patch) => patch,
            None => {
                self.hide_badge();
                return false;
            }
        };
        self.widget.set_option(&patch, OptionMode::Merge);
        true
    }

    pub fn hide_badge(&mut self) {
        let patch = self.badge.hide_patch();
        self.widget.set_option(&patch, OptionMode::Merge);
    }

    fn badge_patch(&self, value: f64) -> Option<Value> {
        let grid = self.widget.grid_rect()?;
        let y_px = self.widget.convert_to_pixel(AxisRef::Y, value)?;
        let text = self.format_value(value);
        let text_width = self
            .widget
            .measure_text(&text, self.badge.style().font_size);
        let layout = place(self.badge.style(), text, text_width, &grid, y_px);
        Some(self.badge.show_patch(&layout))
    }
}

/// Series id used for patches on a pane.
pub fn series_id(pane: Pane) -> &'static str {
    match pane {
        Pane::Price => price::SERIES_ID,
        Pane::Volume => volume::SERIES_ID,
    }
}
