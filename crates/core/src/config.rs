//! Configuration structures for the OHLCV chart panes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub data: DataConfig,
    /// Pane layout configuration.
    pub layout: LayoutConfig,
    /// Colour configuration.
    pub theme: ThemeConfig,
    /// Hover indicator configuration.
    pub hover: HoverConfig,
    /// Resize handling configuration.
    pub resize: ResizeConfig,
}

impl Config {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject inconsistent values.
    pub fn validate(&self) -> Result<()> {
        if self.data.datasets.is_empty() {
            return Err(Error::config("at least one dataset must be configured"));
        }
        if self.data.dataset(&self.data.default_asset).is_none() {
            return Err(Error::config(format!(
                "default asset '{}' is not in the dataset table",
                self.data.default_asset
            )));
        }
        if !(self.hover.min_bar_width_px > 0.0
            && self.hover.min_bar_width_px <= self.hover.max_bar_width_px)
        {
            return Err(Error::config(format!(
                "invalid bar width clamp [{}, {}]",
                self.hover.min_bar_width_px, self.hover.max_bar_width_px
            )));
        }
        if self.layout.price_height <= 0.0 || self.layout.volume_height <= 0.0 {
            return Err(Error::config("pane heights must be positive"));
        }
        if self.layout.date_label_every == 0 {
            return Err(Error::config("date_label_every must be at least 1"));
        }
        Ok(())
    }
}

/// Field order of tuple rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TupleLayout {
    /// `[date, open, high, low, close, volume]`.
    #[default]
    Canonical,
    /// `[date, open, close, low, high, volume]`.
    Legacy,
}

/// One selectable dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// Asset key used by the selector.
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// File name under the data directory.
    pub file: String,
}

impl DatasetEntry {
    fn new(key: &str, label: &str, file: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            file: file.to_string(),
        }
    }
}

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Directory (or URL prefix) holding the dataset files.
    pub data_dir: String,
    /// Asset used when a key is unknown.
    pub default_asset: String,
    /// Selectable datasets in display order.
    pub datasets: Vec<DatasetEntry>,
    /// Field order of tuple rows.
    pub tuple_layout: TupleLayout,
}

impl DataConfig {
    /// Look up a dataset by key.
    pub fn dataset(&self, key: &str) -> Option<&DatasetEntry> {
        self.datasets.iter().find(|d| d.key == key)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            default_asset: "mantra".to_string(),
            datasets: vec![
                DatasetEntry::new("mantra", "Mantra", "mantra_60days.json"),
                DatasetEntry::new("stock-a", "Stock A", "stock_a_60days.json"),
                DatasetEntry::new("stock-b", "Stock B", "stock_b_60days.json"),
                DatasetEntry::new("stock-c", "Stock C", "stock_c_60days.json"),
            ],
            tuple_layout: TupleLayout::Canonical,
        }
    }
}

/// Pane geometry in pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Price grid top offset.
    pub price_top: f64,
    /// Price grid height.
    pub price_height: f64,
    /// Volume grid top offset.
    pub volume_top: f64,
    /// Volume grid height.
    pub volume_height: f64,
    /// Grid left margin (CSS length or percentage).
    pub grid_left: String,
    /// Grid right margin (CSS length or percentage).
    pub grid_right: String,
    /// Show every n-th date label on the volume x-axis.
    pub date_label_every: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            price_top: 12.0,
            price_height: 470.0,
            volume_top: 16.0,
            volume_height: 120.0,
            grid_left: "6%".to_string(),
            grid_right: "5%".to_string(),
            date_label_every: 7,
        }
    }
}

/// Colours and fonts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Rising candle / volume colour.
    pub up: String,
    /// Falling candle / volume colour.
    pub down: String,
    /// Vertical hover band colour.
    pub hover_band: String,
    /// Axis line colour.
    pub axis_line: String,
    /// Value axis label colour.
    pub axis_label: String,
    /// Category axis label colour.
    pub category_label: String,
    /// Split line colour.
    pub split_line: String,
    /// Reference line colour.
    pub marker_line: String,
    /// Badge fill.
    pub badge_background: String,
    /// Badge border and arrow.
    pub badge_border: String,
    /// Badge text.
    pub badge_text: String,
    /// Font family for labels.
    pub font_family: String,
    /// Badge font size in pixels.
    pub badge_font_size: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            up: "#0FA76C".to_string(),
            down: "#C93C50".to_string(),
            hover_band: "rgba(55,60,66,0.30)".to_string(),
            axis_line: "#2b323a".to_string(),
            axis_label: "#6C7989".to_string(),
            category_label: "#7f8ea1".to_string(),
            split_line: "#1e242b".to_string(),
            marker_line: "#3A3F46".to_string(),
            badge_background: "rgba(34,39,47,0.10)".to_string(),
            badge_border: "#6D89AB".to_string(),
            badge_text: "#E4E6ED".to_string(),
            font_family: "Poppins, sans-serif".to_string(),
            badge_font_size: 14.0,
        }
    }
}

/// Hover indicator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverConfig {
    /// Minimum hover band width.
    pub min_bar_width_px: f64,
    /// Maximum hover band width.
    pub max_bar_width_px: f64,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            min_bar_width_px: 6.0,
            max_bar_width_px: 20.0,
        }
    }
}

/// Resize handling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Quiet period before a resize burst is applied (ms).
    pub debounce_ms: u64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self { debounce_ms: 120 }
    }
}
