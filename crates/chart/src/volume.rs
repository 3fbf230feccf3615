//! Volume pane option and date axis labels.

use crate::style;
use ohlcv_core::config::ThemeConfig;
use ohlcv_core::format::fmt_date_short;
use ohlcv_core::{Bar, Config};
use serde_json::{json, Value};

/// Series id of the volume series.
pub const SERIES_ID: &str = "volume";

/// Full volume pane option.
pub fn build_option(bars: &[Bar], config: &Config) -> Value {
    let theme = &config.theme;
    let layout = &config.layout;

    let x_label = json!({
        "show": true,
        "color": theme.category_label,
        "interval": layout.date_label_every.saturating_sub(1)
    });

    json!({
        "animation": false,
        "backgroundColor": "transparent",
        "grid": [{
            "left": layout.grid_left,
            "right": layout.grid_right,
            "top": layout.volume_top,
            "height": layout.volume_height,
            "containLabel": true
        }],
        "xAxis": [style::category_axis(theme, dates(bars), x_label)],
        "yAxis": [{
            "scale": true,
            "minInterval": 100_000_000,
            "splitNumber": 4,
            "axisLabel": style::value_axis_label(theme),
            "axisPointer": style::value_axis_pointer(theme),
            "splitLine": style::split_line(theme)
        }],
        "tooltip": {"show": false},
        "series": [{
            "id": SERIES_ID,
            "name": "Volume",
            "type": "bar",
            "data": items(bars, 0, bars.len(), theme),
            "barWidth": "60%",
            "itemStyle": {"opacity": 0.85},
            "markLine": style::reference_line(None, 0.6)
        }]
    })
}

/// Categories and bars for the visible slice `bars[start..=end]`.
///
/// Colours compare against the previous bar of the full sequence, so the
/// first visible bar keeps its colour when the window moves.
pub fn window_patch(bars: &[Bar], start: usize, end: usize, theme: &ThemeConfig) -> Value {
    let end = (end + 1).min(bars.len());
    let start = start.min(end);
    json!({
        "xAxis": [{"data": dates(&bars[start..end])}],
        "series": [{"id": SERIES_ID, "data": items(bars, start, end, theme)}]
    })
}

/// Whether bar `i` closed at or above the previous close.
pub fn is_up(bars: &[Bar], i: usize) -> bool {
    let prev_close = if i > 0 { bars[i - 1].close } else { bars[i].close };
    bars[i].close >= prev_close
}

/// Label for category `index`, shown on every `every`-th date as `DD Mon`.
pub fn date_axis_label(index: usize, date: &str, every: usize) -> Option<String> {
    (every > 0 && index % every == 0).then(|| fmt_date_short(date))
}

/// Rendered x-axis labels for `bars`; hidden categories get an empty string.
pub fn axis_labels(bars: &[Bar], every: usize) -> Vec<String> {
    bars.iter()
        .enumerate()
        .map(|(i, b)| date_axis_label(i, &b.date, every).unwrap_or_default())
        .collect()
}

fn dates(bars: &[Bar]) -> Vec<&str> {
    bars.iter().map(|b| b.date.as_str()).collect()
}

fn items(bars: &[Bar], start: usize, end: usize, theme: &ThemeConfig) -> Vec<Value> {
    (start..end)
        .map(|i| {
            let color = if is_up(bars, i) { &theme.up } else { &theme.down };
            json!({"value": bars[i].volume, "itemStyle": {"color": color}})
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Bar> {
        vec![
            Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0),
            Bar::new("2024-01-03", 11.0, 13.0, 10.0, 10.5, 700.0),
            Bar::new("2024-01-04", 10.5, 12.0, 10.0, 11.5, 900.0),
        ]
    }

    #[test]
    fn test_build_option_colours() {
        let config = Config::default();
        let option = build_option(&sample(), &config);
        let data = &option["series"][0]["data"];
        assert_eq!(data[0]["itemStyle"]["color"], config.theme.up);
        assert_eq!(data[1]["itemStyle"]["color"], config.theme.down);
        assert_eq!(data[2]["itemStyle"]["color"], config.theme.up);
        assert_eq!(data[1]["value"], 700.0);
        assert_eq!(option["xAxis"][0]["axisLabel"]["interval"], 6);
        assert_eq!(option["series"][0]["name"], "Volume");
    }

    #[test]
    fn test_window_patch_keeps_colour_context() {
        let theme = ThemeConfig::default();
        let patch = window_patch(&sample(), 1, 2, &theme);
        assert_eq!(patch["xAxis"][0]["data"], json!(["2024-01-03", "2024-01-04"]));
        // 2024-01-03 closed below the hidden 2024-01-02 close.
        assert_eq!(patch["series"][0]["data"][0]["itemStyle"]["color"], theme.down);
    }

    #[test]
    fn test_date_axis_label() {
        assert_eq!(date_axis_label(0, "2025-08-18", 7), Some("18 Aug".to_string()));
        assert_eq!(date_axis_label(3, "2025-08-21", 7), None);
        assert_eq!(date_axis_label(14, "2025-09-01", 7), Some("01 Sep".to_string()));
    }

    #[test]
    fn test_axis_labels() {
        let labels = axis_labels(&sample(), 2);
        assert_eq!(labels, vec!["02 Jan", "", "04 Jan"]);
    }
}
