//! Candlestick pane option and tooltip.

use crate::style;
use ohlcv_core::format::{f3, fmt_tooltip_date, fmt_unit};
use ohlcv_core::{Bar, Config};
use serde::Serialize;
use serde_json::{json, Value};

/// Series id of the candlestick series.
pub const SERIES_ID: &str = "price";

/// Full price pane option.
pub fn build_option(bars: &[Bar], config: &Config) -> Value {
    let theme = &config.theme;
    let layout = &config.layout;

    let mut y_label = style::value_axis_label(theme);
    y_label["letterSpacing"] = json!(0.24);

    json!({
        "animation": false,
        "backgroundColor": "transparent",
        "grid": [{
            "left": layout.grid_left,
            "right": layout.grid_right,
            "top": layout.price_top,
            "height": layout.price_height,
            "containLabel": true
        }],
        "xAxis": [style::category_axis(theme, dates(bars), json!({"show": false}))],
        "yAxis": [{
            "minInterval": 0.05,
            "splitNumber": 5,
            "axisLabel": y_label,
            "axisPointer": style::value_axis_pointer(theme),
            "splitLine": style::split_line(theme)
        }],
        "tooltip": {
            "trigger": "axis",
            "confine": true,
            "axisPointer": {"type": "none"},
            "backgroundColor": "rgba(46,46,52,0.92)",
            "borderWidth": 0,
            "padding": 0,
            "extraCssText": "border-radius:12px; overflow:hidden;"
        },
        "series": [{
            "id": SERIES_ID,
            "name": "Price",
            "type": "candlestick",
            "data": candles(bars),
            "barMinWidth": 3,
            "barMaxWidth": 16,
            "itemStyle": {
                "color": theme.up,
                "borderColor": theme.up,
                "color0": theme.down,
                "borderColor0": theme.down
            },
            "z": 3,
            "markLine": style::reference_line(Some(&theme.marker_line), 0.95)
        }]
    })
}

/// Categories and candles for a visible slice.
pub fn window_patch(bars: &[Bar]) -> Value {
    json!({
        "xAxis": [{"data": dates(bars)}],
        "series": [{"id": SERIES_ID, "data": candles(bars)}]
    })
}

fn dates(bars: &[Bar]) -> Vec<&str> {
    bars.iter().map(|b| b.date.as_str()).collect()
}

fn candles(bars: &[Bar]) -> Vec<[f64; 4]> {
    bars.iter().map(Bar::candle_values).collect()
}

/// One labelled tooltip line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub label: &'static str,
    pub value: String,
    /// Rendered bold.
    pub emphasis: bool,
}

/// Tooltip content for a hovered bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    /// Date with `/` separators.
    pub date: String,
    /// Session open time shown next to the date.
    pub time: &'static str,
    pub rows: Vec<TooltipRow>,
}

/// Tooltip for a bar. HIGH and LOW are taken over all four prices.
pub fn tooltip(bar: &Bar) -> TooltipContent {
    let row = |label, value, emphasis| TooltipRow {
        label,
        value,
        emphasis,
    };
    TooltipContent {
        date: fmt_tooltip_date(&bar.date),
        time: "09:00",
        rows: vec![
            row("OPEN", f3(bar.open), false),
            row("HIGH", f3(bar.price_max()), false),
            row("LOW", f3(bar.price_min()), false),
            row("CLOSE", f3(bar.close), false),
            row("VOLUME", fmt_unit(bar.volume), true),
        ],
    }
}
