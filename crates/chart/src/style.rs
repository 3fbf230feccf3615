//! Option fragments shared by the price and volume panes.

use ohlcv_core::config::ThemeConfig;
use serde_json::{json, Value};

/// Category axis line and hover band pointer.
pub(crate) fn category_axis(theme: &ThemeConfig, dates: Vec<&str>, axis_label: Value) -> Value {
    json!({
        "type": "category",
        "data": dates,
        "boundaryGap": true,
        "min": "dataMin",
        "max": "dataMax",
        "axisLine": {"lineStyle": {"color": theme.axis_line}},
        "axisTick": {"show": false},
        "axisLabel": axis_label,
        "axisPointer": {
            "show": true,
            "type": "shadow",
            "label": {"show": false},
            "lineStyle": {"color": theme.hover_band, "width": 10, "opacity": 0.6},
            "shadowStyle": {"color": theme.hover_band}
        },
        "splitLine": {"show": false}
    })
}

/// Value axis label style.
pub(crate) fn value_axis_label(theme: &ThemeConfig) -> Value {
    json!({
        "color": theme.axis_label,
        "fontFamily": theme.font_family,
        "fontSize": 12,
        "fontWeight": 400,
        "align": "right"
    })
}

/// Value axis pointer: no line, boxed label.
pub(crate) fn value_axis_pointer(theme: &ThemeConfig) -> Value {
    json!({
        "show": true,
        "lineStyle": {"opacity": 0},
        "label": {
            "show": true,
            "padding": [2, 8],
            "color": theme.badge_text,
            "backgroundColor": theme.badge_background,
            "borderColor": theme.badge_border,
            "borderWidth": 1,
            "borderRadius": 4,
            "margin": 6
        }
    })
}

/// Dashed split lines.
pub(crate) fn split_line(theme: &ThemeConfig) -> Value {
    json!({"lineStyle": {"color": theme.split_line, "type": "dashed"}})
}

/// Empty horizontal reference line.
pub(crate) fn reference_line(color: Option<&str>, opacity: f64) -> Value {
    let mut line_style = json!({"type": "dashed", "width": 1, "opacity": opacity});
    if let Some(color) = color {
        line_style["color"] = json!(color);
    }
    json!({
        "symbol": "none",
        "silent": true,
        "animation": false,
        "lineStyle": line_style,
        "label": {"show": false},
        "emphasis": {"label": {"show": false}},
        "data": []
    })
}
