//! Floating value badge attached to a chart's y-axis.

use crate::widget::Rect;
use ohlcv_core::config::ThemeConfig;
use serde_json::{json, Value};

/// Badge appearance and placement rules.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeStyle {
    /// Box height.
    pub height: f64,
    /// Horizontal text padding.
    pub pad_x: f64,
    /// Minimum box width.
    pub min_width: f64,
    /// Box fill.
    pub background: String,
    /// Border and arrow colour.
    pub border: String,
    /// Text colour.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family.
    pub font_family: String,
    /// Gap between the badge and the plot area when placed outside.
    pub gap_to_grid: f64,
    /// Sit just inside the plot area instead of left of it.
    pub stick_inside: bool,
}

impl BadgeStyle {
    /// Badge style from the theme colours.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            background: theme.badge_background.clone(),
            border: theme.badge_border.clone(),
            text: theme.badge_text.clone(),
            font_size: theme.badge_font_size,
            font_family: theme.font_family.clone(),
            ..Self::default()
        }
    }

    fn font(&self) -> String {
        format!("500 {}px {}", self.font_size, self.font_family)
    }
}

impl Default for BadgeStyle {
    fn default() -> Self {
        let theme = ThemeConfig::default();
        Self {
            height: 24.0,
            pad_x: 8.0,
            min_width: 40.0,
            background: theme.badge_background,
            border: theme.badge_border,
            text: theme.badge_text,
            font_size: theme.badge_font_size,
            font_family: theme.font_family,
            gap_to_grid: 6.0,
            stick_inside: false,
        }
    }
}

/// Computed badge geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLayout {
    /// Label text.
    pub text: String,
    /// Left edge in chart pixels.
    pub left: f64,
    /// Top edge in chart pixels.
    pub top: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Arrow triangle, relative to the box origin.
    pub arrow: [(f64, f64); 3],
}

/// Place a badge for `text` centred vertically on `y_px`.
pub fn place(style: &BadgeStyle, text: String, text_width: f64, grid: &Rect, y_px: f64) -> BadgeLayout {
    let h = style.height;
    let width = style.min_width.max(style.pad_x + text_width.ceil() + style.pad_x);

    let left = if style.stick_inside {
        grid.x + 2.0
    } else {
        grid.x - width - style.gap_to_grid
    };

    // Arrow points at the plot: left when inside, right when outside.
    let arrow = if style.stick_inside {
        [(0.0, h / 2.0), (-12.0, h / 2.0 - 6.0), (-12.0, h / 2.0 + 6.0)]
    } else {
        [(width, h / 2.0), (width + 12.0, h / 2.0 - 6.0), (width + 12.0, h / 2.0 + 6.0)]
    };

    BadgeLayout {
        text,
        left,
        top: y_px - h / 2.0,
        width,
        height: h,
        arrow,
    }
}

/// Graphic-component badge bound to one chart.
#[derive(Debug, Clone)]
pub struct YAxisBadge {
    id: String,
    style: BadgeStyle,
}

impl YAxisBadge {
    pub fn new(id: impl Into<String>, style: BadgeStyle) -> Self {
        Self {
            id: id.into(),
            style,
        }
    }

    pub fn style(&self) -> &BadgeStyle {
        &self.style
    }

    /// Hidden graphic group to install once at init.
    pub fn init_graphic(&self) -> Value {
        let s = &self.style;
        json!({
            "graphic": [{
                "id": self.id,
                "type": "group",
                "z": 1000,
                "left": 0,
                "top": 0,
                "invisible": true,
                "children": [
                    {
                        "id": self.child_id("rect"),
                        "type": "rect",
                        "shape": {"x": 0, "y": 0, "width": 64, "height": s.height, "r": 4},
                        "style": {"fill": s.background, "stroke": s.border, "lineWidth": 1}
                    },
                    {
                        "id": self.child_id("text"),
                        "type": "text",
                        "style": {
                            "x": s.pad_x,
                            "y": s.height / 2.0,
                            "text": "0.00",
                            "fill": s.text,
                            "font": s.font(),
                            "textVerticalAlign": "middle"
                        }
                    },
                    {
                        "id": self.child_id("tri"),
                        "type": "polygon",
                        "shape": {"points": []},
                        "style": {"fill": s.border}
                    }
                ]
            }]
        })
    }

    /// Patch that shows the badge at a computed layout.
    pub fn show_patch(&self, layout: &BadgeLayout) -> Value {
        let points: Vec<[f64; 2]> = layout.arrow.iter().map(|&(x, y)| [x, y]).collect();
        json!({
            "graphic": [{
                "id": self.id,
                "invisible": false,
                "left": layout.left,
                "top": layout.top,
                "children": [
                    {"id": self.child_id("rect"), "shape": {"width": layout.width, "height": layout.height}},
                    {"id": self.child_id("text"), "style": {"x": self.style.pad_x, "y": layout.height / 2.0, "text": layout.text}},
                    {"id": self.child_id("tri"), "shape": {"points": points}}
                ]
            }]
        })
    }

    /// Patch that hides the badge.
    pub fn hide_patch(&self) -> Value {
        json!({"graphic": [{"id": self.id, "invisible": true}]})
    }

    fn child_id(&self, part: &str) -> String {
        format!("{}-{part}", self.id)
    }
}
