//! In-process chart widget without a renderer.
//!
//! Keeps the merged option document and maps values to pixels linearly over a
//! fixed grid rectangle. Synthetic pointer dispatches echo back a pointer-move
//! notification, like a real widget does.

use crate::widget::{AxisExtent, AxisRef, ChartWidget, OptionMode, Rect, WidgetEvent};
use ohlcv_core::AxisEvent;
use ordered_float::OrderedFloat;
use serde_json::{Map, Value};

/// Top-level and nested keys whose arrays hold mergeable components.
const COMPONENT_KEYS: &[&str] = &["grid", "xAxis", "yAxis", "series", "graphic", "children"];

/// Headless chart widget.
#[derive(Debug, Clone)]
pub struct HeadlessWidget {
    option: Value,
    grid: Rect,
    echoes_per_dispatch: usize,
    dispatched: Vec<(f64, f64)>,
    resize_count: usize,
}

impl HeadlessWidget {
    /// Create a widget whose grid 0 occupies `grid`.
    pub fn new(grid: Rect) -> Self {
        Self {
            option: Value::Object(Map::new()),
            grid,
            echoes_per_dispatch: 1,
            dispatched: Vec::new(),
            resize_count: 0,
        }
    }

    /// Number of pointer-move echoes emitted per dispatch.
    pub fn with_echoes(mut self, echoes: usize) -> Self {
        self.echoes_per_dispatch = echoes;
        self
    }

    /// Current merged option document.
    pub fn option(&self) -> &Value {
        &self.option
    }

    /// Pixel positions of every synthetic pointer dispatch so far.
    pub fn dispatched(&self) -> &[(f64, f64)] {
        &self.dispatched
    }

    /// Number of resizes performed.
    pub fn resize_count(&self) -> usize {
        self.resize_count
    }

    /// Number of categories on x-axis 0.
    pub fn category_count(&self) -> usize {
        self.option["xAxis"][0]["data"]
            .as_array()
            .map_or(0, Vec::len)
    }

    /// Value extent of the first series, padded when flat.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let series = &self.option["series"][0];
        let mut values = Vec::new();
        for item in series["data"].as_array()? {
            collect_numbers(item, &mut values);
        }
        let lo = values.iter().copied().map(OrderedFloat).min()?.0;
        let hi = values.iter().copied().map(OrderedFloat).max()?.0;
        let lo = if series["type"] == "bar" { lo.min(0.0) } else { lo };
        if hi > lo {
            Some((lo, hi))
        } else {
            Some((lo - 1.0, hi + 1.0))
        }
    }

    fn band(&self) -> Option<f64> {
        match self.category_count() {
            0 => None,
            n => Some(self.grid.width / n as f64),
        }
    }
}

impl ChartWidget for HeadlessWidget {
    fn set_option(&mut self, option: &Value, mode: OptionMode) {
        match mode {
            OptionMode::Replace => self.option = option.clone(),
            OptionMode::Merge => merge_option(&mut self.option, option),
        }
    }

    fn convert_to_pixel(&self, axis: AxisRef, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        match axis {
            AxisRef::X => Some(self.grid.x + self.band()? * (value + 0.5)),
            AxisRef::Y => {
                let (lo, hi) = self.value_extent()?;
                Some(self.grid.y + self.grid.height * (1.0 - (value - lo) / (hi - lo)))
            }
        }
    }

    fn x_axis_extent(&self) -> Option<AxisExtent> {
        let n = self.category_count();
        if n == 0 {
            return None;
        }
        Some(AxisExtent {
            pixel: (self.grid.x, self.grid.x + self.grid.width),
            index: (0.0, (n - 1) as f64),
        })
    }

    fn grid_rect(&self) -> Option<Rect> {
        Some(self.grid)
    }

    fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * 0.6
    }

    fn dispatch_pointer(&mut self, x: f64, y: f64) -> Vec<WidgetEvent> {
        self.dispatched.push((x, y));

        let (Some(band), Some((lo, hi))) = (self.band(), self.value_extent()) else {
            return Vec::new();
        };
        let last = (self.category_count() - 1) as f64;
        let index = ((x - self.grid.x) / band).floor().clamp(0.0, last);
        let value = lo + (hi - lo) * (1.0 - (y - self.grid.y) / self.grid.height);

        let echo = WidgetEvent::PointerMove(AxisEvent::at_index(index).with_y(0, value));
        vec![echo; self.echoes_per_dispatch]
    }

    fn resize(&mut self) {
        self.resize_count += 1;
    }
}

fn collect_numbers(item: &Value, out: &mut Vec<f64>) {
    match item {
        Value::Number(n) => out.extend(n.as_f64().filter(|v| v.is_finite())),
        Value::Array(items) => items.iter().for_each(|v| collect_numbers(v, out)),
        Value::Object(obj) => {
            if let Some(v) = obj.get("value") {
                collect_numbers(v, out);
            }
        }
        _ => {}
    }
}

/// Merge `patch` into `target` with component-array semantics.
///
/// Objects merge recursively. Arrays under component keys merge element-wise
/// by `id`, then `name`, then position; all other values are replaced.
pub fn merge_option(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(t), Value::Object(p)) => {
            for (key, value) in p {
                let is_component = COMPONENT_KEYS.contains(&key.as_str());
                match t.get_mut(key) {
                    Some(existing) if is_component => merge_components(existing, value),
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_option(existing, value)
                    }
                    Some(existing) => *existing = value.clone(),
                    None => {
                        t.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (t, p) => *t = p.clone(),
    }
}

fn merge_components(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Array(existing), Value::Array(updates)) => {
            for (pos, update) in updates.iter().enumerate() {
                let slot = match (update.get("id"), update.get("name")) {
                    (Some(id), _) => existing.iter().position(|c| c.get("id") == Some(id)),
                    (None, Some(name)) => {
                        existing.iter().position(|c| c.get("name") == Some(name))
                    }
                    (None, None) => (pos < existing.len()).then_some(pos),
                };
                match slot {
                    Some(i) => merge_option(&mut existing[i], update),
                    None => existing.push(update.clone()),
                }
            }
        }
        // A single component object patches the first element.
        (Value::Array(existing), Value::Object(_)) => match existing.first_mut() {
            Some(first) => merge_option(first, patch),
            None => existing.push(patch.clone()),
        },
        (target, patch) => merge_option(target, patch),
    }
}
