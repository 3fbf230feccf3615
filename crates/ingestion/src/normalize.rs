//! Raw row normalization.
//!
//! Turns tuple rows or keyed record rows into a date-ordered sequence of
//! finite [`Bar`]s.

use ohlcv_core::format::{canonical_date, parse_date};
use ohlcv_core::{Bar, TupleLayout};
use serde_json::Value;
use tracing::debug;

/// Shape of the rows in a payload, detected from the first row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// `[date, o, h, l, c, v]`-style arrays.
    Tuple,
    /// `{date, open, high, low, close, volume}` objects.
    Record,
}

/// Statistics about the last normalization pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizeStats {
    /// Rows seen in the payload.
    pub total_rows: usize,
    /// Rows turned into bars.
    pub kept_rows: usize,
    /// Rows discarded as malformed or non-finite.
    pub dropped_rows: usize,
}

/// Row normalizer for one tuple layout.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    layout: TupleLayout,
    stats: NormalizeStats,
}

impl Normalizer {
    /// Create a normalizer for the given tuple layout.
    pub fn new(layout: TupleLayout) -> Self {
        Self {
            layout,
            stats: NormalizeStats::default(),
        }
    }

    /// Statistics of the last call to [`Normalizer::normalize`].
    pub fn stats(&self) -> &NormalizeStats {
        &self.stats
    }

    /// Normalize a raw payload.
    ///
    /// Non-array payloads produce an empty result.
    pub fn normalize(&mut self, raw: &Value) -> Vec<Bar> {
        self.stats = NormalizeStats::default();

        let rows = match raw.as_array() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return Vec::new(),
        };
        let shape = detect_shape(&rows[0]);

        // Sort by calendar date first; unparseable dates go first, stable.
        let mut ordered: Vec<&Value> = rows.iter().collect();
        ordered.sort_by_key(|row| row_date(row, shape).as_deref().and_then(parse_date));

        let bars: Vec<Bar> = ordered
            .into_iter()
            .filter_map(|row| self.extract(row, shape))
            .filter(Bar::is_finite)
            .collect();

        self.stats.total_rows = rows.len();
        self.stats.kept_rows = bars.len();
        self.stats.dropped_rows = rows.len() - bars.len();
        debug!(
            ?shape,
            layout = ?self.layout,
            total = self.stats.total_rows,
            kept = self.stats.kept_rows,
            dropped = self.stats.dropped_rows,
            "normalized rows"
        );

        bars
    }

    fn extract(&self, row: &Value, shape: RowShape) -> Option<Bar> {
        let date = canonical_date(&row_date(row, shape)?);
        let bar = match shape {
            RowShape::Record => Bar {
                date,
                open: field_number(row.get("open")),
                high: field_number(row.get("high")),
                low: field_number(row.get("low")),
                close: field_number(row.get("close")),
                volume: field_number(row.get("volume")),
            },
            RowShape::Tuple => {
                let at = |i: usize| field_number(row.get(i));
                match self.layout {
                    TupleLayout::Canonical => Bar {
                        date,
                        open: at(1),
                        high: at(2),
                        low: at(3),
                        close: at(4),
                        volume: at(5),
                    },
                    TupleLayout::Legacy => Bar {
                        date,
                        open: at(1),
                        close: at(2),
                        low: at(3),
                        high: at(4),
                        volume: at(5),
                    },
                }
            }
        };
        Some(bar)
    }
}

/// Normalize with the canonical tuple layout.
pub fn normalize(raw: &Value) -> Vec<Bar> {
    normalize_with(raw, TupleLayout::Canonical)
}

/// Normalize with an explicit tuple layout.
pub fn normalize_with(raw: &Value, layout: TupleLayout) -> Vec<Bar> {
    Normalizer::new(layout).normalize(raw)
}

/// Detect the row shape from a sample row.
pub fn detect_shape(first: &Value) -> RowShape {
    if first.is_object() {
        RowShape::Record
    } else {
        RowShape::Tuple
    }
}

fn row_date(row: &Value, shape: RowShape) -> Option<String> {
    let raw = match shape {
        RowShape::Record => row.get("date")?,
        RowShape::Tuple => row.get(0)?,
    };
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric coercion of a JSON field. Missing or non-numeric fields give NaN.
fn field_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Null) => 0.0,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_finite_row_dropped() {
        let raw = json!([["2024-01-01", "x", 2, 1, 3, 100]]);
        assert!(normalize(&raw).is_empty());
    }

    #[test]
    fn test_record_row_normalized() {
        let raw = json!([
            {"date": "2024/01/02", "open": 10, "high": 12, "low": 9, "close": 11, "volume": 500}
        ]);
        let bars = normalize(&raw);
        assert_eq!(bars, vec![Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0)]);
    }

    #[test]
    fn test_output_sorted_by_date() {
        let raw = json!([
            ["2024-01-03", 1, 2, 0.5, 1.5, 10],
            ["2024-01-01", 1, 2, 0.5, 1.5, 10],
            ["2024-01-02", 1, 2, 0.5, 1.5, 10]
        ]);
        let dates: Vec<String> = normalize(&raw).into_iter().map(|b| b.date).collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_sort_uses_calendar_date_across_separators() {
        let raw = json!([
            {"date": "2024.02.01", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1},
            {"date": "2024/01/15", "open": 2, "high": 2, "low": 2, "close": 2, "volume": 2}
        ]);
        let dates: Vec<String> = normalize(&raw).into_iter().map(|b| b.date).collect();
        assert_eq!(dates, vec!["2024-01-15", "2024-02-01"]);
    }

    #[test]
    fn test_canonical_tuple_layout() {
        let raw = json!([["2024-01-02", 10, 12, 9, 11, 500]]);
        let bars = normalize(&raw);
        assert_eq!(bars[0], Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0));
    }

    #[test]
    fn test_legacy_tuple_layout() {
        let raw = json!([["2024/01/02", 10, 11, 9, 12, 500]]);
        let bars = normalize_with(&raw, TupleLayout::Legacy);
        assert_eq!(bars[0], Bar::new("2024-01-02", 10.0, 12.0, 9.0, 11.0, 500.0));
    }

    #[test]
    fn test_numeric_strings_accepted() {
        let raw = json!([["2024-01-02", "10.5", " 12 ", "9", "11", "500"]]);
        let bars = normalize(&raw);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, 10.5);
        assert_eq!(bars[0].high, 12.0);
    }

    #[test]
    fn test_short_tuple_dropped() {
        let raw = json!([["2024-01-02", 10, 12, 9, 11], ["2024-01-03", 10, 12, 9, 11, 1]]);
        let mut normalizer = Normalizer::new(TupleLayout::Canonical);
        let bars = normalizer.normalize(&raw);
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].date, "2024-01-03");
        assert_eq!(
            normalizer.stats(),
            &NormalizeStats {
                total_rows: 2,
                kept_rows: 1,
                dropped_rows: 1
            }
        );
    }

    #[test]
    fn test_duplicate_dates_kept() {
        let raw = json!([
            ["2024-01-02", 1, 1, 1, 1, 1],
            ["2024-01-02", 2, 2, 2, 2, 2]
        ]);
        let bars = normalize(&raw);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].open, 1.0);
        assert_eq!(bars[1].open, 2.0);
    }

    #[test]
    fn test_mismatched_rows_dropped() {
        // Shape comes from the first row; tuple rows in a record payload are dropped.
        let raw = json!([
            {"date": "2024-01-02", "open": 1, "high": 1, "low": 1, "close": 1, "volume": 1},
            ["2024-01-03", 1, 1, 1, 1, 1]
        ]);
        assert_eq!(normalize(&raw).len(), 1);
    }

    #[test]
    fn test_empty_and_non_array_input() {
        assert!(normalize(&json!([])).is_empty());
        assert!(normalize(&json!({"rows": []})).is_empty());
        assert!(normalize(&json!("nope")).is_empty());
        assert!(normalize(&Value::Null).is_empty());
    }

    #[test]
    fn test_missing_record_field_dropped() {
        let raw = json!([{"date": "2024-01-02", "open": 1, "high": 1, "low": 1, "close": 1}]);
        assert!(normalize(&raw).is_empty());
    }
}
