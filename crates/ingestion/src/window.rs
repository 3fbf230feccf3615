//! Proportional window slicing for zoom and scroll.

use ohlcv_core::{Bar, Window};

/// Inclusive index range `(s, e)` selected by a window over `len` items.
///
/// `s = floor(start * (len - 1))`, `e = max(s + 1, floor(end * (len - 1)))`,
/// both clipped to the sequence. Returns `None` for an empty sequence.
pub fn index_range(len: usize, window: Window) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let last_idx = len - 1;
    let last = last_idx as f64;

    let s = floor_index(window.start * last).min(last_idx);
    let e = (s + 1).max(floor_index(window.end * last)).min(last_idx);
    Some((s, e))
}

/// Contiguous bars selected by a window. Never empty when `bars` is not.
pub fn slice(bars: &[Bar], window: Window) -> &[Bar] {
    if bars.len() <= 1 {
        return bars;
    }
    match index_range(bars.len(), window) {
        Some((s, e)) => &bars[s..=e],
        None => bars,
    }
}

// Saturating: NaN and negatives map to 0.
fn floor_index(x: f64) -> usize {
    x.floor().max(0.0) as usize
}
