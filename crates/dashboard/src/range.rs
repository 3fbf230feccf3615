//! Header badges describing the visible range.

use ohlcv_core::format::{fmt_month_day, MISSING};
use ohlcv_core::Window;
use ohlcv_ingestion::index_range;

/// Bar interval shown next to the range badge.
pub const INTERVAL_LABEL: &str = "1 Day";

/// `"<N> Days (MM/DD–MM/DD)"`, singular for one bar, for the dates visible in `window`.
pub fn range_badge<S: AsRef<str>>(dates: &[S], window: Window) -> String {
    let Some((start, end)) = index_range(dates.len(), window) else {
        return MISSING.to_string();
    };
    let days = end - start + 1;
    let unit = if days == 1 { "Day" } else { "Days" };
    format!(
        "{days} {unit} ({}–{})",
        fmt_month_day(dates[start].as_ref()),
        fmt_month_day(dates[end].as_ref())
    )
}
