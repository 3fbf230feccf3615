//! Display formatting for axis labels, badges and tooltips.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Placeholder shown for values that cannot be formatted.
pub const MISSING: &str = "—";

/// Rewrite `.` and `/` date separators to `-`.
pub fn canonical_date(raw: &str) -> String {
    raw.replace(['.', '/'], "-")
}

/// Parse a calendar date in `YYYY-MM-DD`, `YYYY/MM/DD` or `YYYY.MM.DD` form.
///
/// A trailing time component (`2024-01-02T09:00:00`, `2024-01-02 09:00`) is ignored.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let normalized = canonical_date(raw.trim());
    let day_part = normalized
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").ok()
}

/// Fixed three decimals.
pub fn f3(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.3}")
    } else {
        MISSING.to_string()
    }
}

/// Compact unit suffix: `1.2B`, `35M`, `12K`.
pub fn fmt_unit(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else if value >= 1e3 {
        format!("{:.0}K", value / 1e3)
    } else {
        format!("{value}")
    }
}

/// Volume axis tick label: `B`/`M` suffixes, otherwise whole numbers.
pub fn fmt_volume_axis(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.0}M", value / 1e6)
    } else {
        format!("{value:.0}")
    }
}

/// `YYYY-MM-DD` as `YY/MM/DD`. Unparseable input is returned unchanged.
pub fn fmt_date_label(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%y/%m/%d").to_string(),
        None => date.to_string(),
    }
}

/// `YYYY-MM-DD` as `DD Mon`.
pub fn fmt_date_short(date: &str) -> String {
    let parts: Vec<&str> = date.split(['-', '/']).collect();
    if parts.len() < 3 {
        return date.to_string();
    }
    let month = parts[1]
        .parse::<usize>()
        .ok()
        .filter(|m| (1..=12).contains(m))
        .unwrap_or(1);
    format!("{} {}", parts[2], MONTHS[month - 1])
}

/// `YYYY-MM-DD` as `MM/DD`, or the input when it has no month and day.
pub fn fmt_month_day(date: &str) -> String {
    let parts: Vec<&str> = date.split(['-', '/']).collect();
    match (parts.get(1), parts.get(2)) {
        (Some(m), Some(d)) if !m.is_empty() && !d.is_empty() => format!("{m}/{d}"),
        _ => date.to_string(),
    }
}

/// Tooltip header date: `-` separators shown as `/`.
pub fn fmt_tooltip_date(date: &str) -> String {
    date.replace('-', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_separators() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 2);
        assert_eq!(parse_date("2024-01-02"), expected);
        assert_eq!(parse_date("2024/01/02"), expected);
        assert_eq!(parse_date("2024.01.02"), expected);
        assert_eq!(parse_date("2024-01-02T09:00:00"), expected);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_f3() {
        assert_eq!(f3(1.23456), "1.235");
        assert_eq!(f3(f64::NAN), MISSING);
    }

    #[test]
    fn test_fmt_unit() {
        assert_eq!(fmt_unit(2_340_000_000.0), "2.3B");
        assert_eq!(fmt_unit(35_200_000.0), "35M");
        assert_eq!(fmt_unit(12_300.0), "12K");
        assert_eq!(fmt_unit(500.0), "500");
        assert_eq!(fmt_unit(12.5), "12.5");
    }

    #[test]
    fn test_fmt_volume_axis() {
        assert_eq!(fmt_volume_axis(300_000_000.0), "300M");
        assert_eq!(fmt_volume_axis(1_500_000_000.0), "1.5B");
        assert_eq!(fmt_volume_axis(4_321.0), "4321");
    }

    #[test]
    fn test_date_labels() {
        assert_eq!(fmt_date_label("2025-08-18"), "25/08/18");
        assert_eq!(fmt_date_label("garbage"), "garbage");
        assert_eq!(fmt_date_short("2025-08-18"), "18 Aug");
        assert_eq!(fmt_date_short("2025/13/01"), "01 Jan");
        assert_eq!(fmt_month_day("2025-10-16"), "10/16");
        assert_eq!(fmt_month_day("2025"), "2025");
        assert_eq!(fmt_tooltip_date("2025-10-16"), "2025/10/16");
    }
}
