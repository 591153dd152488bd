//! Display formatting for flows, prices and dates.
//!
//! Invalid input maps to a fixed placeholder instead of an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const CURRENCY_LADDER: &[(f64, &str)] = &[(1e9, "B"), (1e6, "M"), (1e3, "K")];
const LARGE_NUMBER_LADDER: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

fn suffix_for(abs: f64, ladder: &'static [(f64, &'static str)]) -> Option<(f64, &'static str)> {
    ladder.iter().copied().find(|(threshold, _)| abs >= *threshold)
}

/// Fixed decimals with ties rounded away from zero.
fn to_fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    let scaled = (value * scale).round();
    let rounded = if scaled.is_finite() { scaled / scale } else { value };
    format!("{rounded:.decimals$}")
}

fn sign_of(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// `$1.50M`, `-$2.00B`, `$999.00`. Missing or non-finite input is `$0`.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "$0".to_string();
    };
    let sign = sign_of(value);
    let abs = value.abs();
    match suffix_for(abs, CURRENCY_LADDER) {
        Some((divisor, suffix)) => format!("{sign}${}{suffix}", to_fixed(abs / divisor, 2)),
        None => format!("{sign}${}", to_fixed(abs, 2)),
    }
}

/// Like [`format_currency`] without the `$`, extended to `T`, and whole numbers below 1K.
pub fn format_large_number(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "0".to_string();
    };
    let sign = sign_of(value);
    let abs = value.abs();
    match suffix_for(abs, LARGE_NUMBER_LADDER) {
        Some((divisor, suffix)) => format!("{sign}{}{suffix}", to_fixed(abs / divisor, 2)),
        None => format!("{sign}{}", abs.round()),
    }
}

/// One decimal, K/M/B.
pub fn format_compact_number(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "0".to_string();
    };
    let sign = sign_of(value);
    let abs = value.abs();
    match suffix_for(abs, CURRENCY_LADDER) {
        Some((divisor, suffix)) => format!("{sign}{}{suffix}", to_fixed(abs / divisor, 1)),
        None => format!("{sign}{}", abs.round()),
    }
}

/// `+1.25%`, `0.00%`, `-3.10%`.
pub fn format_percentage(value: Option<f64>) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "0.00%".to_string();
    };
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{}%", to_fixed(value, 2))
}

/// Thresholded label ladder; any `days` in `(7, 30]` is the 30-day label.
pub fn period_text(days: i64) -> &'static str {
    match days {
        d if d <= 7 => "Last 7 Days",
        d if d <= 30 => "Last 30 Days",
        d if d <= 90 => "Last 90 Days",
        _ => "Last Year",
    }
}

pub fn percentage_change(old: f64, new: f64) -> f64 {
    if !old.is_finite() || !new.is_finite() || old == 0.0 {
        return 0.0;
    }
    (new - old) / old.abs() * 100.0
}

/// Parse `2024-01-05`, `2024-01-05T10:00:00` or RFC 3339.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|t| t.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|t| t.date())
        })
}

/// `Jan 5, 2024`
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Unparseable input is returned as given.
pub fn format_date(value: &str) -> String {
    parse_date(value)
        .map(format_short_date)
        .unwrap_or_else(|| value.to_string())
}

/// `Today`, `Yesterday`, or the short date.
pub fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        format_short_date(date)
    }
}

/// `Jan 1, 2024 - Jan 30, 2024` from the first and last chart dates.
pub fn date_range_text(dates: &[NaiveDate]) -> Option<String> {
    let first = dates.first()?;
    let last = dates.last()?;
    Some(format!("{} - {}", format_short_date(*first), format_short_date(*last)))
}

/// `Today at 1:29 AM`
pub fn last_updated_text(time: NaiveTime) -> String {
    format!("Today at {}", time.format("%-I:%M %p"))
}

/// Thousands separators with at most `max_decimals` fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64, max_decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = to_fixed(value.abs(), max_decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}
