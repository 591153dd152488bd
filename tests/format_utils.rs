use chrono::{NaiveDate, NaiveTime};
use etf_flow_dashboard::format_utils::*;
use quickcheck_macros::quickcheck;

const LABELS: [&str; 4] = ["Last 7 Days", "Last 30 Days", "Last 90 Days", "Last Year"];

#[quickcheck]
fn currency_sign_follows_value(v: f64) -> bool {
    if !v.is_finite() {
        return format_currency(Some(v)) == "$0";
    }
    format_currency(Some(v)).starts_with("-$") == (v < 0.0)
}

#[quickcheck]
fn period_text_is_monotonic(a: i64, b: i64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let rank = |d| LABELS.iter().position(|l| *l == period_text(d));
    matches!((rank(lo), rank(hi)), (Some(x), Some(y)) if x <= y)
}

#[quickcheck]
fn grouped_digits_survive_separator_removal(v: u32) -> bool {
    format_grouped(f64::from(v), 0).replace(',', "") == v.to_string()
}

#[test]
fn currency_examples() {
    assert_eq!(format_currency(Some(1_500_000.0)), "$1.50M");
    assert_eq!(format_currency(Some(0.0)), "$0.00");
    assert_eq!(format_currency(None), "$0");
    assert_eq!(format_currency(Some(1_000_000_000.0)), "$1.00B");
    assert_eq!(format_currency(Some(-2_340_000_000.0)), "-$2.34B");
    assert_eq!(format_currency(Some(999.0)), "$999.00");
    assert_eq!(format_currency(Some(f64::NAN)), "$0");
}

#[test]
fn currency_halves_round_up_in_magnitude() {
    assert_eq!(format_currency(Some(1_125_000.0)), "$1.13M");
    assert_eq!(format_currency(Some(0.125)), "$0.13");
    assert_eq!(format_currency(Some(-0.125)), "-$0.13");
}

#[test]
fn period_text_thresholds() {
    assert_eq!(period_text(7), "Last 7 Days");
    assert_eq!(period_text(8), "Last 30 Days");
    assert_eq!(period_text(30), "Last 30 Days");
    assert_eq!(period_text(90), "Last 90 Days");
    assert_eq!(period_text(91), "Last Year");
    assert_eq!(period_text(365), "Last Year");
}

#[test]
fn percentage_change_guards_zero_base() {
    assert_eq!(percentage_change(0.0, 100.0), 0.0);
    assert_eq!(percentage_change(50.0, 75.0), 50.0);
    assert_eq!(format_percentage(Some(percentage_change(50.0, 75.0))), "+50.00%");
}

#[test]
fn large_and_compact_numbers() {
    assert_eq!(format_large_number(Some(1.2e12)), "1.20T");
    assert_eq!(format_large_number(Some(512.4)), "512");
    assert_eq!(format_compact_number(Some(2_450_000.0)), "2.5M");
    assert_eq!(format_compact_number(None), "0");
}

#[test]
fn dates() {
    let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
    assert_eq!(format_date("2024-01-05"), "Jan 5, 2024");
    assert_eq!(format_date("2024-01-05T10:00:00Z"), "Jan 5, 2024");
    assert_eq!(format_date("soon"), "soon");
    assert_eq!(relative_date(jan5, jan5), "Today");
    assert_eq!(relative_date(jan5, jan5.succ_opt().unwrap()), "Yesterday");
    assert_eq!(
        date_range_text(&[jan5, NaiveDate::from_ymd_opt(2024, 1, 30).unwrap()]).as_deref(),
        Some("Jan 5, 2024 - Jan 30, 2024")
    );
    assert_eq!(date_range_text(&[]), None);
    assert_eq!(
        last_updated_text(NaiveTime::from_hms_opt(13, 5, 0).unwrap()),
        "Today at 1:05 PM"
    );
}

#[test]
fn grouped_market_figures() {
    assert_eq!(format_grouped(3456.789, 2), "3,456.79");
    assert_eq!(format_grouped(120_000_000.0, 0), "120,000,000");
    assert_eq!(format_grouped(2500.5, 2), "2,500.5");
}
