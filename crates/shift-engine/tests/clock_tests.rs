//! Tests for clock arithmetic: parsing, formatting, rounding and interval length.

use chrono::NaiveTime;
use shift_engine::clock::{
    format_clock_time, interval_duration, parse_clock_time, round_clock_time,
    round_to_granularity, ClockTime, Granularity, Interval,
};
use shift_engine::ShiftError;

fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

fn g(minutes: u32) -> Granularity {
    Granularity::new(minutes).unwrap()
}

// ── Parsing ─────────────────────────────────────────────────────────────────

#[test]
fn parses_zero_padded_time() {
    assert_eq!(parse_clock_time("22:00").unwrap().minutes(), 1320);
    assert_eq!(parse_clock_time("00:00").unwrap(), ClockTime::MIDNIGHT);
    assert_eq!(parse_clock_time("23:59").unwrap().minutes(), 1439);
}

#[test]
fn parses_unpadded_and_padded_with_spaces() {
    assert_eq!(parse_clock_time(" 7:5 ").unwrap().minutes(), 425);
}

#[test]
fn out_of_range_parts_wrap_onto_the_dial() {
    assert_eq!(parse_clock_time("24:30").unwrap().minutes(), 30);
    assert_eq!(parse_clock_time("-1:00").unwrap().minutes(), 1380);
    assert_eq!(parse_clock_time("10:75").unwrap().to_string(), "11:15");
}

#[test]
fn rejects_malformed_input() {
    for bad in ["", "2200", "ab:cd", "12:", ":30", "12:30:00", "12.5:00"] {
        match parse_clock_time(bad) {
            Err(ShiftError::InvalidFormat(text)) => assert_eq!(text, bad),
            other => panic!("expected InvalidFormat for {bad:?}, got {other:?}"),
        }
    }
}

// ── Formatting ──────────────────────────────────────────────────────────────

#[test]
fn formats_with_zero_padding() {
    assert_eq!(format_clock_time(0), "00:00");
    assert_eq!(format_clock_time(65), "01:05");
    assert_eq!(format_clock_time(1439), "23:59");
}

#[test]
fn negative_minutes_wrap_to_previous_day() {
    assert_eq!(format_clock_time(-10), "23:50");
    assert_eq!(format_clock_time(-1440), "00:00");
    assert_eq!(format_clock_time(-1441), "23:59");
}

#[test]
fn minutes_past_a_day_wrap_forward() {
    assert_eq!(format_clock_time(1450), "00:10");
    assert_eq!(format_clock_time(3 * 1440 + 60), "01:00");
}

#[test]
fn offset_moves_across_midnight() {
    assert_eq!(t("22:00").offset(-15).to_string(), "21:45");
    assert_eq!(t("00:10").offset(-20).to_string(), "23:50");
    assert_eq!(t("23:50").offset(30).to_string(), "00:20");
}

#[test]
fn converts_to_and_from_naive_time() {
    let time = t("06:45");
    let naive = time.to_naive_time();
    assert_eq!(naive, NaiveTime::from_hms_opt(6, 45, 0).unwrap());
    assert_eq!(ClockTime::from(NaiveTime::from_hms_opt(6, 45, 59).unwrap()), time);
}

#[test]
fn serializes_as_hh_mm_string() {
    assert_eq!(serde_json::to_string(&t("06:00")).unwrap(), "\"06:00\"");
    let back: ClockTime = serde_json::from_str("\"21:45\"").unwrap();
    assert_eq!(back, t("21:45"));
    assert!(serde_json::from_str::<ClockTime>("\"nope\"").is_err());
}

// ── Rounding ────────────────────────────────────────────────────────────────

#[test]
fn rounds_to_nearest_multiple() {
    assert_eq!(round_to_granularity(53, g(5)), 55);
    assert_eq!(round_to_granularity(52, g(5)), 50);
    assert_eq!(round_to_granularity(0, g(5)), 0);
    assert_eq!(round_to_granularity(480, g(15)), 480);
}

#[test]
fn ties_round_up() {
    assert_eq!(round_to_granularity(3, g(2)), 4);
    assert_eq!(round_to_granularity(5, g(10)), 10);
    assert_eq!(round_to_granularity(15, g(10)), 20);
}

#[test]
fn granularity_one_is_identity() {
    for m in [0, 1, 7, 1439] {
        assert_eq!(round_to_granularity(m, g(1)), m);
    }
}

#[test]
fn zero_granularity_is_rejected() {
    assert!(matches!(
        Granularity::new(0),
        Err(ShiftError::InvalidGranularity(0))
    ));
    assert!(serde_json::from_str::<Granularity>("0").is_err());
    assert_eq!(Granularity::default().minutes(), 5);
}

#[test]
fn round_clock_time_snaps_and_wraps() {
    assert_eq!(round_clock_time(t("22:03"), g(5)).to_string(), "22:05");
    assert_eq!(round_clock_time(t("22:02"), g(5)).to_string(), "22:00");
    assert_eq!(round_clock_time(t("23:58"), g(5)).to_string(), "00:00");
    assert_eq!(round_clock_time(t("07:08"), g(15)).to_string(), "07:15");
}

// ── Interval length ─────────────────────────────────────────────────────────

#[test]
fn daytime_interval_length() {
    assert_eq!(interval_duration(t("08:00"), t("16:00")), 480);
    assert_eq!(interval_duration(t("00:00"), t("23:59")), 1439);
}

#[test]
fn overnight_interval_adds_a_day() {
    assert_eq!(interval_duration(t("22:00"), t("06:00")), 480);
    assert_eq!(interval_duration(t("23:59"), t("00:00")), 1);
}

#[test]
fn equal_endpoints_span_a_full_day() {
    assert_eq!(interval_duration(t("08:00"), t("08:00")), 1440);
    let interval = Interval::parse("00:00", "00:00").unwrap();
    assert_eq!(interval.duration_minutes(), 1440);
    assert!(interval.crosses_midnight());
}

#[test]
fn crosses_midnight_only_when_end_not_after_start() {
    assert!(Interval::parse("22:00", "06:00").unwrap().crosses_midnight());
    assert!(!Interval::parse("08:00", "16:00").unwrap().crosses_midnight());
}

#[test]
fn interval_parse_reports_the_bad_side() {
    match Interval::parse("08:00", "later") {
        Err(ShiftError::InvalidFormat(text)) => assert_eq!(text, "later"),
        other => panic!("expected InvalidFormat, got {other:?}"),
    }
}
