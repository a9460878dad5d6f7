use crate::forecast::bytes::{format_bytes, format_bytes_with, format_rate};
use crate::forecast::duration::{format_days, parse_days, NEVER};
use crate::forecast::DaysUntilFull;

#[test]
fn test_format_bytes_units() {
    assert_eq!(format_bytes(0.0), "0 B");
    assert_eq!(format_bytes(1023.0), "1023 B");
    assert_eq!(format_bytes(1536.0), "1.5 KB");
    assert_eq!(format_bytes(1_073_741_824.0), "1 GB");
    assert_eq!(format_bytes(1_099_511_627_776.0 * 2.5), "2.5 TB");
}

#[test]
fn test_format_bytes_clamps_bad_input() {
    assert_eq!(format_bytes(-5.0), "0 B");
    assert_eq!(format_bytes(f64::NAN), "0 B");
}

#[test]
fn test_format_bytes_precision() {
    assert_eq!(format_bytes_with(1_234_567.0, 1), "1.2 MB");
    assert_eq!(format_bytes(1_234_567.0), "1.18 MB");
}

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(0.0), "0 B/day");
    assert_eq!(format_rate(104_857_600.0), "100 MB/day");
}

#[test]
fn test_format_days_buckets() {
    assert_eq!(format_days(0.0), "0 days");
    assert_eq!(format_days(-3.0), "0 days");
    assert_eq!(format_days(10.7), "10 days");
    assert_eq!(format_days(30.0), "30 days");
    assert_eq!(format_days(45.0), "1 months 15 days");
    assert_eq!(format_days(60.0), "2 months");
    assert_eq!(format_days(400.0), "1 years 1 months");
    assert_eq!(format_days(730.0), "2 years");
    assert_eq!(format_days(4000.0), "More than 10 years");
}

#[test]
fn test_parse_days() {
    assert_eq!(parse_days("10 days"), 10);
    assert_eq!(parse_days("1 months 15 days"), 45);
    assert_eq!(parse_days("1 years 1 months"), 395);
    assert_eq!(parse_days("1 year"), 365);
    assert_eq!(parse_days("42"), 42);
    assert_eq!(parse_days("12.9"), 12);
}

#[test]
fn test_parse_days_sentinels_are_never() {
    for label in ["No growth", "Already full", "Growth error", "More than 10 years", "soon"] {
        assert_eq!(parse_days(label), NEVER, "{label}");
    }
}

#[test]
fn test_day_count_matches_label_parse() {
    for days in [0.5, 10.0, 29.9, 31.0, 364.0, 366.0, 400.0, 3649.0] {
        let d = DaysUntilFull::Finite(days);
        assert_eq!(d.day_count(), Some(parse_days(&d.label())), "{days}");
    }
    assert_eq!(DaysUntilFull::NoGrowth.day_count(), None);
    assert_eq!(DaysUntilFull::Infinite.day_count(), None);
}

#[test]
fn test_days_until_full_from_label() {
    assert_eq!(DaysUntilFull::from_label("No growth"), DaysUntilFull::NoGrowth);
    assert_eq!(DaysUntilFull::from_label("Growth error"), DaysUntilFull::NoGrowth);
    assert_eq!(DaysUntilFull::from_label("Already full"), DaysUntilFull::AlreadyFull);
    assert_eq!(DaysUntilFull::from_label("More than 10 years"), DaysUntilFull::Infinite);
    assert_eq!(DaysUntilFull::from_label("2 months"), DaysUntilFull::Finite(60.0));
    assert_eq!(DaysUntilFull::from_label("whenever"), DaysUntilFull::Infinite);
}
