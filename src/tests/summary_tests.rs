use crate::forecast::analyze::{enrich, EnrichedRecord};
use crate::forecast::summary::{median_growth, summarize, summarize_hosts};
use crate::forecast::{FilesystemRecord, FilterConfig, Method, Sample, Status, Thresholds};
use chrono::NaiveDate;

const DAY: i64 = 86_400;
const GIB: f64 = 1_073_741_824.0;
const MIB: f64 = 1_048_576.0;

/// A record whose simple-method forecast is exactly `growth` bytes per day.
fn enriched(host: &str, mount: &str, total: f64, used: f64, growth: f64) -> EnrichedRecord {
    let config = FilterConfig::new(30, Method::Simple, Thresholds::default()).unwrap();
    let record = FilesystemRecord::new(host, host.to_uppercase(), mount, total, used);
    enrich(record, &[Sample::new(0, 0.0), Sample::new(DAY, growth)], &config)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[test]
fn test_median_growth() {
    assert!((median_growth([GIB, 2.0 * GIB, 3.0 * GIB, 100.0 * GIB]) - 2.5 * GIB).abs() < 1.0);
    assert!((median_growth([5.0, -100.0, 0.0, 3.0, 9.0]) - 5.0).abs() < f64::EPSILON);
    assert!(median_growth([20.0 * GIB, 30.0 * GIB]).abs() < f64::EPSILON);
    assert!(median_growth([]).abs() < f64::EPSILON);
}

#[test]
fn test_empty_summary() {
    let summary = summarize(&[], today());
    assert_eq!(summary.total_filesystems, 0);
    assert_eq!(summary.total_hosts, 0);
    assert!(summary.total_usage_pct.abs() < f64::EPSILON);
    assert!(summary.earliest_full.is_none());
    assert!(summary.top_growers.is_empty());
    assert_eq!(summary.avg_daily_growth_fmt, "0 B/day");
}

#[test]
fn test_top_growers_sorted_and_capped() {
    let records: Vec<EnrichedRecord> = (1..=7)
        .map(|i| enriched(&format!("h{}", i % 3), &format!("/m{i}"), 1e15, 1e12, f64::from(i) * MIB))
        .chain(std::iter::once(enriched("h0", "/flat", 1e15, 1e12, 0.0)))
        .collect();

    let summary = summarize(&records, today());
    assert_eq!(summary.total_filesystems, 8);
    assert_eq!(summary.total_hosts, 3);
    assert_eq!(summary.top_growers.len(), 5);
    let growth: Vec<f64> = summary.top_growers.iter().map(|g| g.daily_growth_bytes).collect();
    assert_eq!(growth, vec![7.0 * MIB, 6.0 * MIB, 5.0 * MIB, 4.0 * MIB, 3.0 * MIB]);
    assert!((summary.avg_daily_growth - 4.0 * MIB).abs() < f64::EPSILON);
    assert_eq!(summary.avg_daily_growth_fmt, "4 MB/day");
}

#[test]
fn test_top_growers_fewer_than_five() {
    let records =
        vec![enriched("a", "/", 1e12, 1e9, 10.0), enriched("b", "/", 1e12, 1e9, 0.0)];
    let summary = summarize(&records, today());
    assert_eq!(summary.top_growers.len(), 1);
    assert_eq!(summary.top_growers[0].host_id, "a");
}

#[test]
fn test_earliest_full_first_seen_wins_ties() {
    let records = vec![
        enriched("slow", "/", 1000.0, 500.0, 1.0),
        enriched("first", "/data", 1000.0, 900.0, 10.0),
        enriched("second", "/data", 2000.0, 1800.0, 20.0),
    ];
    let summary = summarize(&records, today());
    let earliest = summary.earliest_full.unwrap();
    assert_eq!(earliest.host_id, "first");
    assert_eq!(earliest.host_name, "FIRST");
    assert_eq!(earliest.mount, "/data");
    assert_eq!(earliest.days, 10);
    assert_eq!(earliest.date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
}

#[test]
fn test_earliest_full_ignores_non_growing() {
    let records = vec![enriched("a", "/", 1000.0, 999.0, 0.0), enriched("b", "/", 1000.0, 100.0, -5.0)];
    assert!(summarize(&records, today()).earliest_full.is_none());
}

#[test]
fn test_statistics_buckets() {
    let records = vec![
        enriched("a", "/", 1000.0, 950.0, 0.0),
        enriched("a", "/var", 1000.0, 850.0, 0.0),
        enriched("b", "/", 1e12, 1e9, 2.0 * GIB),
        enriched("b", "/tmp", 1e12, 1e9, 200.0 * MIB),
    ];
    let summary = summarize(&records, today());
    let stats = &summary.statistics;
    assert_eq!(stats.by_status.critical, 1);
    assert_eq!(stats.by_status.warning, 1);
    assert_eq!(stats.by_status.ok, 2);
    assert_eq!(stats.by_trend.stable, 2);
    assert_eq!(stats.by_trend.rapid_increase, 1);
    assert_eq!(stats.by_trend.increasing, 1);
    assert_eq!(stats.by_trend.decreasing, 0);
    assert_eq!(summary.critical_count, 1);
    assert_eq!(summary.warning_count, 1);
}

#[test]
fn test_host_rollup_takes_worst_status() {
    let records = vec![
        enriched("h1", "/fs1", 1000.0, 900.0, 0.0),
        enriched("h1", "/fs2", 2000.0, 500.0, 50.0),
    ];
    assert_eq!(records[0].status, Status::Critical);
    assert_eq!(records[1].status, Status::Warning);
    assert_eq!(records[1].display.days_until_full, "30 days");

    let hosts = summarize_hosts(&records, &Thresholds::default());
    assert_eq!(hosts.len(), 1);
    let host = &hosts[0];
    assert!((host.usage_pct - 46.7).abs() < 1e-9);
    assert_eq!(host.fs_count, 2);
    assert_eq!(host.earliest_days, Some(30));
    assert_eq!(host.days_status, Status::Warning);
    assert_eq!(host.status, Status::Critical);
    assert!((host.median_growth - 50.0).abs() < f64::EPSILON);
    assert_eq!(host.growth_display, "+50 B/day");
}

#[test]
fn test_host_status_uses_aggregate_usage_then_exhaustion() {
    let records = vec![
        enriched("h1", "/busy", 1000.0, 850.0, 15.0),
        enriched("h1", "/bulk", 9000.0, 1000.0, 0.0),
    ];
    // Usage alone makes the busy member a warning; its 10 days left are
    // never consulted.
    assert_eq!(records[0].status, Status::Warning);
    assert_eq!(records[1].status, Status::Ok);

    let hosts = summarize_hosts(&records, &Thresholds::default());
    let host = &hosts[0];
    assert!((host.usage_pct - 18.5).abs() < 1e-9);
    assert_eq!(host.earliest_days, Some(10));
    assert_eq!(host.status, Status::Critical);
}

#[test]
fn test_earliest_full_keeps_under_one_day() {
    let records = vec![
        enriched("a", "/", 1000.0, 500.0, 10.0),
        enriched("b", "/", 1000.0, 999.5, 4.0),
    ];
    let earliest = summarize(&records, today()).earliest_full.unwrap();
    assert_eq!(earliest.host_id, "b");
    assert_eq!(earliest.days, 0);
    assert_eq!(earliest.date, today());
}

#[test]
fn test_hosts_in_first_seen_order() {
    let records = vec![
        enriched("zeta", "/", 100.0, 10.0, 0.0),
        enriched("alpha", "/", 100.0, 10.0, 0.0),
        enriched("zeta", "/home", 100.0, 10.0, 0.0),
    ];
    let hosts = summarize_hosts(&records, &Thresholds::default());
    let ids: Vec<&str> = hosts.iter().map(|h| h.host_id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    assert_eq!(hosts[0].fs_count, 2);
    assert_eq!(hosts[0].growth_display, "Stable");
    assert_eq!(hosts[0].days_until_full, "No growth");
    assert_eq!(hosts[0].status, Status::Ok);
}
