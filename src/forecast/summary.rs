//! Fleet-wide and per-host reductions over enriched filesystem records.
//!
//! Everything here is rebuilt from scratch for each analysis.

use super::analyze::EnrichedRecord;
use super::bytes::{format_bytes, format_rate};
use super::duration::{format_days, DaysUntilFull, NO_GROWTH};
use super::stats::median_sorted;
use super::status::{classify, classify_days, Status, Thresholds};
use super::types::{usage_pct, Trend, GROWTH_SANITY_CAP};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Number of entries in [`SummaryResult::top_growers`].
pub(crate) const TOP_GROWERS: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub total_capacity_bytes: f64,
    pub total_used_bytes: f64,
    pub total_usage_pct: f64,
    pub critical_count: usize,
    pub warning_count: usize,
    pub total_hosts: usize,
    pub total_filesystems: usize,
    /// Median (not mean) of positive daily growth, zeroed above 10 GiB/day.
    pub avg_daily_growth: f64,
    pub earliest_full: Option<EarliestFull>,
    pub top_growers: Vec<Grower>,
    pub total_capacity: String,
    pub total_used: String,
    pub avg_daily_growth_fmt: String,
    pub statistics: Statistics,
}

/// The filesystem projected to fill first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarliestFull {
    pub host_id: String,
    pub host_name: String,
    pub mount: String,
    pub days: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grower {
    pub host_id: String,
    pub host_name: String,
    pub mount: String,
    pub daily_growth_bytes: f64,
    pub daily_growth: String,
    pub days_until_full: String,
    pub trend: Trend,
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusCounts {
    fn add(&mut self, status: Status) {
        match status {
            Status::Ok => self.ok += 1,
            Status::Warning => self.warning += 1,
            Status::Critical => self.critical += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendCounts {
    pub rapid_increase: usize,
    pub increasing: usize,
    pub slow_increase: usize,
    pub stable: usize,
    pub decreasing: usize,
}

impl TrendCounts {
    fn add(&mut self, trend: Trend) {
        match trend {
            Trend::RapidIncrease => self.rapid_increase += 1,
            Trend::Increasing => self.increasing += 1,
            Trend::SlowIncrease => self.slow_increase += 1,
            Trend::Stable => self.stable += 1,
            Trend::Decreasing => self.decreasing += 1,
        }
    }
}

/// Distribution of records across statuses and trends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub by_status: StatusCounts,
    pub by_trend: TrendCounts,
}

/// Per-host rollup of its filesystems.
#[derive(Debug, Clone, Serialize)]
pub struct HostSummary {
    pub host_id: String,
    pub host_name: String,
    pub total_bytes: f64,
    pub used_bytes: f64,
    pub usage_pct: f64,
    pub fs_count: usize,
    pub median_growth: f64,
    pub growth_display: String,
    /// Soonest exhaustion among the host's growing filesystems.
    pub earliest_days: Option<i64>,
    pub days_until_full: String,
    pub days_status: Status,
    /// Worst of the filesystem statuses and the host-level classification.
    pub status: Status,
}

/// Outlier-resistant central growth: median of the positive values, forced
/// to zero when it exceeds the sanity cap.
pub(crate) fn median_growth(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut growth: Vec<f64> = values.into_iter().filter(|g| *g > 0.0).collect();
    growth.sort_by(f64::total_cmp);
    match median_sorted(&growth) {
        Some(m) if m <= GROWTH_SANITY_CAP => m,
        _ => 0.0,
    }
}

fn growing(record: &EnrichedRecord) -> bool {
    record.forecast.daily_growth_bytes > 0.0
}

/// Finite exhaustion day count for a growing record. A count of 0 (under a
/// day left) is kept, so a filesystem about to fill still ranks as earliest.
fn exhaustion_days(record: &EnrichedRecord) -> Option<i64> {
    if !growing(record) {
        return None;
    }
    record.forecast.days_until_full.day_count()
}

/// Reduce one request's records to fleet statistics. `today` anchors the
/// projected exhaustion date.
pub(crate) fn summarize(records: &[EnrichedRecord], today: NaiveDate) -> SummaryResult {
    let mut total_capacity_bytes = 0.0;
    let mut total_used_bytes = 0.0;
    let mut statistics = Statistics::default();
    let mut hosts: HashSet<&str> = HashSet::new();
    let mut earliest: Option<(&EnrichedRecord, i64)> = None;

    for record in records {
        total_capacity_bytes += record.filesystem.total_bytes;
        total_used_bytes += record.filesystem.used_bytes;
        statistics.by_status.add(record.status);
        statistics.by_trend.add(record.forecast.trend);
        hosts.insert(record.filesystem.host_id.as_str());

        if let Some(days) = exhaustion_days(record) {
            // Strict comparison keeps the first-seen record on ties.
            if earliest.map_or(true, |(_, best)| days < best) {
                earliest = Some((record, days));
            }
        }
    }

    let avg_daily_growth = median_growth(records.iter().map(|r| r.forecast.daily_growth_bytes));

    let mut growers: Vec<&EnrichedRecord> = records.iter().filter(|r| growing(r)).collect();
    growers.sort_by(|a, b| b.forecast.daily_growth_bytes.total_cmp(&a.forecast.daily_growth_bytes));
    let top_growers = growers.into_iter().take(TOP_GROWERS).map(Grower::from).collect();

    let earliest_full = earliest.map(|(record, days)| EarliestFull {
        host_id: record.filesystem.host_id.clone(),
        host_name: record.filesystem.host_name.clone(),
        mount: record.filesystem.mount.clone(),
        days,
        date: today.checked_add_days(Days::new(days.unsigned_abs())).unwrap_or(today),
    });

    SummaryResult {
        total_capacity_bytes,
        total_used_bytes,
        total_usage_pct: usage_pct(total_used_bytes, total_capacity_bytes),
        critical_count: statistics.by_status.critical,
        warning_count: statistics.by_status.warning,
        total_hosts: hosts.len(),
        total_filesystems: records.len(),
        avg_daily_growth,
        earliest_full,
        top_growers,
        total_capacity: format_bytes(total_capacity_bytes),
        total_used: format_bytes(total_used_bytes),
        avg_daily_growth_fmt: format_rate(avg_daily_growth),
        statistics,
    }
}

impl From<&EnrichedRecord> for Grower {
    fn from(record: &EnrichedRecord) -> Self {
        Self {
            host_id: record.filesystem.host_id.clone(),
            host_name: record.filesystem.host_name.clone(),
            mount: record.filesystem.mount.clone(),
            daily_growth_bytes: record.forecast.daily_growth_bytes,
            daily_growth: record.display.daily_growth.clone(),
            days_until_full: record.display.days_until_full.clone(),
            trend: record.forecast.trend,
            status: record.status,
        }
    }
}

/// Group records by host, in first-seen host order.
pub(crate) fn summarize_hosts(records: &[EnrichedRecord], thresholds: &Thresholds) -> Vec<HostSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&EnrichedRecord>> = HashMap::new();
    for record in records {
        let host = record.filesystem.host_id.as_str();
        groups
            .entry(host)
            .or_insert_with(|| {
                order.push(host);
                Vec::new()
            })
            .push(record);
    }

    order
        .into_iter()
        .filter_map(|host| groups.get(host).map(|members| summarize_host(members, thresholds)))
        .collect()
}

fn summarize_host(members: &[&EnrichedRecord], thresholds: &Thresholds) -> HostSummary {
    let total_bytes: f64 = members.iter().map(|r| r.filesystem.total_bytes).sum();
    let used_bytes: f64 = members.iter().map(|r| r.filesystem.used_bytes).sum();
    let usage = usage_pct(used_bytes, total_bytes);

    let median = median_growth(members.iter().map(|r| r.forecast.daily_growth_bytes));
    let earliest = members
        .iter()
        .filter_map(|r| exhaustion_days(r).map(|days| (days, &r.forecast.days_until_full)))
        .min_by_key(|(days, _)| *days);
    let earliest_days = earliest.map(|(days, _)| days);
    let days_status = classify_days(earliest_days);

    let host_level =
        classify(usage, earliest.map_or(&DaysUntilFull::NoGrowth, |(_, until)| until), thresholds);
    let worst_member = members.iter().map(|r| r.status).max().unwrap_or(Status::Ok);

    let first = members[0];
    HostSummary {
        host_id: first.filesystem.host_id.clone(),
        host_name: first.filesystem.host_name.clone(),
        total_bytes,
        used_bytes,
        usage_pct: usage,
        fs_count: members.len(),
        median_growth: median,
        growth_display: if median > 0.0 {
            format!("+{}", format_rate(median))
        } else {
            "Stable".to_string()
        },
        earliest_days,
        days_until_full: earliest_days
            .map_or_else(|| NO_GROWTH.to_string(), |d| format_days(d as f64)),
        days_status,
        status: worst_member.max(host_level),
    }
}
