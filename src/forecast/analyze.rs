//! The prediction engine's entry point and the contracts it consumes.

use super::bytes::{format_bytes, format_rate};
use super::calculator::ForecastResult;
use super::error::ForecastError;
use super::estimator::{estimate, Method};
use super::status::{classify, Status, Thresholds};
use super::summary::{summarize, summarize_hosts, HostSummary, SummaryResult};
use super::types::{FilesystemRecord, ItemKey, Sample, SECONDS_PER_DAY};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

/// Analysis windows accepted by [`FilterConfig`].
pub(crate) const TIME_RANGES: [u32; 6] = [7, 14, 30, 90, 180, 365];

/// Per-request analysis parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub time_range_days: u32,
    pub prediction_method: Method,
    pub thresholds: Thresholds,
}

impl FilterConfig {
    pub(crate) fn new(
        time_range_days: u32,
        prediction_method: Method,
        thresholds: Thresholds,
    ) -> Result<Self, ForecastError> {
        if !TIME_RANGES.contains(&time_range_days) {
            return Err(ForecastError::InvalidTimeRange(time_range_days));
        }
        Ok(Self { time_range_days, prediction_method, thresholds })
    }
}

/// Which filesystems an analysis covers. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFilter {
    pub host_ids: Vec<String>,
    pub group_ids: Vec<String>,
    pub host_name_substring: Option<String>,
}

/// Supplies current totals per mount.
pub(crate) trait InventorySource {
    fn fetch_inventory(&self, filter: &InventoryFilter) -> Result<Vec<FilesystemRecord>>;
}

/// Supplies usage history. Implementations must answer the whole key set in
/// a single round trip; series come back ascending by timestamp.
pub(crate) trait HistorySource {
    fn fetch_history(&self, keys: &[ItemKey], since: i64) -> Result<HashMap<ItemKey, Vec<Sample>>>;
}

/// Resolves the groups a host belongs to.
pub(crate) trait HostGroupLookup {
    fn host_groups(&self, host_id: &str) -> Result<Vec<String>>;
}

/// Memoizes host group lookups for the lifetime of one analysis request.
pub(crate) struct HostGroupCache<'a, L: HostGroupLookup + ?Sized> {
    lookup: &'a L,
    groups: HashMap<String, Vec<String>>,
}

impl<'a, L: HostGroupLookup + ?Sized> HostGroupCache<'a, L> {
    pub(crate) fn new(lookup: &'a L) -> Self {
        Self { lookup, groups: HashMap::new() }
    }

    pub(crate) fn groups_for(&mut self, host_id: &str) -> Result<&[String]> {
        if !self.groups.contains_key(host_id) {
            let groups = self.lookup.host_groups(host_id)?;
            self.groups.insert(host_id.to_string(), groups);
        }
        Ok(self.groups.get(host_id).map_or(&[][..], Vec::as_slice))
    }

    /// Whether `host_id` belongs to any of `wanted`.
    pub(crate) fn in_any(&mut self, host_id: &str, wanted: &[String]) -> Result<bool> {
        Ok(self.groups_for(host_id)?.iter().any(|g| wanted.contains(g)))
    }

    pub(crate) fn len(&self) -> usize {
        self.groups.len()
    }
}

/// Human strings for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFields {
    pub total_space: String,
    pub used_space: String,
    pub daily_growth: String,
    pub days_until_full: String,
}

/// A filesystem with its forecast and status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    #[serde(flatten)]
    pub filesystem: FilesystemRecord,
    pub usage_pct: f64,
    pub forecast: ForecastResult,
    pub status: Status,
    pub display: DisplayFields,
}

/// Output of one analysis request.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub analysis_id: Uuid,
    pub config: FilterConfig,
    pub records: Vec<EnrichedRecord>,
    pub hosts: Vec<HostSummary>,
    pub summary: SummaryResult,
}

/// Forecast a single filesystem from its history.
pub(crate) fn enrich(record: FilesystemRecord, samples: &[Sample], config: &FilterConfig) -> EnrichedRecord {
    let estimate = estimate(samples, config.time_range_days, config.prediction_method);
    let forecast = ForecastResult::from_estimate(&record, estimate);
    let usage_pct = record.usage_pct();
    let status = classify(usage_pct, &forecast.days_until_full, &config.thresholds);

    let display = DisplayFields {
        total_space: format_bytes(record.total_bytes),
        used_space: format_bytes(record.used_bytes),
        daily_growth: if forecast.daily_growth_bytes > 0.0 {
            format_rate(forecast.daily_growth_bytes)
        } else {
            "Stable".to_string()
        },
        days_until_full: forecast.days_until_full.label(),
    };

    EnrichedRecord { filesystem: record, usage_pct, forecast, status, display }
}

/// Forecast every record against pre-fetched history and aggregate.
///
/// Records without a series get an insufficient-data forecast. `today`
/// anchors projected exhaustion dates.
pub(crate) fn analyze(
    records: Vec<FilesystemRecord>,
    history: &HashMap<ItemKey, Vec<Sample>>,
    config: &FilterConfig,
    today: NaiveDate,
) -> Analysis {
    let enriched: Vec<EnrichedRecord> = records
        .into_iter()
        .map(|record| {
            let samples = history.get(&record.key()).map_or(&[][..], Vec::as_slice);
            enrich(record, samples, config)
        })
        .collect();

    let hosts = summarize_hosts(&enriched, &config.thresholds);
    let summary = summarize(&enriched, today);

    Analysis { analysis_id: Uuid::new_v4(), config: config.clone(), records: enriched, hosts, summary }
}

/// Full request pipeline against the external collaborators: inventory,
/// group filtering, one batched history fetch, then [`analyze`].
pub(crate) fn run_analysis<S>(
    source: &S,
    filter: &InventoryFilter,
    config: &FilterConfig,
    now: DateTime<Utc>,
) -> Result<Analysis>
where
    S: InventorySource + HistorySource + HostGroupLookup + ?Sized,
{
    let mut records = source.fetch_inventory(filter).context("Failed to fetch inventory")?;

    if !filter.group_ids.is_empty() {
        let mut cache = HostGroupCache::new(source);
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            if cache.in_any(&record.host_id, &filter.group_ids)? {
                kept.push(record);
            }
        }
        debug!("Group filter resolved {} host(s), kept {} filesystem(s)", cache.len(), kept.len());
        records = kept;
    }

    let keys: Vec<ItemKey> = records
        .iter()
        .map(FilesystemRecord::key)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let since = now.timestamp() - (f64::from(config.time_range_days) * SECONDS_PER_DAY) as i64;
    let history = source.fetch_history(&keys, since).context("Failed to fetch history")?;

    let analysis = analyze(records, &history, config, now.date_naive());

    info!(
        "Analysis {}: {} filesystems on {} hosts, method={}, range={}d, critical={}, warning={}",
        analysis.analysis_id,
        analysis.summary.total_filesystems,
        analysis.summary.total_hosts,
        config.prediction_method,
        config.time_range_days,
        analysis.summary.critical_count,
        analysis.summary.warning_count,
    );

    Ok(analysis)
}
