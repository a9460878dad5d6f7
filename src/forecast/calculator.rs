use super::duration::{DaysUntilFull, TEN_YEARS_DAYS};
use super::estimator::{Estimate, Method};
use super::types::{FilesystemRecord, Trend};
use serde::{Deserialize, Serialize};

/// Above 1 GiB/day.
const RAPID_INCREASE_BYTES: f64 = 1_073_741_824.0;
/// Above 100 MiB/day (and below minus that for shrinking).
const INCREASING_BYTES: f64 = 104_857_600.0;

/// Bucket a daily growth rate into a [`Trend`], evaluated top-down.
pub(crate) fn determine_trend(daily_growth: f64) -> Trend {
    if daily_growth > RAPID_INCREASE_BYTES {
        Trend::RapidIncrease
    } else if daily_growth > INCREASING_BYTES {
        Trend::Increasing
    } else if daily_growth > 0.0 {
        Trend::SlowIncrease
    } else if daily_growth < -INCREASING_BYTES {
        Trend::Decreasing
    } else {
        Trend::Stable
    }
}

/// Project when a filesystem fills up at `daily_growth` bytes per day.
pub(crate) fn days_until_full(total_bytes: f64, used_bytes: f64, daily_growth: f64) -> DaysUntilFull {
    if daily_growth.is_nan() || daily_growth <= 0.0 {
        return DaysUntilFull::NoGrowth;
    }

    let free = total_bytes - used_bytes;
    if free <= 0.0 {
        return DaysUntilFull::AlreadyFull;
    }

    // One day of growth larger than ten days of free space is an estimation
    // artifact, not signal.
    if daily_growth > free * 10.0 {
        return DaysUntilFull::NoGrowth;
    }

    let days = free / daily_growth;
    if days > TEN_YEARS_DAYS {
        DaysUntilFull::Infinite
    } else {
        DaysUntilFull::Finite(days)
    }
}

/// Forecast attached to one filesystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// May be negative for shrinking filesystems.
    pub daily_growth_bytes: f64,
    pub trend: Trend,
    pub days_until_full: DaysUntilFull,
    pub confidence: u8,
    pub algorithm: Method,
    pub insufficient_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<super::estimator::EstimateDetail>,
}

impl ForecastResult {
    /// Combine an estimate with a filesystem's current totals.
    pub(crate) fn from_estimate(record: &FilesystemRecord, estimate: Estimate) -> Self {
        Self {
            days_until_full: days_until_full(
                record.total_bytes,
                record.used_bytes,
                estimate.daily_growth_bytes,
            ),
            daily_growth_bytes: estimate.daily_growth_bytes,
            trend: estimate.trend,
            confidence: estimate.confidence,
            algorithm: estimate.algorithm,
            insufficient_data: estimate.insufficient_data,
            detail: estimate.detail,
        }
    }
}
