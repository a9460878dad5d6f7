use serde::{Deserialize, Serialize};
use std::fmt;

/// Seconds in one day.
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

/// Growth above this many bytes per day is treated as a sensor glitch or a
/// migration event rather than real growth (10 GiB).
pub(crate) const GROWTH_SANITY_CAP: f64 = 10_737_418_240.0;

/// A single usage measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    /// Used bytes at that instant.
    pub value: f64,
}

impl Sample {
    pub const fn new(timestamp: i64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Identifies one usage time series: a mount on a host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub host_id: String,
    pub mount: String,
}

impl ItemKey {
    pub fn new(host_id: impl Into<String>, mount: impl Into<String>) -> Self {
        Self { host_id: host_id.into(), mount: mount.into() }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host_id, self.mount)
    }
}

/// One mount point on one host with its current totals.
///
/// `used_bytes <= total_bytes` is not guaranteed by upstream collectors;
/// everything downstream clamps instead of rejecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesystemRecord {
    pub host_id: String,
    pub host_name: String,
    pub mount: String,
    pub total_bytes: f64,
    pub used_bytes: f64,
}

impl FilesystemRecord {
    pub fn new(
        host_id: impl Into<String>,
        host_name: impl Into<String>,
        mount: impl Into<String>,
        total_bytes: f64,
        used_bytes: f64,
    ) -> Self {
        Self {
            host_id: host_id.into(),
            host_name: host_name.into(),
            mount: normalize_mount(mount.into()),
            total_bytes,
            used_bytes,
        }
    }

    /// Build a record from whichever of `total`, `used` and `pused` (percent
    /// used) an inventory reported, deriving the missing one.
    ///
    /// Returns `None` when no positive total and used can be established.
    pub fn from_metrics(
        host_id: impl Into<String>,
        host_name: impl Into<String>,
        mount: impl Into<String>,
        total: Option<f64>,
        used: Option<f64>,
        pused: Option<f64>,
    ) -> Option<Self> {
        let mut total = total.unwrap_or(0.0);
        let mut used = used.unwrap_or(0.0);
        let pused = pused.unwrap_or(0.0);

        if total <= 0.0 && used <= 0.0 {
            return None;
        }
        if used <= 0.0 && pused > 0.0 && total > 0.0 {
            used = total * (pused / 100.0);
        }
        if total <= 0.0 && used > 0.0 && pused > 0.0 {
            total = used / (pused / 100.0);
        }
        if total <= 0.0 || used <= 0.0 {
            return None;
        }

        Some(Self::new(host_id, host_name, mount, total, used))
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.host_id.clone(), self.mount.clone())
    }

    /// Usage percentage rounded to one decimal, 0 for a zero-sized filesystem.
    pub fn usage_pct(&self) -> f64 {
        usage_pct(self.used_bytes, self.total_bytes)
    }
}

/// `round(used / total * 100, 1)`, or 0 when `total` is not positive.
pub(crate) fn usage_pct(used: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    round_to(used / total * 100.0, 1)
}

/// Round half away from zero to `precision` decimal places.
pub(crate) fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10_f64.powi(precision as i32);
    (value * factor).round() / factor
}

fn normalize_mount(mount: String) -> String {
    let trimmed = mount.trim().trim_matches('"');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.len() == mount.len() {
        mount
    } else {
        trimmed.to_string()
    }
}

/// Discrete bucket describing growth magnitude and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    RapidIncrease,
    Increasing,
    SlowIncrease,
    Stable,
    Decreasing,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RapidIncrease => "rapid_increase",
            Self::Increasing => "increasing",
            Self::SlowIncrease => "slow_increase",
            Self::Stable => "stable",
            Self::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
