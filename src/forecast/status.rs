use super::duration::DaysUntilFull;
use super::error::ForecastError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Projected exhaustion within this many days is critical.
pub(crate) const CRITICAL_DAYS: i64 = 15;
/// Projected exhaustion within this many days is a warning.
pub(crate) const WARNING_DAYS: i64 = 30;

/// Tri-state health of a filesystem or host. Ordered so that the worst of
/// several statuses is their `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Warning,
    Critical,
}

impl Status {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Usage percentages at which a filesystem becomes warning / critical.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
}

impl Thresholds {
    pub(crate) fn new(warning: f64, critical: f64) -> Result<Self, ForecastError> {
        for (name, value) in [("warning", warning), ("critical", critical)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ForecastError::InvalidThreshold { name, value });
            }
        }
        Ok(Self { warning, critical })
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { warning: 80.0, critical: 90.0 }
    }
}

/// Classify by usage first, then by projected exhaustion. The two are
/// independent early-warning paths: a half-empty filesystem that fills in
/// ten days is critical.
pub(crate) fn classify(usage_pct: f64, days_until_full: &DaysUntilFull, thresholds: &Thresholds) -> Status {
    if usage_pct >= thresholds.critical {
        return Status::Critical;
    }
    if usage_pct >= thresholds.warning {
        return Status::Warning;
    }
    classify_days(days_until_full.day_count())
}

/// Status from an exhaustion day count alone; `None` means never.
pub(crate) const fn classify_days(days: Option<i64>) -> Status {
    match days {
        Some(d) if d <= CRITICAL_DAYS => Status::Critical,
        Some(d) if d <= WARNING_DAYS => Status::Warning,
        _ => Status::Ok,
    }
}
