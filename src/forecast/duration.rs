//! Day counts to and from human durations ("2 years 3 months", "15 days").
//!
//! The rendering uses 30-day months and 365-day years, so it is lossy:
//! `format_days(400.0)` is `"1 years 1 months"`, which parses back to 395.
//! Logic inside the crate works on [`DaysUntilFull`]; strings only exist at
//! the presentation boundary.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Parsed value for durations that mean "never" (sentinels, garbage).
pub(crate) const NEVER: i64 = i64::MAX;

/// Anything beyond this many days renders as [`MORE_THAN_TEN_YEARS`].
pub(crate) const TEN_YEARS_DAYS: f64 = 3650.0;

pub(crate) const NO_GROWTH: &str = "No growth";
pub(crate) const ALREADY_FULL: &str = "Already full";
pub(crate) const MORE_THAN_TEN_YEARS: &str = "More than 10 years";
pub(crate) const GROWTH_ERROR: &str = "Growth error";

static YEARS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d+)\s*years?"));
static MONTHS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d+)\s*months?"));
static DAYS_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d+)\s*days?"));

#[allow(clippy::expect_used)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("duration pattern is a valid regex")
}

/// Render a positive day count as a human duration.
///
/// Non-positive input is the caller's sentinel to handle and renders as
/// `"0 days"`.
pub(crate) fn format_days(days: f64) -> String {
    if days.is_nan() || days <= 0.0 {
        return "0 days".to_string();
    }
    if days > TEN_YEARS_DAYS {
        return MORE_THAN_TEN_YEARS.to_string();
    }

    let (years, months, rem_days) = split_days(days);
    if years > 0 {
        if months > 0 {
            format!("{years} years {months} months")
        } else {
            format!("{years} years")
        }
    } else if months > 0 {
        if rem_days > 0 {
            format!("{months} months {rem_days} days")
        } else {
            format!("{months} months")
        }
    } else {
        format!("{rem_days} days")
    }
}

/// Split a day count into the (years, months, days) shown by [`format_days`].
/// Only two of the three components are ever non-zero.
fn split_days(days: f64) -> (i64, i64, i64) {
    let whole = days.floor() as i64;
    if days > 365.0 {
        (whole / 365, (whole % 365) / 30, 0)
    } else if days > 30.0 {
        (0, whole / 30, whole % 30)
    } else {
        (0, 0, whole)
    }
}

/// Parse a human duration back into days.
///
/// Sentinel labels and strings with no recognizable component return
/// [`NEVER`]. Years, months and days are each optional and additive.
/// A month counts as 30 days and a year as 365, so the round trip through
/// [`format_days`] is lossy: `"1 years 1 months"` parses to 395.
pub(crate) fn parse_days(s: &str) -> i64 {
    let trimmed = s.trim();
    if [NO_GROWTH, ALREADY_FULL, GROWTH_ERROR, MORE_THAN_TEN_YEARS].contains(&trimmed) {
        return NEVER;
    }

    let component = |re: &Regex| -> Option<i64> {
        re.captures(trimmed).and_then(|c| c.get(1)).and_then(|m| m.as_str().parse::<i64>().ok())
    };

    let mut days: Option<i64> = None;
    for (re, scale) in [(&*YEARS_RE, 365), (&*MONTHS_RE, 30), (&*DAYS_RE, 1)] {
        if let Some(n) = component(re) {
            days = Some(days.unwrap_or(0).saturating_add(n.saturating_mul(scale)));
        }
    }
    if let Some(days) = days {
        return days;
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => n.trunc() as i64,
        _ => NEVER,
    }
}

/// Projected time until a filesystem runs out of space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DaysUntilFull {
    /// A bounded projection, in fractional days (at most ten years).
    Finite(f64),
    /// Usage is flat, shrinking, or the estimate was discarded as noise.
    NoGrowth,
    /// No free space left.
    AlreadyFull,
    /// Growing, but more than ten years out.
    Infinite,
}

impl DaysUntilFull {
    /// Raw fractional day count for finite projections.
    pub const fn as_days(&self) -> Option<f64> {
        match self {
            Self::Finite(days) => Some(*days),
            Self::NoGrowth | Self::AlreadyFull | Self::Infinite => None,
        }
    }

    /// The whole-day count a reader recovers from [`Self::label`], i.e.
    /// `parse_days(&self.label())` without the string round trip.
    pub fn day_count(&self) -> Option<i64> {
        let days = self.as_days()?;
        if days > TEN_YEARS_DAYS {
            return None;
        }
        if days <= 0.0 {
            return Some(0);
        }
        let (years, months, rem_days) = split_days(days);
        Some(years * 365 + months * 30 + rem_days)
    }

    pub fn label(&self) -> String {
        match self {
            Self::Finite(days) => format_days(*days),
            Self::NoGrowth => NO_GROWTH.to_string(),
            Self::AlreadyFull => ALREADY_FULL.to_string(),
            Self::Infinite => MORE_THAN_TEN_YEARS.to_string(),
        }
    }

    /// Recover a projection from a rendered label (imports, old exports).
    /// Unparseable labels are treated as "never".
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            NO_GROWTH | GROWTH_ERROR => Self::NoGrowth,
            ALREADY_FULL => Self::AlreadyFull,
            MORE_THAN_TEN_YEARS => Self::Infinite,
            other => match parse_days(other) {
                NEVER => Self::Infinite,
                days => Self::Finite(days as f64),
            },
        }
    }
}

impl fmt::Display for DaysUntilFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
