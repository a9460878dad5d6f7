//! Daily growth estimation from an ordered usage time series.
//!
//! Every algorithm degrades to an insufficient-data estimate (zero growth,
//! zero confidence, stable) when the series is shorter than it needs.
//!
//! Seasonal, Holt-Winters and ARIMA run on the series collapsed to one point
//! per UTC day, so their rates are per day whatever the sampling interval.

use super::calculator::determine_trend;
use super::error::ForecastError;
use super::stats::{coverage_confidence, mean, model_confidence};
use super::types::{Sample, Trend, GROWTH_SANITY_CAP, SECONDS_PER_DAY};
use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Holt-Winters level smoothing.
const HW_ALPHA: f64 = 0.3;
/// Holt-Winters trend smoothing.
const HW_BETA: f64 = 0.1;
/// Holt-Winters seasonal smoothing.
const HW_GAMMA: f64 = 0.2;
const SEASON_LENGTH: usize = 7;
const DAY_SECS: i64 = 86_400;

/// Sub-estimates at or below this confidence are left out of the ensemble.
const ENSEMBLE_MIN_CONFIDENCE: u8 = 50;

type Strategy = fn(&[Sample], u32) -> Estimate;

/// Ensemble members with their base weights.
const ENSEMBLE_STRATEGIES: [(Method, f64, Strategy); 3] = [
    (Method::Simple, 0.2, estimate_simple),
    (Method::Seasonal, 0.3, estimate_seasonal),
    (Method::HoltWinters, 0.5, estimate_holt_winters),
];

/// Growth estimation algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Simple,
    Seasonal,
    HoltWinters,
    Arima,
    Ensemble,
}

impl Method {
    pub const ALL: [Self; 5] =
        [Self::Simple, Self::Seasonal, Self::HoltWinters, Self::Arima, Self::Ensemble];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Seasonal => "seasonal",
            Self::HoltWinters => "holt_winters",
            Self::Arima => "arima",
            Self::Ensemble => "ensemble",
        }
    }

    /// Fewest samples the algorithm accepts before reporting insufficient data.
    /// Seasonal, Holt-Winters and ARIMA count distinct UTC days.
    pub const fn min_samples(self) -> usize {
        match self {
            Self::Simple | Self::Ensemble => 2,
            Self::Seasonal => SEASON_LENGTH,
            Self::Arima => 10,
            Self::HoltWinters => SEASON_LENGTH * 2,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s.trim())
            .ok_or_else(|| ForecastError::InvalidMethod(s.to_string()))
    }
}

/// Algorithm-specific internals, surfaced for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateDetail {
    Seasonal {
        /// Mean usage per UTC weekday, Monday first; `None` for empty buckets.
        weekday_means: [Option<f64>; 7],
    },
    HoltWinters {
        level: f64,
        trend: f64,
        forecast: f64,
    },
    Arima {
        mean_difference: f64,
        differences: usize,
    },
    Ensemble {
        components: Vec<EnsembleComponent>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleComponent {
    pub algorithm: Method,
    pub daily_growth_bytes: f64,
    pub confidence: u8,
    pub weight: f64,
    pub included: bool,
}

/// Output of one estimator run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub daily_growth_bytes: f64,
    pub trend: Trend,
    /// Heuristic 0-100 score, not a statistical interval.
    pub confidence: u8,
    pub algorithm: Method,
    /// Set when the series was too short for the algorithm.
    pub insufficient_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<EstimateDetail>,
}

impl Estimate {
    pub(crate) const fn insufficient(algorithm: Method) -> Self {
        Self {
            daily_growth_bytes: 0.0,
            trend: Trend::Stable,
            confidence: 0,
            algorithm,
            insufficient_data: true,
            detail: None,
        }
    }

    fn new(
        algorithm: Method,
        daily_growth_bytes: f64,
        confidence: u8,
        detail: Option<EstimateDetail>,
    ) -> Self {
        Self {
            daily_growth_bytes,
            trend: determine_trend(daily_growth_bytes),
            confidence: confidence.min(100),
            algorithm,
            insufficient_data: false,
            detail,
        }
    }
}

/// Estimate daily growth for `samples` (ascending by timestamp) over a
/// `window_days` analysis window.
pub(crate) fn estimate(samples: &[Sample], window_days: u32, method: Method) -> Estimate {
    if samples.len() < 2 {
        return Estimate::insufficient(method);
    }
    match method {
        Method::Simple => estimate_simple(samples, window_days),
        Method::Seasonal => estimate_seasonal(samples, window_days),
        Method::HoltWinters => estimate_holt_winters(samples, window_days),
        Method::Arima => estimate_arima(samples, window_days),
        Method::Ensemble => estimate_ensemble(samples, window_days),
    }
}

/// Forces implausible rates to zero.
fn cap_glitch(growth: f64) -> f64 {
    if growth.abs() > GROWTH_SANITY_CAP || !growth.is_finite() {
        0.0
    } else {
        growth
    }
}

/// First-to-last slope per day.
pub(crate) fn estimate_simple(samples: &[Sample], window_days: u32) -> Estimate {
    let (Some(first), Some(last)) = (samples.first(), samples.last()) else {
        return Estimate::insufficient(Method::Simple);
    };
    if samples.len() < Method::Simple.min_samples() {
        return Estimate::insufficient(Method::Simple);
    }

    let span_days = ((last.timestamp - first.timestamp) as f64 / SECONDS_PER_DAY).max(1.0);
    let growth = cap_glitch((last.value - first.value) / span_days);

    Estimate::new(Method::Simple, growth, coverage_confidence(samples.len(), window_days), None)
}

fn weekday_index(timestamp: i64) -> usize {
    DateTime::from_timestamp(timestamp, 0).map_or_else(
        // Outside chrono's range: 1970-01-01 was a Thursday.
        || (timestamp.div_euclid(DAY_SECS) + 3).rem_euclid(7) as usize,
        |dt| dt.weekday().num_days_from_monday() as usize,
    )
}

/// Collapse an ascending series to the last sample of each UTC day, stamped
/// at that day's midnight.
pub(crate) fn daily_series(samples: &[Sample]) -> Vec<Sample> {
    let mut days: Vec<Sample> = Vec::with_capacity(samples.len());
    for s in samples {
        let midnight = s.timestamp.div_euclid(DAY_SECS) * DAY_SECS;
        match days.last_mut() {
            Some(last) if last.timestamp == midnight => last.value = s.value,
            _ => days.push(Sample::new(midnight, s.value)),
        }
    }
    days
}

fn days_between(earlier: &Sample, later: &Sample) -> f64 {
    ((later.timestamp - earlier.timestamp) as f64 / SECONDS_PER_DAY).max(1.0)
}

/// Slope over weekday-deseasonalized daily values.
pub(crate) fn estimate_seasonal(samples: &[Sample], window_days: u32) -> Estimate {
    let days = daily_series(samples);
    let (Some(first), Some(last)) = (days.first(), days.last()) else {
        return Estimate::insufficient(Method::Seasonal);
    };
    if days.len() < Method::Seasonal.min_samples() {
        return Estimate::insufficient(Method::Seasonal);
    }

    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];
    for s in &days {
        let day = weekday_index(s.timestamp);
        sums[day] += s.value;
        counts[day] += 1;
    }
    let weekday_means: [Option<f64>; 7] =
        std::array::from_fn(|d| (counts[d] > 0).then(|| sums[d] / counts[d] as f64));

    let deseasonalize =
        |s: &Sample| s.value - weekday_means[weekday_index(s.timestamp)].unwrap_or(0.0);

    let rise = deseasonalize(last) - deseasonalize(first);
    let growth = cap_glitch(rise / days_between(first, last));

    Estimate::new(
        Method::Seasonal,
        growth,
        coverage_confidence(days.len(), window_days),
        Some(EstimateDetail::Seasonal { weekday_means }),
    )
}

/// Triple exponential smoothing over daily values (multiplicative
/// seasonality, one factor per weekday).
pub(crate) fn estimate_holt_winters(samples: &[Sample], _window_days: u32) -> Estimate {
    let days = daily_series(samples);
    let Some(last) = days.last() else {
        return Estimate::insufficient(Method::HoltWinters);
    };
    if days.len() < Method::HoltWinters.min_samples() {
        return Estimate::insufficient(Method::HoltWinters);
    }

    let mut level = days[0].value;
    let mut trend = 0.0_f64;
    let mut seasonal = [1.0_f64; SEASON_LENGTH];
    if level != 0.0 {
        for s in days.iter().take(SEASON_LENGTH) {
            seasonal[weekday_index(s.timestamp)] = s.value / level;
        }
    }

    for s in days.iter().skip(1) {
        let slot = weekday_index(s.timestamp);
        let v = s.value;
        let prev_level = level;
        let deseasoned = if seasonal[slot] == 0.0 { v } else { v / seasonal[slot] };

        level = HW_ALPHA * deseasoned + (1.0 - HW_ALPHA) * (prev_level + trend);
        trend = HW_BETA * (level - prev_level) + (1.0 - HW_BETA) * trend;
        if level != 0.0 {
            seasonal[slot] = HW_GAMMA * (v / level) + (1.0 - HW_GAMMA) * seasonal[slot];
        }
    }

    let forecast = (level + trend) * seasonal[weekday_index(last.timestamp + DAY_SECS)];
    // A forecast below the last observation reads as stable, not shrinking.
    let growth = (forecast - last.value).max(0.0);
    let growth = if growth.is_finite() { growth } else { 0.0 };

    let values: Vec<f64> = days.iter().map(|s| s.value).collect();
    Estimate::new(
        Method::HoltWinters,
        growth,
        model_confidence(&values),
        Some(EstimateDetail::HoltWinters { level, trend, forecast }),
    )
}

/// Mean of first differences of daily values, each scaled to one day
/// (AR(1) with one differencing, simplified).
pub(crate) fn estimate_arima(samples: &[Sample], window_days: u32) -> Estimate {
    let days = daily_series(samples);
    if days.len() < Method::Arima.min_samples() {
        return Estimate::insufficient(Method::Arima);
    }

    let differences: Vec<f64> =
        days.windows(2).map(|w| (w[1].value - w[0].value) / days_between(&w[0], &w[1])).collect();
    let mean_difference = mean(&differences);

    Estimate::new(
        Method::Arima,
        mean_difference.max(0.0),
        coverage_confidence(days.len(), window_days),
        Some(EstimateDetail::Arima { mean_difference, differences: differences.len() }),
    )
}

/// Confidence-weighted blend of simple, seasonal and Holt-Winters.
pub(crate) fn estimate_ensemble(samples: &[Sample], window_days: u32) -> Estimate {
    if samples.len() < Method::Ensemble.min_samples() {
        return Estimate::insufficient(Method::Ensemble);
    }

    let components: Vec<EnsembleComponent> = ENSEMBLE_STRATEGIES
        .iter()
        .map(|&(algorithm, weight, strategy)| {
            let sub = strategy(samples, window_days);
            EnsembleComponent {
                algorithm,
                daily_growth_bytes: sub.daily_growth_bytes,
                confidence: sub.confidence,
                weight,
                included: sub.confidence > ENSEMBLE_MIN_CONFIDENCE,
            }
        })
        .collect();

    let included: Vec<&EnsembleComponent> = components.iter().filter(|c| c.included).collect();
    if included.is_empty() {
        return Estimate::new(
            Method::Ensemble,
            0.0,
            0,
            Some(EstimateDetail::Ensemble { components }),
        );
    }

    let mut weighted_growth = 0.0;
    let mut weight_total = 0.0;
    for c in &included {
        let w = c.weight * f64::from(c.confidence) / 100.0;
        weighted_growth += w * c.daily_growth_bytes;
        weight_total += w;
    }
    let growth = if weight_total > 0.0 { weighted_growth / weight_total } else { 0.0 };

    let confidences: Vec<f64> = included.iter().map(|c| f64::from(c.confidence)).collect();
    let confidence = mean(&confidences).round() as u8;

    Estimate::new(
        Method::Ensemble,
        growth,
        confidence,
        Some(EstimateDetail::Ensemble { components }),
    )
}
