use thiserror::Error;

/// Caller contract violations detected by the prediction engine.
///
/// Short or missing history is never an error; it degrades to an
/// insufficient-data forecast instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    #[error("unknown prediction method '{0}' (expected simple, seasonal, holt_winters, arima or ensemble)")]
    InvalidMethod(String),

    #[error("{name} threshold must be between 0 and 100, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("time range must be one of 7, 14, 30, 90, 180 or 365 days, got {0}")]
    InvalidTimeRange(u32),
}
