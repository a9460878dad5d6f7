use super::defaults::{
    DEFAULT_COLLECT_INTERVAL_SECS, DEFAULT_CONFIG_PATH, DEFAULT_CRITICAL_THRESHOLD, DEFAULT_DB_PATH,
    DEFAULT_HOST_ID, DEFAULT_PORT, DEFAULT_PREDICTION_METHOD, DEFAULT_RETENTION_DAYS,
    DEFAULT_TIME_RANGE, DEFAULT_WARNING_THRESHOLD,
};
use crate::forecast::{FilterConfig, ForecastError, Method, Thresholds};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub port: u16,
    pub db_path: String,
    pub config_path: String,
    /// Default analysis window in days (7, 14, 30, 90, 180 or 365).
    pub time_range_days: u32,
    /// Default estimator: simple, seasonal, holt_winters, arima or ensemble.
    pub prediction_method: String,
    pub warning_threshold: f64,
    pub critical_threshold: f64,
    /// Whether the daemon samples its own mounts.
    pub collect_enabled: bool,
    pub collect_interval_secs: u64,
    /// Mount points to sample locally; empty means every real filesystem.
    pub mounts: Vec<String>,
    /// Identity under which local samples are recorded.
    pub host_id: String,
    pub host_name: String,
    pub host_groups: Vec<String>,
    pub retention_days: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            db_path: DEFAULT_DB_PATH.to_string(),
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            time_range_days: DEFAULT_TIME_RANGE,
            prediction_method: DEFAULT_PREDICTION_METHOD.to_string(),
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            collect_enabled: true,
            collect_interval_secs: DEFAULT_COLLECT_INTERVAL_SECS,
            mounts: Vec::new(),
            host_id: DEFAULT_HOST_ID.to_string(),
            host_name: detect_hostname(),
            host_groups: Vec::new(),
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

fn detect_hostname() -> String {
    fs::read_to_string("/etc/hostname")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

impl AppConfig {
    /// Load configuration, merging defaults with config file values and env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("CF_CONFIG_PATH") {
            config.config_path = path;
        }

        let cfg_path = Path::new(&config.config_path);
        if cfg_path.exists() {
            let contents = fs::read_to_string(cfg_path)
                .with_context(|| format!("Failed to read config file: {}", config.config_path))?;
            config.parse_ini(&contents);
        }

        if let Ok(path) = std::env::var("CF_DB_PATH") {
            config.db_path = path;
        }
        if let Ok(port) = std::env::var("CF_PORT") {
            config.port = port.parse().context("CF_PORT must be a valid port number")?;
        }

        config.validate()?;
        Ok(config)
    }

    /// The configured default estimator.
    pub fn method(&self) -> Result<Method, ForecastError> {
        self.prediction_method.parse()
    }

    pub fn thresholds(&self) -> Result<Thresholds, ForecastError> {
        Thresholds::new(self.warning_threshold, self.critical_threshold)
    }

    /// Analysis parameters built from the configured defaults.
    pub fn filter_config(&self) -> Result<FilterConfig, ForecastError> {
        FilterConfig::new(self.time_range_days, self.method()?, self.thresholds()?)
    }
}
