use crate::config::AppConfig;
use crate::forecast::{FilterConfig, ForecastError, InventoryFilter, Thresholds};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub(crate) const fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub(crate) fn err(msg: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(msg.into()) }
    }
}

/// One element of the POST /api/samples body. Any two of `total_bytes`,
/// `used_bytes` and `pused` are enough to establish usage.
#[derive(Debug, Deserialize)]
pub(crate) struct SampleRequest {
    pub host_id: String,
    pub host_name: Option<String>,
    pub mount: Option<String>,
    pub total_bytes: Option<f64>,
    pub used_bytes: Option<f64>,
    pub pused: Option<f64>,
    /// Seconds since the epoch; defaults to the time of receipt.
    pub timestamp: Option<i64>,
    /// Replaces the host's group memberships when present.
    pub groups: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IngestResponse {
    pub recorded: usize,
    pub dropped: usize,
}

/// Request body for POST /api/analyze. Omitted fields fall back to the
/// configured defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AnalyzeRequest {
    pub host_ids: Vec<String>,
    pub group_ids: Vec<String>,
    /// Case-insensitive host name substring.
    pub host: Option<String>,
    pub time_range: Option<u32>,
    pub prediction_method: Option<String>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
}

impl AnalyzeRequest {
    /// Merge with configured defaults and validate.
    pub(crate) fn resolve(
        self,
        config: &AppConfig,
    ) -> Result<(InventoryFilter, FilterConfig), ForecastError> {
        let method = match self.prediction_method.as_deref() {
            Some(name) => name.parse()?,
            None => config.method()?,
        };
        let thresholds = Thresholds::new(
            self.warning_threshold.unwrap_or(config.warning_threshold),
            self.critical_threshold.unwrap_or(config.critical_threshold),
        )?;
        let filter_config =
            FilterConfig::new(self.time_range.unwrap_or(config.time_range_days), method, thresholds)?;

        let filter = InventoryFilter {
            host_ids: self.host_ids,
            group_ids: self.group_ids,
            host_name_substring: self.host.filter(|h| !h.trim().is_empty()),
        };
        Ok((filter, filter_config))
    }
}

/// Request body for POST /api/settings.
#[derive(Debug, Deserialize)]
pub(crate) struct SettingsUpdateRequest {
    pub time_range_days: Option<u32>,
    pub prediction_method: Option<String>,
    pub warning_threshold: Option<f64>,
    pub critical_threshold: Option<f64>,
    pub collect_enabled: Option<bool>,
    pub collect_interval_secs: Option<u64>,
    pub mounts: Option<Vec<String>>,
    pub host_name: Option<String>,
    pub host_groups: Option<Vec<String>>,
    pub retention_days: Option<u32>,
}

impl SettingsUpdateRequest {
    pub(crate) fn apply(self, config: &mut AppConfig) {
        if let Some(v) = self.time_range_days {
            config.time_range_days = v;
        }
        if let Some(v) = self.prediction_method {
            config.prediction_method = v;
        }
        if let Some(v) = self.warning_threshold {
            config.warning_threshold = v;
        }
        if let Some(v) = self.critical_threshold {
            config.critical_threshold = v;
        }
        if let Some(v) = self.collect_enabled {
            config.collect_enabled = v;
        }
        if let Some(v) = self.collect_interval_secs {
            config.collect_interval_secs = v;
        }
        if let Some(v) = self.mounts {
            config.mounts = v;
        }
        if let Some(v) = self.host_name {
            config.host_name = v;
        }
        if let Some(v) = self.host_groups {
            config.host_groups = v;
        }
        if let Some(v) = self.retention_days {
            config.retention_days = v;
        }
    }
}

/// Daemon status returned by the status endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct StatusResponse {
    pub state: crate::DaemonState,
    pub detail: Option<String>,
    pub version: String,
    pub filesystems: usize,
    pub samples: i64,
}
