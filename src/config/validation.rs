use super::settings::AppConfig;
use anyhow::{Context, Result};

impl AppConfig {
    /// Validate configuration values are sane.
    pub(crate) fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.port > 0, "Port must be > 0");
        anyhow::ensure!(!self.host_id.trim().is_empty(), "host_id must not be empty");
        anyhow::ensure!(
            self.collect_interval_secs >= 60,
            "collect_interval_secs must be at least 60"
        );
        anyhow::ensure!(
            self.retention_days >= self.time_range_days,
            "retention_days must cover the analysis window ({} days)",
            self.time_range_days
        );
        self.filter_config().context("Invalid analysis defaults")?;
        Ok(())
    }
}
