use super::settings::AppConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

fn parse_list(value: &str) -> Vec<String> {
    value.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect()
}

fn parse_bool(value: &str) -> bool {
    value == "yes" || value == "true" || value == "1"
}

impl AppConfig {
    /// Parse the simple KEY="VALUE" config format. Unknown keys and
    /// unparseable numbers are ignored; `validate()` catches the rest.
    pub(crate) fn parse_ini(&mut self, contents: &str) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"');

                match key {
                    "PORT" => {
                        if let Ok(v) = value.parse() {
                            self.port = v;
                        }
                    }
                    "DB_PATH" => self.db_path = value.to_string(),
                    "TIME_RANGE" => {
                        if let Ok(v) = value.parse() {
                            self.time_range_days = v;
                        }
                    }
                    "PREDICTION_METHOD" => self.prediction_method = value.to_string(),
                    "WARNING_THRESHOLD" => {
                        if let Ok(v) = value.parse() {
                            self.warning_threshold = v;
                        }
                    }
                    "CRITICAL_THRESHOLD" => {
                        if let Ok(v) = value.parse() {
                            self.critical_threshold = v;
                        }
                    }
                    "COLLECT_ENABLED" => self.collect_enabled = parse_bool(value),
                    "COLLECT_INTERVAL" => {
                        if let Ok(v) = value.parse() {
                            self.collect_interval_secs = v;
                        }
                    }
                    "MOUNTS" => self.mounts = parse_list(value),
                    "HOST_ID" => self.host_id = value.to_string(),
                    "HOST_NAME" => self.host_name = value.to_string(),
                    "HOST_GROUPS" => self.host_groups = parse_list(value),
                    "RETENTION_DAYS" => {
                        if let Ok(v) = value.parse() {
                            self.retention_days = v;
                        }
                    }
                    _ => {} // Ignore unknown keys
                }
            }
        }
    }

    /// Save current config back to the KEY="VALUE" file.
    pub fn save(&self) -> Result<()> {
        let contents = format!(
            r#"# capacity-forecast configuration
# Auto-generated, edit via the settings API
PORT="{}"
DB_PATH="{}"
TIME_RANGE="{}"
PREDICTION_METHOD="{}"
WARNING_THRESHOLD="{}"
CRITICAL_THRESHOLD="{}"
COLLECT_ENABLED="{}"
COLLECT_INTERVAL="{}"
MOUNTS="{}"
HOST_ID="{}"
HOST_NAME="{}"
HOST_GROUPS="{}"
RETENTION_DAYS="{}"
"#,
            self.port,
            self.db_path,
            self.time_range_days,
            self.prediction_method,
            self.warning_threshold,
            self.critical_threshold,
            if self.collect_enabled { "yes" } else { "no" },
            self.collect_interval_secs,
            self.mounts.join(","),
            self.host_id,
            self.host_name,
            self.host_groups.join(","),
            self.retention_days,
        );

        if let Some(parent) = Path::new(&self.config_path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.config_path, contents)
            .with_context(|| format!("Failed to write config to {}", self.config_path))?;

        Ok(())
    }
}
