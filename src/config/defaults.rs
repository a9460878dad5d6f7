/// Default path of the KEY="VALUE" config file.
pub(super) const DEFAULT_CONFIG_PATH: &str = "/etc/capacity-forecast/capacity-forecast.cfg";

/// Default path for the SQLite history store.
pub(super) const DEFAULT_DB_PATH: &str = "/var/lib/capacity-forecast/history.db";

/// Default port the daemon listens on (localhost only).
pub(super) const DEFAULT_PORT: u16 = 7092;

/// Default analysis window in days.
pub(super) const DEFAULT_TIME_RANGE: u32 = 30;

/// Default growth estimation algorithm.
pub(super) const DEFAULT_PREDICTION_METHOD: &str = "seasonal";

/// Default usage percentage that raises a warning.
pub(super) const DEFAULT_WARNING_THRESHOLD: f64 = 80.0;

/// Default usage percentage that raises a critical status.
pub(super) const DEFAULT_CRITICAL_THRESHOLD: f64 = 90.0;

/// Default interval between local collector runs (one hour).
pub(super) const DEFAULT_COLLECT_INTERVAL_SECS: u64 = 3600;

/// Samples older than this are pruned (a year plus headroom for the
/// longest analysis window).
pub(super) const DEFAULT_RETENTION_DAYS: u32 = 400;

/// Host id reported for local mounts when none is configured.
pub(super) const DEFAULT_HOST_ID: &str = "local";
