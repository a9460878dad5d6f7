use crate::forecast::FilesystemRecord;
use serde::{Deserialize, Serialize};

/// A tracked mount as stored in the inventory table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filesystem {
    pub id: i64,
    pub host_id: String,
    pub host_name: String,
    pub mount: String,
    pub total_bytes: f64,
    pub used_bytes: f64,
    pub fs_type: Option<String>,
    pub updated_at: Option<String>,
}

impl Filesystem {
    pub fn record(&self) -> FilesystemRecord {
        FilesystemRecord::new(
            self.host_id.clone(),
            self.host_name.clone(),
            self.mount.clone(),
            self.total_bytes,
            self.used_bytes,
        )
    }
}

/// One measurement to append: refreshes the inventory row and adds a
/// history sample whose value is `used_bytes`.
#[derive(Debug, Clone)]
pub struct Observation {
    pub record: FilesystemRecord,
    pub fs_type: Option<String>,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
}
