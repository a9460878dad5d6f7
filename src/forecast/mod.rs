//! Capacity prediction engine: growth estimation, time-to-full, status
//! classification and fleet aggregation.
//!
//! Pure and synchronous. History and inventory arrive through the traits in
//! [`analyze`]; nothing here performs I/O.

pub(crate) mod analyze;
pub(crate) mod bytes;
pub(crate) mod calculator;
pub(crate) mod duration;
mod error;
pub(crate) mod estimator;
pub(crate) mod stats;
pub(crate) mod status;
pub(crate) mod summary;
mod types;

pub(crate) use analyze::{
    analyze, run_analysis, Analysis, FilterConfig, HistorySource, HostGroupLookup, InventoryFilter,
    InventorySource,
};
pub(crate) use duration::DaysUntilFull;
pub(crate) use error::ForecastError;
pub(crate) use estimator::Method;
pub(crate) use status::{Status, Thresholds};
pub(crate) use types::{FilesystemRecord, ItemKey, Sample, Trend};
