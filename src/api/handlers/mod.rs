mod analyze;
mod collect;
mod filesystems;
mod samples;
mod settings;
mod sse;
mod status;

pub(super) use analyze::analyze;
pub(super) use collect::trigger_collect;
pub(super) use filesystems::get_filesystems;
pub(super) use samples::ingest_samples;
pub(super) use settings::{get_settings, update_settings};
pub(super) use sse::sse_events;
pub(super) use status::get_status;
