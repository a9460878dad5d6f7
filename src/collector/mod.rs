//! Local sampling of this host's own mounts.

pub(crate) mod discovery;
pub(crate) mod disk_space;
pub(crate) mod sampler;

pub(crate) use sampler::{collect_now, run_collector};
