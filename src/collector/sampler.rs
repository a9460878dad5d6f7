use super::discovery::{discover_mounts, read_mount_table, MountEntry};
use super::disk_space::get_disk_space;
use crate::config::AppConfig;
use crate::db::Observation;
use crate::events::Event;
use crate::forecast::FilesystemRecord;
use crate::{AppState, DaemonState, DaemonStatus};
use anyhow::{anyhow, bail, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Measure every selected mount once. Mounts that fail `statvfs` or report
/// zero capacity are skipped.
pub(crate) fn sample_local(config: &AppConfig, table: &[MountEntry], timestamp: i64) -> Vec<Observation> {
    discover_mounts(table, &config.mounts)
        .into_iter()
        .filter_map(|entry| {
            let space = match get_disk_space(&entry.mount) {
                Ok(space) => space,
                Err(e) => {
                    warn!("Skipping {}: {}", entry.mount, e);
                    return None;
                }
            };
            if space.total == 0 {
                debug!("Skipping {}: zero capacity", entry.mount);
                return None;
            }
            let record = FilesystemRecord::new(
                config.host_id.clone(),
                config.host_name.clone(),
                entry.mount,
                space.total as f64,
                space.used as f64,
            );
            let fs_type = (!entry.fs_type.is_empty()).then_some(entry.fs_type);
            Some(Observation { record, fs_type, timestamp })
        })
        .collect()
}

/// Sample, store, refresh group membership and apply retention.
fn collect_once(state: &AppState) -> Result<usize> {
    let config = &state.config;
    let table = read_mount_table().unwrap_or_else(|e| {
        warn!("{e:#}");
        Vec::new()
    });
    let now = chrono::Utc::now().timestamp();

    let observations = sample_local(config, &table, now);
    let recorded = state.db.record_observations(&observations)?;
    state.db.set_host_groups(&config.host_id, &config.host_groups)?;

    let cutoff = now - i64::from(config.retention_days) * 86_400;
    state.db.prune_samples(cutoff)?;

    Ok(recorded)
}

/// Run one collection pass on the blocking pool. Refused while another pass
/// is in flight.
pub(crate) async fn collect_now(state: Arc<AppState>) -> Result<usize> {
    {
        let mut status = state.status.write().await;
        if status.state != DaemonState::Idle {
            bail!("Cannot collect: daemon is currently {:?}", status.state);
        }
        *status = DaemonStatus::collecting(format!("Sampling {}", state.config.host_id));
    }

    let worker = Arc::clone(&state);
    let result = match tokio::task::spawn_blocking(move || collect_once(&worker)).await {
        Ok(result) => result,
        Err(e) => Err(anyhow!("Collector task failed: {e}")),
    };

    *state.status.write().await = DaemonStatus::idle();

    match &result {
        Ok(recorded) => {
            info!("Recorded {} local sample(s)", recorded);
            let _ = state.event_hub.publish(Event::SamplesRecorded {
                host_id: state.config.host_id.clone(),
                filesystems: *recorded,
                clock: chrono::Utc::now().timestamp(),
            });
        }
        Err(e) => {
            error!("Collection failed: {e:#}");
            let _ = state
                .event_hub
                .publish(Event::CollectorError { message: format!("Collection failed: {e}") });
        }
    }

    result
}

/// Periodic local sampling until `cancel` fires. The first pass runs
/// immediately.
pub(crate) async fn run_collector(state: Arc<AppState>, cancel: CancellationToken) {
    let period = Duration::from_secs(state.config.collect_interval_secs);
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Collector started: every {}s, host_id={}", period.as_secs(), state.config.host_id);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!("Collector stopped");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = collect_now(Arc::clone(&state)).await {
                    debug!("Scheduled collection did not complete: {e:#}");
                }
            }
        }
    }
}
