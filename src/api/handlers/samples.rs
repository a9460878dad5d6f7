use crate::api::responses::{ApiResponse, IngestResponse, SampleRequest};
use crate::db::Observation;
use crate::events::Event;
use crate::forecast::FilesystemRecord;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub(crate) async fn ingest_samples(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<Vec<SampleRequest>>,
) -> impl IntoResponse {
    let now = chrono::Utc::now().timestamp();
    let received = batch.len();
    let mut observations = Vec::with_capacity(received);
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for item in batch {
        let host_id = item.host_id.trim().to_string();
        if host_id.is_empty() {
            continue;
        }
        if let Some(g) = item.groups {
            groups.insert(host_id.clone(), g);
        }
        let host_name = item.host_name.unwrap_or_else(|| host_id.clone());
        let Some(record) = FilesystemRecord::from_metrics(
            host_id,
            host_name,
            item.mount.unwrap_or_default(),
            item.total_bytes,
            item.used_bytes,
            item.pused,
        ) else {
            continue;
        };
        observations.push(Observation {
            record,
            fs_type: None,
            timestamp: item.timestamp.unwrap_or(now),
        });
    }

    let dropped = received - observations.len();
    if dropped > 0 {
        debug!("Dropped {} sample(s) without usable totals", dropped);
    }

    for (host_id, group_ids) in &groups {
        if let Err(e) = state.db.set_host_groups(host_id, group_ids) {
            return Json(ApiResponse::<IngestResponse>::err(format!(
                "Failed to update groups for {host_id}: {e}"
            )));
        }
    }

    let recorded = match state.db.record_observations(&observations) {
        Ok(n) => n,
        Err(e) => {
            return Json(ApiResponse::<IngestResponse>::err(format!("Failed to record samples: {e}")));
        }
    };

    info!("Ingested {} sample(s), dropped {}", recorded, dropped);

    let mut per_host: BTreeMap<&str, usize> = BTreeMap::new();
    for obs in &observations {
        *per_host.entry(obs.record.host_id.as_str()).or_default() += 1;
    }
    for (host_id, filesystems) in per_host {
        let _ = state.event_hub.publish(Event::SamplesRecorded {
            host_id: host_id.to_string(),
            filesystems,
            clock: now,
        });
    }

    Json(ApiResponse::ok(IngestResponse { recorded, dropped }))
}
