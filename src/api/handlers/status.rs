use crate::api::responses::{ApiResponse, StatusResponse};
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub(crate) async fn get_status(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (filesystems, samples) = match inventory_counts(&state) {
        Ok(counts) => counts,
        Err(e) => {
            return Json(ApiResponse::<StatusResponse>::err(format!("Failed to read counts: {e}")));
        }
    };

    let status = state.status.read().await;
    Json(ApiResponse::ok(StatusResponse {
        state: status.state,
        detail: status.detail.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        filesystems,
        samples,
    }))
}

fn inventory_counts(state: &AppState) -> anyhow::Result<(usize, i64)> {
    Ok((state.db.filesystem_count()?, state.db.sample_count()?))
}
