use crate::api::responses::ApiResponse;
use crate::{collector, AppState};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// Sample local mounts immediately, outside the collector schedule.
pub(crate) async fn trigger_collect(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match collector::collect_now(state).await {
        Ok(recorded) => Json(ApiResponse::ok(recorded)),
        Err(e) => Json(ApiResponse::<usize>::err(format!("{e:#}"))),
    }
}
