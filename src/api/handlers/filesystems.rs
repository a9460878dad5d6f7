use crate::api::responses::ApiResponse;
use crate::db::Filesystem;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub(crate) async fn get_filesystems(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.db.get_all_filesystems() {
        Ok(filesystems) => Json(ApiResponse::ok(filesystems)),
        Err(e) => Json(ApiResponse::<Vec<Filesystem>>::err(format!("Failed to get filesystems: {e}"))),
    }
}
