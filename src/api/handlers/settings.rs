use crate::api::responses::{ApiResponse, SettingsUpdateRequest};
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

pub(crate) async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.config.clone()))
}

pub(crate) async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SettingsUpdateRequest>,
) -> impl IntoResponse {
    let mut config = state.config.clone();
    req.apply(&mut config);

    if let Err(e) = config.validate() {
        return Json(ApiResponse::<&str>::err(format!("Invalid settings: {e:#}")));
    }

    match config.save() {
        Ok(()) => Json(ApiResponse::ok("Settings saved (restart to apply)")),
        Err(e) => Json(ApiResponse::<&str>::err(format!("Failed to save settings: {e}"))),
    }
}
