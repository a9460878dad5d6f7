use crate::api::responses::{AnalyzeRequest, ApiResponse};
use crate::events::Event;
use crate::forecast::{run_analysis, Analysis};
use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::error;

pub(crate) async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    let (filter, config) = match req.resolve(&state.config) {
        Ok(resolved) => resolved,
        Err(e) => return Json(ApiResponse::<Analysis>::err(format!("Invalid analysis request: {e}"))),
    };

    let worker = Arc::clone(&state);
    let joined = tokio::task::spawn_blocking(move || {
        run_analysis(&worker.db, &filter, &config, chrono::Utc::now())
    })
    .await;

    let analysis = match joined {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(e)) => {
            error!("Analysis failed: {e:#}");
            return Json(ApiResponse::<Analysis>::err(format!("Analysis failed: {e}")));
        }
        Err(e) => {
            error!("Analysis task panicked: {e}");
            return Json(ApiResponse::<Analysis>::err("Analysis task failed"));
        }
    };

    let _ = state.event_hub.publish(Event::AnalysisComplete {
        analysis_id: analysis.analysis_id,
        filesystems: analysis.summary.total_filesystems,
        critical: analysis.summary.critical_count,
        warning: analysis.summary.warning_count,
    });

    Json(ApiResponse::ok(analysis))
}
