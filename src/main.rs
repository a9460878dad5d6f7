use anyhow::Result;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

mod api;
mod collector;
mod config;
mod db;
mod events;
mod forecast;
mod state;

#[cfg(test)]
mod tests;

use config::AppConfig;
use db::Database;
use events::EventHub;
pub use state::{AppState, DaemonState, DaemonStatus};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "capacity_forecast=info,tower_http=info".into()),
        )
        .init();

    info!("capacity-forecast v{} starting up", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: port={}, db_path={}, method={}, range={}d",
        config.port, config.db_path, config.prediction_method, config.time_range_days
    );

    let db = Database::open(&config.db_path)?;
    db.run_migrations()?;
    info!("Database initialized at {}", config.db_path);

    let event_hub = EventHub::new(256);
    let state = Arc::new(AppState::new(db, config.clone(), event_hub));

    let collector = if config.collect_enabled {
        let token = state.shutdown.child_token();
        Some(tokio::spawn(collector::run_collector(Arc::clone(&state), token)))
    } else {
        info!("Local collection disabled");
        None
    };

    let app = api::router(Arc::clone(&state));

    let bind_addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    state.shutdown.cancel();
    if let Some(handle) = collector {
        if let Err(e) = handle.await {
            warn!("Collector task ended abnormally: {e}");
        }
    }

    info!("capacity-forecast shut down cleanly");
    Ok(())
}

/// Wait for SIGTERM or SIGINT for graceful shutdown.
#[allow(clippy::expect_used)]
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { warn!("Received Ctrl+C, shutting down..."); },
        () = terminate => { warn!("Received SIGTERM, shutting down..."); },
    }
}
