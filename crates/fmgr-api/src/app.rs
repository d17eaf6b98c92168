//! Application wiring: opens the stores, builds state, and serves HTTP.

use std::future::Future;

use tracing::info;

use fmgr_core::config::AppConfig;
use fmgr_core::error::AppError;
use fmgr_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Open the configured backend and wire every service.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(backend = %config.database.backend, "Opening stores");
    let stores = Stores::from_config(&config.database).await?;
    Ok(AppState::new(config, stores))
}

/// Run the HTTP server until `shutdown` resolves.
pub async fn run_server<F>(config: AppConfig, shutdown: F) -> Result<(), AppError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config).await?;
    let stores = state.stores.clone();
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("fmgr server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    stores.close().await;
    info!("fmgr server shut down gracefully");
    Ok(())
}
