//! Application builder — wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware as axum_middleware;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use osf_core::config::AppConfig;
use osf_core::error::AppError;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::StorageProvider;
use osf_database::ProjectRepository;
use osf_service::InMemoryDownloadCounter;
use osf_storage::LocalStorageProvider;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let server = state.config.server.clone();

    build_router(state)
        .layer(DefaultBodyLimit::max(server.max_upload_size_bytes as usize))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.request_timeout_seconds),
        ))
        .layer(build_cors_layer(&server))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(request_logging))
}

/// Build state from configuration: local storage, the project repository,
/// and in-process counters.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.uploads_root).await?);

    let projects = match &config.storage.metadata_file {
        Some(path) => ProjectRepository::open(path).await?,
        None => ProjectRepository::in_memory(),
    };

    let counter: Arc<dyn DownloadCounter> = Arc::new(InMemoryDownloadCounter::new());

    Ok(AppState::new(config, storage, Arc::new(projects), counter))
}

/// Runs the server with the given configuration until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        uploads_root = %config.storage.uploads_root,
        "Starting OSF files server..."
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("OSF files server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
