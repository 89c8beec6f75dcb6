//! Route definitions for the project file HTTP API.
//!
//! All routes are mounted under `/api`. Handlers that touch a project take
//! an `Authorized<_>` extractor, so the guard chain runs before their body.

use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route bound to `state`.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(health_routes())
        .merge(project_routes())
        .merge(file_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Project creation and summary
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects", post(handlers::project::create_project))
        .route("/projects/{pid}", get(handlers::project::get_project))
}

/// Listing, upload, render, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/projects/{pid}/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route(
            "/projects/{pid}/files/paths",
            get(handlers::file::list_file_paths),
        )
        .route(
            "/projects/{pid}/files/{name}",
            get(handlers::file::view_file).delete(handlers::file::delete_file),
        )
        .route(
            "/projects/{pid}/files/{name}/download",
            get(handlers::file::download_file),
        )
        .route(
            "/projects/{pid}/files/{name}/download/version/{vid}",
            get(handlers::file::download_file_by_version),
        )
}
