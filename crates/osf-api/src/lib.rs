//! # osf-api
//!
//! HTTP API layer for project files built on Axum.
//!
//! Provides the REST endpoints, the guard-chain extractors that authorize a
//! request before its handler runs, request logging, CORS, and the mapping
//! from [`osf_core::AppError`] to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
