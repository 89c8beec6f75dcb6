//! Project and component management.

pub mod service;

pub use service::{ProjectService, ProjectSummary};
