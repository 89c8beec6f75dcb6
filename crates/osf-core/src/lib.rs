//! # osf-core
//!
//! Core crate for the project file service. Contains configuration schemas,
//! typed identifiers, the collaborator traits (storage, download counters),
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
