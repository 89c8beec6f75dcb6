//! # osf-service
//!
//! Business logic for versioned project files. Each service orchestrates
//! the project repository, the storage provider, and the injected download
//! counter to implement one use case.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Authorization has already
//! been decided by the guard chain when a service method runs.

pub mod counter;
pub mod file;
pub mod format;
pub mod project;
pub mod render;
pub mod sanitize;
pub mod urls;

pub use counter::InMemoryDownloadCounter;
pub use file::{DownloadService, FileService, PreviewService, UploadService, VersionService};
pub use project::ProjectService;
