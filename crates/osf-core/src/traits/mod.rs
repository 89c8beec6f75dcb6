//! Collaborator traits defined in `osf-core` and implemented by other crates.

pub mod counter;
pub mod storage;

pub use counter::{CounterSnapshot, DownloadCounter};
pub use storage::StorageProvider;
