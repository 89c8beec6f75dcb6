//! File domain entities.

pub mod record;
pub mod version;

pub use record::{FileRecord, split_extension};
pub use version::{VersionList, file_key};
