//! File services: version history, rendering, downloads, uploads, listing.

pub mod download;
pub mod info;
pub mod preview;
pub mod service;
pub mod upload;
pub mod version;

#[cfg(test)]
pub(crate) mod fixtures;

pub use download::{ContentSource, DownloadResult, DownloadService};
pub use info::FileInfo;
pub use preview::{FileView, PreviewService, Renderer};
pub use service::{FilePaths, FileService};
pub use upload::{UploadOutcome, UploadService};
pub use version::{DisplayNumber, VersionEntry, VersionService};
