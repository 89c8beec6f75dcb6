//! File record entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use osf_core::types::{FileRecordId, ProjectId};

use crate::user::UserRef;

/// One immutable uploaded revision of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Unique record identifier.
    pub id: FileRecordId,
    /// The project that owns this record.
    pub project_id: ProjectId,
    /// The (sanitized) file name as uploaded.
    pub path: String,
    /// Content size in bytes.
    pub size_bytes: u64,
    /// MIME type reported at upload.
    pub content_type: String,
    /// The user who uploaded this revision.
    pub uploader: UserRef,
    /// When this revision was uploaded.
    pub created_at: DateTime<Utc>,
    /// Last modification time; equal to `created_at` since records are immutable.
    pub modified_at: DateTime<Utc>,
}

impl FileRecord {
    /// Upload time formatted as `YYYYMMDDHHMMSS`.
    pub fn upload_stamp(&self) -> String {
        self.created_at.format("%Y%m%d%H%M%S").to_string()
    }

    /// Attachment name used when this record is downloaded as a
    /// historical version: `{base}_{stamp}{ext}`.
    pub fn historical_filename(&self) -> String {
        let (base, ext) = split_extension(&self.path);
        format!("{base}_{}{ext}", self.upload_stamp())
    }
}

/// Split a file name into `(base, ext)` where `ext` keeps its leading dot.
///
/// Only the last extension is split off (`a.tar.gz` → `("a.tar", ".gz")`),
/// and leading dots never start an extension (`.bashrc` → `(".bashrc", "")`).
pub fn split_extension(name: &str) -> (&str, &str) {
    let stem_start = name.rfind('/').map(|i| i + 1).unwrap_or(0);
    let file_part = &name[stem_start..];
    let leading_dots = file_part.len() - file_part.trim_start_matches('.').len();

    match file_part.rfind('.') {
        Some(dot) if dot >= leading_dots && dot > 0 => {
            let split = stem_start + dot;
            (&name[..split], &name[split..])
        }
        _ => (name, ""),
    }
}
