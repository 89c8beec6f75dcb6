//! File listing entry shared by the grid listing and upload responses.

use serde::Serialize;

use osf_core::types::{FileRecordId, ProjectId};
use osf_entity::file::FileRecord;

use crate::format::{display_date, epoch_seconds, human_size};
use crate::sanitize::escape_html;
use crate::urls;

/// One file as shown in the project file grid.
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    /// Id of the current record.
    pub uid: FileRecordId,
    /// HTML-escaped file name.
    pub name: String,
    /// Text after the last `.`, or the whole name when there is none.
    pub ext: String,
    /// Always `"file"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Size in bytes, as a string.
    pub size: String,
    /// `[bytes, human size]`.
    #[serde(rename = "sizeRead")]
    pub size_read: (f64, String),
    /// Upload time of the current record.
    pub date_uploaded: String,
    /// `[epoch seconds, display date]`.
    #[serde(rename = "dateModified")]
    pub date_modified: (f64, String),
    /// Total downloads of the file across versions.
    pub downloads: u64,
    /// Whether the viewer may upload or delete.
    pub can_edit: bool,
    /// Render view URL.
    pub view: String,
    /// Latest-version download URL.
    pub download: String,
    /// URL accepting `DELETE`.
    pub delete: String,
    /// Another original name already stored under the same file key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitization_collision: Option<String>,
}

impl FileInfo {
    /// Build the listing entry for a project's current record.
    pub fn new(project: ProjectId, record: &FileRecord, can_edit: bool, downloads: u64) -> Self {
        let ext = record.path.rsplit('.').next().unwrap_or(&record.path);
        Self {
            uid: record.id,
            name: escape_html(&record.path),
            ext: escape_html(ext),
            kind: "file",
            size: record.size_bytes.to_string(),
            size_read: (record.size_bytes as f64, human_size(record.size_bytes)),
            date_uploaded: display_date(record.created_at),
            date_modified: (
                epoch_seconds(record.modified_at),
                display_date(record.modified_at),
            ),
            downloads,
            can_edit,
            view: urls::file_url(project, &record.path),
            download: urls::download_url(project, &record.path),
            delete: urls::file_url(project, &record.path),
            sanitization_collision: None,
        }
    }

    /// Attach a collision report.
    pub fn with_collision(mut self, collision: Option<String>) -> Self {
        self.sanitization_collision = collision;
        self
    }
}
