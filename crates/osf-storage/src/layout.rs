//! Provider-relative paths of project uploads.

use osf_core::types::{FileRecordId, ProjectId};

/// Directory (inside a project folder) holding every uploaded revision.
pub const VERSIONS_DIR: &str = ".versions";

/// Path of the current copy of `filename`.
pub fn current_path(project: ProjectId, filename: &str) -> String {
    format!("{project}/{filename}")
}

/// Path of the content of one uploaded revision.
pub fn version_path(project: ProjectId, record: FileRecordId) -> String {
    format!("{project}/{VERSIONS_DIR}/{record}")
}
