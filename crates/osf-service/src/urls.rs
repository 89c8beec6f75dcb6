//! URLs embedded in view models and redirects.

use osf_core::types::ProjectId;

/// Render view of a file.
pub fn file_url(project: ProjectId, name: &str) -> String {
    format!("/api/projects/{project}/files/{name}")
}

/// Download of the latest version (redirects to the versioned URL).
pub fn download_url(project: ProjectId, name: &str) -> String {
    format!("/api/projects/{project}/files/{name}/download")
}

/// Download of a specific 1-based version.
pub fn version_download_url(project: ProjectId, name: &str, version: usize) -> String {
    format!("/api/projects/{project}/files/{name}/download/version/{version}")
}
