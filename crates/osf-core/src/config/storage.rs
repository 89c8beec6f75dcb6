//! Upload storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded files and project metadata live on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for uploads; current files live at
    /// `{uploads_root}/{project_id}/{filename}`.
    #[serde(default = "default_uploads_root")]
    pub uploads_root: String,
    /// JSON snapshot of project metadata. `None` keeps metadata in memory only.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            uploads_root: default_uploads_root(),
            metadata_file: default_metadata_file(),
        }
    }
}

fn default_uploads_root() -> String {
    "./data/uploads".to_string()
}

fn default_metadata_file() -> Option<String> {
    Some("./data/projects.json".to_string())
}
