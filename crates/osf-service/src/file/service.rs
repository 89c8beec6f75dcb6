//! File service — listing and deletion of current files.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use osf_auth::guard::Subject;
use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::StorageProvider;
use osf_database::ProjectRepository;
use osf_entity::file::file_key;
use osf_entity::project::Project;
use osf_storage::layout;

use crate::counter::download_key;
use crate::file::info::FileInfo;

/// Paths of a project's current files.
#[derive(Debug, Clone, Serialize)]
pub struct FilePaths {
    /// File names, ordered by file key.
    pub files: Vec<String>,
}

/// Lists and removes a project's current files.
#[derive(Debug, Clone)]
pub struct FileService {
    /// Project repository.
    repo: Arc<ProjectRepository>,
    /// Storage provider.
    storage: Arc<dyn StorageProvider>,
    /// Download counters.
    counter: Arc<dyn DownloadCounter>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        repo: Arc<ProjectRepository>,
        storage: Arc<dyn StorageProvider>,
        counter: Arc<dyn DownloadCounter>,
    ) -> Self {
        Self {
            repo,
            storage,
            counter,
        }
    }

    /// Grid listing of current files; empty when `subject` cannot view.
    pub fn list_files(&self, subject: &Subject, project: &Project) -> Vec<FileInfo> {
        let user = subject.user_id();
        if !project.can_view(user) {
            return Vec::new();
        }
        let can_edit = project.can_edit(user);

        project
            .current_records()
            .map(|record| {
                let downloads = self
                    .counter
                    .get(&download_key(project.id, &file_key(&record.path), None))
                    .total;
                FileInfo::new(project.id, record, can_edit, downloads)
            })
            .collect()
    }

    /// Names of current files.
    pub fn list_paths(&self, project: &Project) -> FilePaths {
        FilePaths {
            files: project.current_records().map(|r| r.path.clone()).collect(),
        }
    }

    /// Remove `name` from the current files and delete its on-disk copy.
    ///
    /// `name` is matched by file key, so the stored file may be spelled
    /// differently. The disk copy goes first; a failure there leaves the
    /// file listed. The upload history and stored revisions are kept.
    pub async fn delete(&self, subject: &Subject, project: &Project, name: &str) -> AppResult<()> {
        let stored = project
            .current_record(name)
            .map(|record| record.path.clone())
            .ok_or_else(|| AppError::bad_request(format!("Could not delete {name}")))?;

        self.storage
            .delete(&layout::current_path(project.id, &stored))
            .await?;

        let removed = self
            .repo
            .update(project.id, |p| Ok(p.remove_current(&stored)))
            .await?;
        if removed.is_none() {
            return Err(AppError::bad_request(format!("Could not delete {name}")));
        }

        info!(
            project_id = %project.id,
            file = %stored,
            requested = %name,
            user_id = ?subject.user_id(),
            "File deleted"
        );
        Ok(())
    }
}
