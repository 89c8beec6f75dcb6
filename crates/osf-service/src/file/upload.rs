//! File upload: appends a new version of a file.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use osf_auth::guard::Subject;
use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::StorageProvider;
use osf_core::types::FileRecordId;
use osf_database::ProjectRepository;
use osf_entity::file::{FileRecord, file_key};
use osf_entity::project::Project;
use osf_storage::layout;

use crate::counter::download_key;
use crate::file::info::FileInfo;
use crate::sanitize::secure_filename;

/// Content type used when the client sends none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Result of an upload.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// A new version was stored.
    Created {
        /// Listing entry of the new current version.
        info: FileInfo,
    },
    /// The content equals the current version; nothing was stored.
    NotModified {
        /// Sanitized file name.
        name: String,
        /// Human-readable explanation.
        message: String,
    },
}

/// Stores uploaded files as new versions.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Project repository.
    repo: Arc<ProjectRepository>,
    /// Storage provider.
    storage: Arc<dyn StorageProvider>,
    /// Download counters, read for the listing entry.
    counter: Arc<dyn DownloadCounter>,
}

impl UploadService {
    /// Creates a new upload service.
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

    /// Upload `data` as the newest version of `file_name`.
    ///
    /// The name is sanitized first. Content identical to the current version
    /// is not stored again.
    pub async fn upload(
        &self,
        subject: &Subject,
        project: &Project,
        file_name: &str,
        content_type: Option<String>,
        data: Bytes,
    ) -> AppResult<UploadOutcome> {
        let uploader = subject
            .user
            .clone()
            .ok_or_else(|| AppError::unauthorized("Sign in to upload files"))?;

        let name = secure_filename(file_name);
        if name.is_empty() {
            return Err(AppError::validation(format!(
                "File name {file_name:?} has no usable characters"
            )));
        }

        let current_path = layout::current_path(project.id, &name);
        let previous = match self.storage.read_bytes(&current_path).await {
            Ok(existing) => Some(existing),
            Err(e) if e.is_not_found() => None,
            Err(e) => return Err(e),
        };
        if project.current_record(&name).is_some() && previous.as_ref() == Some(&data) {
            debug!(project_id = %project.id, file = %name, "Upload not modified");
            return Ok(UploadOutcome::NotModified {
                message: format!("File {name} is not modified"),
                name,
            });
        }

        let now = Utc::now();
        let record = FileRecord {
            id: FileRecordId::new(),
            project_id: project.id,
            path: name.clone(),
            size_bytes: data.len() as u64,
            content_type: content_type
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            uploader,
            created_at: now,
            modified_at: now,
        };

        let version_path = layout::version_path(project.id, record.id);
        self.storage.write(&version_path, data.clone()).await?;
        if let Err(e) = self.storage.write(&current_path, data).await {
            self.discard(&version_path).await;
            return Err(e);
        }

        let stored = record.clone();
        let committed = self
            .repo
            .update(project.id, move |p| {
                let collision = p.key_collision(&stored.path).map(str::to_string);
                p.append_record(stored);
                let version = p.versions(&name).map(|v| v.len()).unwrap_or(1);
                Ok((collision, version))
            })
            .await;
        let (collision, version) = match committed {
            Ok(out) => out,
            Err(e) => {
                self.restore(&current_path, previous).await;
                self.discard(&version_path).await;
                return Err(e);
            }
        };

        if let Some(other) = &collision {
            warn!(
                project_id = %project.id,
                file = %record.path,
                existing = %other,
                file_key = %file_key(&record.path),
                "Upload shares its file key with a differently named file"
            );
        }

        info!(
            project_id = %project.id,
            file = %record.path,
            version,
            size = record.size_bytes,
            "File uploaded"
        );

        let downloads = self
            .counter
            .get(&download_key(project.id, &file_key(&record.path), None))
            .total;
        let info = FileInfo::new(project.id, &record, true, downloads).with_collision(collision);

        Ok(UploadOutcome::Created { info })
    }

    /// Put the pre-upload current copy back after a failed commit.
    async fn restore(&self, path: &str, previous: Option<Bytes>) {
        let restored = match previous {
            Some(data) => self.storage.write(path, data).await,
            None => self.storage.delete(path).await,
        };
        if let Err(e) = restored {
            error!(path, error = %e, "Failed to restore current file after aborted upload");
        }
    }

    /// Remove a blob written for an upload that was not committed.
    async fn discard(&self, path: &str) {
        if let Err(e) = self.storage.delete(path).await {
            warn!(path, error = %e, "Failed to remove orphaned version blob");
        }
    }
}
