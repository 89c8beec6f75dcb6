//! Maps a 1-based version number to downloadable content.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{error, info};

use osf_auth::guard::Subject;
use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::{ByteStream, StorageProvider};
use osf_entity::file::file_key;
use osf_entity::project::Project;
use osf_storage::layout;

use crate::counter::download_key;
use crate::file::version::VersionService;

/// Where the bytes of a download come from.
pub enum ContentSource {
    /// Current copy, streamed from storage.
    Stream {
        /// Content chunks.
        stream: ByteStream,
        /// Total size in bytes.
        length: u64,
    },
    /// Historical content held in memory.
    Buffer(Bytes),
}

impl fmt::Debug for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream { length, .. } => f
                .debug_struct("Stream")
                .field("length", length)
                .finish_non_exhaustive(),
            Self::Buffer(data) => f.debug_tuple("Buffer").field(&data.len()).finish(),
        }
    }
}

/// A resolved download.
#[derive(Debug)]
pub struct DownloadResult {
    /// Content to send.
    pub source: ContentSource,
    /// MIME type recorded at upload.
    pub content_type: String,
    /// Suggested attachment filename.
    pub filename: String,
}

/// Resolves file downloads and counts them.
#[derive(Debug, Clone)]
pub struct DownloadService {
    /// Storage provider.
    storage: Arc<dyn StorageProvider>,
    /// Download counters.
    counter: Arc<dyn DownloadCounter>,
    /// Version index.
    versions: VersionService,
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(storage: Arc<dyn StorageProvider>, counter: Arc<dyn DownloadCounter>) -> Self {
        Self {
            storage,
            versions: VersionService::new(counter.clone()),
            counter,
        }
    }

    /// Number of the newest version of `name`.
    pub fn latest_version(&self, project: &Project, name: &str) -> AppResult<usize> {
        self.versions.count(project, name)
    }

    /// Resolve version `version_number` (1-based) of `name`.
    ///
    /// The newest version is streamed from the current copy under its
    /// original name. Older versions are loaded into memory and named
    /// `{base}_{YYYYMMDDHHMMSS}{ext}` after their upload time.
    pub async fn resolve_download(
        &self,
        subject: &Subject,
        project: &Project,
        name: &str,
        version_number: usize,
    ) -> AppResult<DownloadResult> {
        let records = self.versions.resolve(project, name)?;
        let count = records.len();
        let index = version_number
            .checked_sub(1)
            .filter(|i| *i < count)
            .ok_or_else(|| {
                AppError::not_found(format!("Version {version_number} of {name} not found"))
            })?;
        let record = records[index];

        let result = if version_number == count {
            let path = layout::current_path(project.id, name);
            let meta = match self.storage.metadata(&path).await {
                Ok(meta) => meta,
                Err(e) if e.is_not_found() => {
                    error!(project_id = %project.id, path = %path, "Current file missing from storage");
                    return Err(AppError::not_found(format!("File {name} not found")));
                }
                Err(e) => return Err(e),
            };
            DownloadResult {
                source: ContentSource::Stream {
                    stream: self.storage.read(&path).await?,
                    length: meta.size_bytes,
                },
                content_type: record.content_type.clone(),
                filename: name.to_string(),
            }
        } else {
            let data = self
                .storage
                .read_bytes(&layout::version_path(project.id, record.id))
                .await?;
            DownloadResult {
                source: ContentSource::Buffer(data),
                content_type: record.content_type.clone(),
                filename: record.historical_filename(),
            }
        };

        self.count_download(subject, project, name, version_number);

        info!(
            project_id = %project.id,
            file = %name,
            version = version_number,
            current = version_number == count,
            "Download resolved"
        );
        Ok(result)
    }

    /// Bump the per-file and per-version counters of every counter scope.
    fn count_download(&self, subject: &Subject, project: &Project, name: &str, version: usize) {
        let key = file_key(name);
        let visitor = subject.visitor_key();
        for scope in project.counter_scopes() {
            self.counter
                .increment(&download_key(scope, &key, Some(version)), &visitor);
            self.counter.increment(&download_key(scope, &key, None), &visitor);
        }
    }
}
