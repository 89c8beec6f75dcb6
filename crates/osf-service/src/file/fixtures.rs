//! Shared builders for service tests.

use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use osf_auth::guard::Subject;
use osf_core::traits::storage::StorageProvider;
use osf_core::types::{FileRecordId, UserId};
use osf_database::ProjectRepository;
use osf_entity::file::FileRecord;
use osf_entity::project::{CreateProject, Project};
use osf_entity::user::UserRef;
use osf_storage::{LocalStorageProvider, layout};

use crate::counter::InMemoryDownloadCounter;

pub(crate) struct Harness {
    pub _dir: TempDir,
    pub repo: Arc<ProjectRepository>,
    pub storage: Arc<LocalStorageProvider>,
    pub counter: Arc<InMemoryDownloadCounter>,
    pub owner: UserRef,
}

impl Harness {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        Self {
            _dir: dir,
            repo: Arc::new(ProjectRepository::in_memory()),
            storage: Arc::new(storage),
            counter: Arc::new(InMemoryDownloadCounter::new()),
            owner: UserRef::new(UserId::new(), "Rosalind Franklin"),
        }
    }

    pub fn subject(&self) -> Subject {
        Subject::user(self.owner.clone())
    }

    pub async fn project(&self, is_public: bool) -> Project {
        let project = Project::new(
            CreateProject {
                title: "Crystallography".to_string(),
                is_public,
                parent_id: None,
            },
            self.owner.clone(),
        );
        self.repo.create(project).await.unwrap()
    }

    /// Store `content` as a new version of `name` uploaded at `at`, the same
    /// way an upload lays it out on disk.
    pub async fn add_version(
        &self,
        project: &Project,
        name: &str,
        content: &str,
        at: DateTime<Utc>,
    ) -> Project {
        let record = FileRecord {
            id: FileRecordId::new(),
            project_id: project.id,
            path: name.to_string(),
            size_bytes: content.len() as u64,
            content_type: "text/plain".to_string(),
            uploader: self.owner.clone(),
            created_at: at,
            modified_at: at,
        };
        let data = Bytes::from(content.to_string());
        self.storage
            .write(&layout::version_path(project.id, record.id), data.clone())
            .await
            .unwrap();
        self.storage
            .write(&layout::current_path(project.id, name), data)
            .await
            .unwrap();
        self.repo
            .update(project.id, |p| {
                p.append_record(record);
                Ok(())
            })
            .await
            .unwrap();
        self.repo.find_by_id(project.id).await.unwrap().unwrap()
    }
}

pub(crate) fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2013, 6, day, 9, 30, 0).unwrap()
}
