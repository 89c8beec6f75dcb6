//! Project entity model.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use osf_core::types::{FileRecordId, ProjectId, UserId};

use crate::file::{FileRecord, VersionList, file_key};
use crate::permission::Permission;
use crate::project::Contributor;
use crate::user::UserRef;

/// A project or component owning versioned files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Unique project identifier.
    pub id: ProjectId,
    /// Display title.
    pub title: String,
    /// Parent project when this is a component.
    pub parent_id: Option<ProjectId>,
    /// Whether non-contributors may view the project.
    pub is_public: bool,
    /// Registrations are frozen snapshots and reject file changes.
    pub is_registration: bool,
    /// Users with explicit permissions.
    pub contributors: Vec<Contributor>,
    /// File key → current record, for files that have not been deleted.
    pub files_current: BTreeMap<String, FileRecordId>,
    /// File key → full upload history. Never shrinks.
    pub files_versions: BTreeMap<String, VersionList>,
    /// Every record ever uploaded to the project.
    pub records: HashMap<FileRecordId, FileRecord>,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project's files last changed.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create an empty project owned by `creator`.
    pub fn new(input: CreateProject, creator: UserRef) -> Self {
        let now = Utc::now();
        Self {
            id: ProjectId::new(),
            title: input.title,
            parent_id: input.parent_id,
            is_public: input.is_public,
            is_registration: false,
            contributors: vec![Contributor {
                user: creator,
                permission: Permission::Admin,
            }],
            files_current: BTreeMap::new(),
            files_versions: BTreeMap::new(),
            records: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The permission `user` holds, if they are a contributor.
    pub fn permission_for(&self, user: Option<UserId>) -> Option<Permission> {
        let user = user?;
        self.contributors
            .iter()
            .find(|c| c.user.id == user)
            .map(|c| c.permission)
    }

    /// Whether `user` (or an anonymous visitor) may view the project.
    pub fn can_view(&self, user: Option<UserId>) -> bool {
        self.is_public || self.permission_for(user).is_some()
    }

    /// Whether `user` may change the project's files.
    pub fn can_edit(&self, user: Option<UserId>) -> bool {
        self.permission_for(user).is_some_and(|p| p.can_write())
    }

    /// Project ids counters are attributed to: the parent project (if any)
    /// followed by this node, without duplicates.
    pub fn counter_scopes(&self) -> Vec<ProjectId> {
        match self.parent_id {
            Some(parent) if parent != self.id => vec![parent, self.id],
            _ => vec![self.id],
        }
    }

    /// Upload history for a file name.
    pub fn versions(&self, name: &str) -> Option<&VersionList> {
        self.files_versions.get(&file_key(name))
    }

    /// Look up a record by id.
    pub fn record(&self, id: FileRecordId) -> Option<&FileRecord> {
        self.records.get(&id)
    }

    /// The current record of a file that has not been deleted.
    pub fn current_record(&self, name: &str) -> Option<&FileRecord> {
        self.files_current
            .get(&file_key(name))
            .and_then(|id| self.records.get(id))
    }

    /// Current records ordered by file key.
    pub fn current_records(&self) -> impl Iterator<Item = &FileRecord> {
        self.files_current
            .values()
            .filter_map(|id| self.records.get(id))
    }

    /// Original name already stored under the same file key as `name`,
    /// when that name differs from `name`.
    pub fn key_collision(&self, name: &str) -> Option<&str> {
        let list = self.versions(name)?;
        list.iter()
            .rev()
            .filter_map(|id| self.records.get(&id))
            .map(|r| r.path.as_str())
            .find(|path| *path != name)
    }

    /// Append a new record as the current version of its file.
    pub fn append_record(&mut self, record: FileRecord) {
        let key = file_key(&record.path);
        let id = record.id;
        self.files_versions
            .entry(key.clone())
            .and_modify(|list| list.push(id))
            .or_insert_with(|| VersionList::new(id));
        self.files_current.insert(key, id);
        self.updated_at = record.created_at;
        self.records.insert(id, record);
    }

    /// Drop a file from the current-file map, keeping its history.
    ///
    /// Returns the record that was current, or `None` if the file was not
    /// present.
    pub fn remove_current(&mut self, name: &str) -> Option<FileRecordId> {
        let removed = self.files_current.remove(&file_key(name));
        if removed.is_some() {
            self.updated_at = Utc::now();
        }
        removed
    }
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Display title.
    pub title: String,
    /// Whether the project is publicly viewable.
    #[serde(default)]
    pub is_public: bool,
    /// Parent project when creating a component.
    #[serde(default)]
    pub parent_id: Option<ProjectId>,
}
