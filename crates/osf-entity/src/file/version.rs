//! Version list entity.

use serde::{Deserialize, Serialize};

use osf_core::types::FileRecordId;

/// Key under which a file's history is stored: the file name with every
/// `.` replaced by `_`.
///
/// Distinct names can map to the same key (`a.b_c` and `a_b.c`); callers
/// that append to a list are expected to detect and report such collisions.
pub fn file_key(name: &str) -> String {
    name.replace('.', "_")
}

/// Ordered upload history of one logical file within a project.
///
/// Index 0 is the oldest upload, the last index is the current version.
/// A version list always holds at least one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<FileRecordId>", into = "Vec<FileRecordId>")]
pub struct VersionList(Vec<FileRecordId>);

impl VersionList {
    /// Start a history with its first upload.
    pub fn new(first: FileRecordId) -> Self {
        Self(vec![first])
    }

    /// Append a newer upload; it becomes the current version.
    pub fn push(&mut self, id: FileRecordId) {
        self.0.push(id);
    }

    /// Number of versions; never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = FileRecordId> + ExactSizeIterator + '_ {
        self.0.iter().copied()
    }
}

impl TryFrom<Vec<FileRecordId>> for VersionList {
    type Error = String;

    fn try_from(ids: Vec<FileRecordId>) -> Result<Self, Self::Error> {
        if ids.is_empty() {
            return Err("version list must contain at least one record".to_string());
        }
        Ok(Self(ids))
    }
}

impl From<VersionList> for Vec<FileRecordId> {
    fn from(list: VersionList) -> Self {
        list.0
    }
}
