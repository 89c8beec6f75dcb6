//! Version index: upload history lookup and the version table.

use std::sync::Arc;

use serde::{Serialize, Serializer};
use tracing::error;

use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::traits::counter::DownloadCounter;
use osf_entity::file::{FileRecord, file_key};
use osf_entity::project::Project;

use crate::counter::download_key;
use crate::format::display_date;

/// Label of a row in the version table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayNumber {
    /// The newest version.
    Current,
    /// A historical version, 1-based.
    Number(usize),
}

impl Serialize for DisplayNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Current => serializer.serialize_str("current"),
            Self::Number(n) => serializer.serialize_u64(*n as u64),
        }
    }
}

/// One row of the version table shown next to a rendered file.
#[derive(Debug, Clone, Serialize)]
pub struct VersionEntry {
    /// Requested file name.
    pub file_name: String,
    /// 1-based version number.
    pub number: usize,
    /// `"current"` for the newest version, otherwise `number`.
    pub display_number: DisplayNumber,
    /// Upload time, `%Y/%m/%d %I:%M %p`.
    pub date_uploaded: String,
    /// Downloads of this version.
    pub total: u64,
    /// Uploader's display name.
    pub committer_name: String,
    /// Uploader's profile URL.
    pub committer_url: String,
}

/// Resolves a file name to its upload history.
#[derive(Debug, Clone)]
pub struct VersionService {
    /// Source of per-version download totals.
    counter: Arc<dyn DownloadCounter>,
}

impl VersionService {
    /// Creates a new version service.
    pub fn new(counter: Arc<dyn DownloadCounter>) -> Self {
        Self { counter }
    }

    /// Records of every upload of `name`, oldest first.
    ///
    /// The name is looked up by its file key, so `a.txt` and `a_txt` share a
    /// history.
    pub fn resolve<'p>(&self, project: &'p Project, name: &str) -> AppResult<Vec<&'p FileRecord>> {
        let Some(list) = project.versions(name) else {
            error!(
                project_id = %project.id,
                file_key = %file_key(name),
                "File not found in version index"
            );
            return Err(AppError::not_found(format!("File {name} not found")));
        };

        list.iter()
            .map(|id| {
                project.record(id).ok_or_else(|| {
                    AppError::internal(format!("Version index of {name} references missing record {id}"))
                })
            })
            .collect()
    }

    /// Number of versions of `name`.
    pub fn count(&self, project: &Project, name: &str) -> AppResult<usize> {
        project
            .versions(name)
            .map(|list| list.len())
            .ok_or_else(|| AppError::not_found(format!("File {name} not found")))
    }

    /// Version table of `name`, newest first.
    pub fn history(&self, project: &Project, name: &str) -> AppResult<Vec<VersionEntry>> {
        let records = self.resolve(project, name)?;
        let count = records.len();
        let key = file_key(name);

        Ok(records
            .iter()
            .rev()
            .enumerate()
            .map(|(idx, record)| {
                let number = count - idx;
                let downloads = self
                    .counter
                    .get(&download_key(project.id, &key, Some(number)));
                VersionEntry {
                    file_name: name.to_string(),
                    number,
                    display_number: if number == count {
                        DisplayNumber::Current
                    } else {
                        DisplayNumber::Number(number)
                    },
                    date_uploaded: display_date(record.created_at),
                    total: downloads.total,
                    committer_name: record.uploader.fullname.clone(),
                    committer_url: record.uploader.url(),
                }
            })
            .collect())
    }
}
