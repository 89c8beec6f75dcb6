//! Archive member enumeration.
//!
//! Archives are opened for their central directory or headers only; no
//! member content is ever written to disk.

use std::io::{Cursor, Read};

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use osf_core::error::{AppError, ErrorKind};
use osf_core::result::AppResult;

use crate::sanitize::secure_member_path;

/// gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Container format of an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    /// PKZIP archive.
    Zip,
    /// POSIX tar, plain or gzip-compressed.
    Tar,
}

/// List the member names of an archive, depth-pruned and sanitized.
///
/// Order follows the container's own listing order.
pub fn list_entries(
    archive: &[u8],
    format: ArchiveFormat,
    max_depth: Option<usize>,
) -> AppResult<Vec<String>> {
    let names = match format {
        ArchiveFormat::Zip => zip_names(archive)?,
        ArchiveFormat::Tar if archive.starts_with(&GZIP_MAGIC) => {
            tar_names(GzDecoder::new(archive))?
        }
        ArchiveFormat::Tar => tar_names(archive)?,
    };
    Ok(prune_entries(names, max_depth))
}

/// Keep names with at most `max_depth` `/` separators and sanitize them.
///
/// The depth test runs on the raw name. Names that sanitize to nothing are
/// dropped.
pub fn prune_entries<I>(names: I, max_depth: Option<usize>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .filter(|name| max_depth.is_none_or(|depth| name.matches('/').count() <= depth))
        .map(|name| secure_member_path(&name))
        .filter(|name| !name.is_empty())
        .collect()
}

fn zip_names(archive: &[u8]) -> AppResult<Vec<String>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive))
        .map_err(|e| AppError::with_source(ErrorKind::Archive, "Failed to open zip archive", e))?;

    let mut names = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let entry = zip.by_index_raw(i).map_err(|e| {
            AppError::with_source(ErrorKind::Archive, format!("Failed to read zip entry {i}"), e)
        })?;
        names.push(entry.name().to_string());
    }
    Ok(names)
}

fn tar_names<R: Read>(reader: R) -> AppResult<Vec<String>> {
    let mut tar = tar::Archive::new(reader);
    let entries = tar
        .entries()
        .map_err(|e| AppError::with_source(ErrorKind::Archive, "Failed to open tar archive", e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| AppError::with_source(ErrorKind::Archive, "Failed to read tar entry", e))?;
        names.push(String::from_utf8_lossy(&entry.path_bytes()).into_owned());
    }
    Ok(names)
}
