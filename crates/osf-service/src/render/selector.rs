//! Render strategy selection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use osf_core::config::render::RenderConfig;
use osf_entity::file::split_extension;

use super::archive::ArchiveFormat;

/// How a file is presented in the browser view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPlan {
    /// Above the size threshold; only a download link is shown.
    TooLarge,
    /// Embedded as an `<img>` pointing at the download URL.
    Image,
    /// Listing of a zip archive's members.
    ArchiveZip,
    /// Listing of a tar (optionally gzip-compressed) archive's members.
    ArchiveTar,
    /// Syntax-highlighted text, or a placeholder when no lexer matches.
    Text,
}

impl RenderPlan {
    /// Archive container for the archive plans.
    pub fn archive_format(&self) -> Option<ArchiveFormat> {
        match self {
            Self::ArchiveZip => Some(ArchiveFormat::Zip),
            Self::ArchiveTar => Some(ArchiveFormat::Tar),
            _ => None,
        }
    }
}

/// Lowercased last extension of `path`, including the dot (`".gz"` for
/// `x.tar.gz`), or an empty string.
pub fn extension_of(path: &str) -> String {
    split_extension(path).1.to_lowercase()
}

/// Chooses a [`RenderPlan`] from a file's name, size, and extension.
///
/// Selection depends only on its arguments and the configuration captured
/// at construction.
#[derive(Debug, Clone)]
pub struct RenderStrategySelector {
    /// Files strictly larger than this are never decoded.
    max_render_size: u64,
    /// Lowercase image extensions without the dot.
    image_formats: HashSet<String>,
}

impl RenderStrategySelector {
    /// Build a selector from the render configuration.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            max_render_size: config.max_render_size_bytes,
            image_formats: config
                .image_formats
                .iter()
                .map(|f| f.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Pick exactly one plan for a file.
    ///
    /// `extension` is the file's last extension with or without its leading
    /// dot; it is compared case-insensitively and literally.
    pub fn select(&self, file_path: &str, file_size: u64, extension: &str) -> RenderPlan {
        if file_size > self.max_render_size {
            return RenderPlan::TooLarge;
        }

        let ext = extension.strip_prefix('.').unwrap_or(extension).to_lowercase();
        if self.image_formats.contains(&ext) {
            return RenderPlan::Image;
        }
        if ext == "zip" {
            return RenderPlan::ArchiveZip;
        }
        if ext == "tar" || file_path.to_lowercase().ends_with(".tar.gz") {
            return RenderPlan::ArchiveTar;
        }
        RenderPlan::Text
    }
}
