//! File rendering service — builds the browser view model of a file.

use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};

use osf_auth::guard::Subject;
use osf_core::config::render::RenderConfig;
use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::StorageProvider;
use osf_entity::project::Project;
use osf_storage::layout;

use crate::counter::view_key;
use crate::file::version::{VersionEntry, VersionService};
use crate::project::ProjectSummary;
use crate::render::{ArchiveFormat, Highlighter, RenderPlan, RenderStrategySelector};
use crate::render::{extension_of, list_entries};
use crate::sanitize::escape_html;
use crate::urls;

/// First line of an archive listing.
const ARCHIVE_HEADER: &str = "This archive contains the following files:";

/// Name used to pick the lexer of archive listings.
const LISTING_NAME: &str = "temp.txt";

/// How `rendered` was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Static markup (image tag or the too-large placeholder).
    Default,
    /// Highlighted text, or the placeholder when highlighting failed.
    Pygments,
}

/// View model of a rendered file.
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    /// Requested file name.
    pub file_name: String,
    /// HTML fragment.
    pub rendered: String,
    /// How the fragment was produced.
    pub renderer: Renderer,
    /// Version table, newest first.
    pub versions: Vec<VersionEntry>,
    /// The project or component the file belongs to.
    pub node: ProjectSummary,
}

/// Renders files for the browser view.
#[derive(Debug, Clone)]
pub struct PreviewService {
    /// Storage holding current copies.
    storage: Arc<dyn StorageProvider>,
    /// Page view counters.
    counter: Arc<dyn DownloadCounter>,
    /// Version index.
    versions: VersionService,
    /// Plan selection.
    selector: RenderStrategySelector,
    /// Shared syntax definitions.
    highlighter: Arc<Highlighter>,
    /// Archive listing depth.
    archive_depth: Option<usize>,
}

impl PreviewService {
    /// Creates a new preview service.
    pub fn new(
        storage: Arc<dyn StorageProvider>,
        counter: Arc<dyn DownloadCounter>,
        highlighter: Arc<Highlighter>,
        config: &RenderConfig,
    ) -> Self {
        Self {
            storage,
            versions: VersionService::new(counter.clone()),
            counter,
            selector: RenderStrategySelector::new(config),
            highlighter,
            archive_depth: config.archive_depth,
        }
    }

    /// Build the view model of the current version of `name`.
    pub async fn render(
        &self,
        subject: &Subject,
        project: &Project,
        name: &str,
    ) -> AppResult<FileView> {
        let versions = self.versions.history(project, name)?;

        let path = layout::current_path(project.id, name);
        let meta = match self.storage.metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.is_not_found() => {
                error!(project_id = %project.id, path = %path, "Current file missing from storage");
                return Err(AppError::not_found(format!("File {name} not found")));
            }
            Err(e) => return Err(e),
        };

        let download = urls::download_url(project.id, name);
        let plan = self
            .selector
            .select(name, meta.size_bytes, &extension_of(name));

        let (renderer, rendered) = match plan {
            RenderPlan::TooLarge => (Renderer::Default, too_large(&download)),
            RenderPlan::Image => (
                Renderer::Default,
                format!("<img src=\"{}?{}\" />", escape_html(&download), versions.len()),
            ),
            RenderPlan::ArchiveZip | RenderPlan::ArchiveTar => {
                let data = self.storage.read_bytes(&path).await?;
                let format = plan.archive_format().unwrap_or(ArchiveFormat::Zip);
                let rendered = self.render_archive(data, format, &download).await?;
                (Renderer::Pygments, rendered)
            }
            RenderPlan::Text => {
                let data = self.storage.read_bytes(&path).await?;
                let rendered = self.render_text(data, name, &download).await?;
                (Renderer::Pygments, rendered)
            }
        };

        let visitor = subject.visitor_key();
        for scope in project.counter_scopes() {
            self.counter.increment(&view_key(scope), &visitor);
        }

        info!(
            project_id = %project.id,
            file = %name,
            plan = ?plan,
            size = meta.size_bytes,
            "File rendered"
        );

        Ok(FileView {
            file_name: name.to_string(),
            rendered,
            renderer,
            versions,
            node: ProjectSummary::new(project, subject),
        })
    }

    async fn render_archive(
        &self,
        data: Bytes,
        format: ArchiveFormat,
        download: &str,
    ) -> AppResult<String> {
        let highlighter = self.highlighter.clone();
        let depth = self.archive_depth;
        let download = download.to_string();

        tokio::task::spawn_blocking(move || match list_entries(&data, format, depth) {
            Ok(names) => {
                let listing = std::iter::once(ARCHIVE_HEADER.to_string())
                    .chain(names)
                    .collect::<Vec<_>>()
                    .join("\n");
                highlighter
                    .highlight(LISTING_NAME, &listing)
                    .unwrap_or_else(|| cannot_render(&download))
            }
            Err(e) => {
                warn!(error = %e, "Archive listing failed");
                cannot_render(&download)
            }
        })
        .await
        .map_err(|e| AppError::internal(format!("Render task failed: {e}")))
    }

    async fn render_text(&self, data: Bytes, name: &str, download: &str) -> AppResult<String> {
        let highlighter = self.highlighter.clone();
        let name = name.to_string();
        let download = download.to_string();

        tokio::task::spawn_blocking(move || {
            std::str::from_utf8(&data)
                .ok()
                .and_then(|text| highlighter.highlight(&name, text))
                .unwrap_or_else(|| cannot_render(&download))
        })
        .await
        .map_err(|e| AppError::internal(format!("Render task failed: {e}")))
    }
}

fn too_large(download: &str) -> String {
    format!(
        "<p>This file is too large to be rendered online. Please <a href=\"{}\">download the file</a> to view it locally.</p>",
        escape_html(download)
    )
}

fn cannot_render(download: &str) -> String {
    format!(
        "<p>This file cannot be rendered online. Please <a href=\"{}\">download the file</a> to view it locally.</p>",
        escape_html(download)
    )
}
