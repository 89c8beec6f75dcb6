//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use osf_auth::guard::GuardChain;
use osf_core::config::AppConfig;
use osf_core::traits::counter::DownloadCounter;
use osf_core::traits::storage::StorageProvider;
use osf_database::ProjectRepository;
use osf_service::render::Highlighter;
use osf_service::{
    DownloadService, FileService, PreviewService, ProjectService, UploadService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Upload storage
    pub storage: Arc<dyn StorageProvider>,

    /// Guards run before read handlers
    pub view_guards: Arc<GuardChain>,
    /// Guards run before write handlers
    pub edit_guards: Arc<GuardChain>,

    /// Project service
    pub project_service: Arc<ProjectService>,
    /// Listing and delete service
    pub file_service: Arc<FileService>,
    /// Upload service
    pub upload_service: Arc<UploadService>,
    /// Download resolver
    pub download_service: Arc<DownloadService>,
    /// Render service
    pub preview_service: Arc<PreviewService>,
}

impl AppState {
    /// Wire every service from its collaborators.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn StorageProvider>,
        projects: Arc<ProjectRepository>,
        counter: Arc<dyn DownloadCounter>,
    ) -> Self {
        let highlighter = Arc::new(Highlighter::new());

        let project_service = Arc::new(ProjectService::new(Arc::clone(&projects)));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&projects),
            Arc::clone(&storage),
            Arc::clone(&counter),
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&projects),
            Arc::clone(&storage),
            Arc::clone(&counter),
        ));
        let download_service = Arc::new(DownloadService::new(
            Arc::clone(&storage),
            Arc::clone(&counter),
        ));
        let preview_service = Arc::new(PreviewService::new(
            Arc::clone(&storage),
            Arc::clone(&counter),
            highlighter,
            &config.render,
        ));

        Self {
            config: Arc::new(config),
            storage,
            view_guards: Arc::new(GuardChain::view()),
            edit_guards: Arc::new(GuardChain::edit()),
            project_service,
            file_service,
            upload_service,
            download_service,
            preview_service,
        }
    }
}
