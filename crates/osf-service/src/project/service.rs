//! Project creation, lookup, and the summary embedded in views.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use osf_auth::guard::Subject;
use osf_core::error::AppError;
use osf_core::result::AppResult;
use osf_core::types::ProjectId;
use osf_database::ProjectRepository;
use osf_entity::project::{CreateProject, Project};

/// Project fields shown alongside a rendered file.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    /// Project id.
    pub id: ProjectId,
    /// Display title.
    pub title: String,
    /// Parent project of a component.
    pub parent_id: Option<ProjectId>,
    /// Publicly viewable.
    pub is_public: bool,
    /// Frozen registration.
    pub is_registration: bool,
    /// Whether the viewer may change files.
    pub user_can_edit: bool,
    /// Number of files that have not been deleted.
    pub file_count: usize,
    /// API URL of the project.
    pub api_url: String,
}

impl ProjectSummary {
    /// Summarize `project` as seen by `subject`.
    pub fn new(project: &Project, subject: &Subject) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            parent_id: project.parent_id,
            is_public: project.is_public,
            is_registration: project.is_registration,
            user_can_edit: project.can_edit(subject.user_id()),
            file_count: project.files_current.len(),
            api_url: format!("/api/projects/{}", project.id),
        }
    }
}

/// Creates and loads projects.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project repository.
    repo: Arc<ProjectRepository>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(repo: Arc<ProjectRepository>) -> Self {
        Self { repo }
    }

    /// Load a project.
    pub async fn get(&self, id: ProjectId) -> AppResult<Project> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
    }

    /// Create a project or, with `parent_id`, a component of a project the
    /// caller can edit. The caller becomes its admin.
    pub async fn create(&self, subject: &Subject, input: CreateProject) -> AppResult<Project> {
        let creator = subject
            .user
            .clone()
            .ok_or_else(|| AppError::unauthorized("Sign in to create projects"))?;

        let title = input.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Project title must not be empty"));
        }

        if let Some(parent_id) = input.parent_id {
            let parent = self.get(parent_id).await?;
            if !parent.can_edit(Some(creator.id)) {
                return Err(AppError::forbidden(format!(
                    "Cannot add components to project {parent_id}"
                )));
            }
        }

        let project = Project::new(
            CreateProject {
                title,
                ..input
            },
            creator,
        );
        let project = self.repo.create(project).await?;

        info!(
            project_id = %project.id,
            parent_id = ?project.parent_id,
            "Project created"
        );
        Ok(project)
    }
}
