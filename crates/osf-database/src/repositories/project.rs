//! Project repository implementation.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use osf_core::error::{AppError, ErrorKind};
use osf_core::result::AppResult;
use osf_core::types::ProjectId;
use osf_entity::project::Project;

/// Repository for project lookup and mutation.
///
/// Mutations run under a single write lock, so concurrent appends to the
/// same version list are applied one after another.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    /// Project id → project.
    projects: Arc<RwLock<HashMap<ProjectId, Project>>>,
    /// JSON snapshot written after each mutation.
    snapshot_path: Option<PathBuf>,
}

impl ProjectRepository {
    /// Create a repository that keeps everything in memory.
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(RwLock::new(HashMap::new())),
            snapshot_path: None,
        }
    }

    /// Open a repository backed by a JSON snapshot, loading it if present.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let projects = match fs::read(&path).await {
            Ok(raw) => {
                let list: Vec<Project> = serde_json::from_slice(&raw)?;
                info!(path = %path.display(), projects = list.len(), "Loaded project snapshot");
                list.into_iter().map(|p| (p.id, p)).collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read project snapshot: {}", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            projects: Arc::new(RwLock::new(projects)),
            snapshot_path: Some(path),
        })
    }

    /// Find a project by ID.
    pub async fn find_by_id(&self, id: ProjectId) -> AppResult<Option<Project>> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).cloned())
    }

    /// Insert a new project.
    pub async fn create(&self, project: Project) -> AppResult<Project> {
        let mut projects = self.projects.write().await;
        if projects.contains_key(&project.id) {
            return Err(AppError::conflict(format!(
                "Project {} already exists",
                project.id
            )));
        }
        projects.insert(project.id, project.clone());
        if let Err(e) = self.persist(&projects).await {
            projects.remove(&project.id);
            return Err(e);
        }
        Ok(project)
    }

    /// Apply `change` to a project under the write lock and persist the result.
    ///
    /// When `change` fails or the snapshot cannot be written, the in-memory
    /// project is left as it was.
    pub async fn update<T, F>(&self, id: ProjectId, change: F) -> AppResult<T>
    where
        F: FnOnce(&mut Project) -> AppResult<T>,
    {
        let mut projects = self.projects.write().await;
        let current = projects
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;

        let mut updated = current.clone();
        let out = change(&mut updated)?;
        let previous = projects.insert(id, updated);
        if let Err(e) = self.persist(&projects).await {
            if let Some(previous) = previous {
                projects.insert(id, previous);
            }
            warn!(project_id = %id, error = %e, "Snapshot write failed, change rolled back");
            return Err(e);
        }
        Ok(out)
    }

    /// Write the snapshot file, replacing the previous one atomically.
    async fn persist(&self, projects: &HashMap<ProjectId, Project>) -> AppResult<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create snapshot directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let list: Vec<&Project> = projects.values().collect();
        let raw = serde_json::to_vec_pretty(&list)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &raw).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to write project snapshot", e)
        })?;
        fs::rename(&tmp, path).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to replace project snapshot", e)
        })?;

        debug!(path = %path.display(), projects = list.len(), "Persisted project snapshot");
        Ok(())
    }
}
