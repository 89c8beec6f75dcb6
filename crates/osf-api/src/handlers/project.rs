//! Project handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use osf_entity::project::CreateProject;
use osf_service::project::ProjectSummary;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{Authorized, ViewAccess, Viewer};
use crate::state::AppState;

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    viewer: Viewer,
    Json(req): Json<CreateProject>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProjectSummary>>)> {
    let project = state.project_service.create(&viewer, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ProjectSummary::new(&project, &viewer))),
    ))
}

/// GET /api/projects/{pid}
pub async fn get_project(access: Authorized<ViewAccess>) -> Json<ApiResponse<ProjectSummary>> {
    Json(ApiResponse::ok(ProjectSummary::new(
        &access.project,
        &access.subject,
    )))
}
