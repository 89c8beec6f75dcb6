//! File listing, upload, render, download, and delete handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use osf_core::error::AppError;
use osf_service::file::{
    ContentSource, DownloadResult, FileInfo, FilePaths, FileView, UploadOutcome,
};
use osf_service::urls;

use crate::dto::response::NotModifiedResponse;
use crate::error::ApiResult;
use crate::extractors::{Authorized, EditAccess, ViewAccess};
use crate::state::AppState;

/// GET /api/projects/{pid}/files
pub async fn list_files(
    State(state): State<AppState>,
    access: Authorized<ViewAccess>,
) -> Json<Vec<FileInfo>> {
    Json(
        state
            .file_service
            .list_files(&access.subject, &access.project),
    )
}

/// GET /api/projects/{pid}/files/paths
pub async fn list_file_paths(
    State(state): State<AppState>,
    access: Authorized<ViewAccess>,
) -> Json<FilePaths> {
    Json(state.file_service.list_paths(&access.project))
}

/// POST /api/projects/{pid}/files (multipart `file`, optional `redirect`)
pub async fn upload_file(
    State(state): State<AppState>,
    access: Authorized<EditAccess>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut do_redirect = false;
    let mut file_name: Option<String> = None;
    let mut mime_type: Option<String> = None;
    let mut data: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "redirect" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                do_redirect = !matches!(text.trim(), "" | "0" | "false");
            }
            "file" => {
                file_name = field.file_name().map(String::from);
                mime_type = field.content_type().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let file_name = file_name.ok_or_else(|| AppError::validation("file is required"))?;
    let data = data.ok_or_else(|| AppError::validation("file data is required"))?;

    let outcome = state
        .upload_service
        .upload(&access.subject, &access.project, &file_name, mime_type, data)
        .await?;

    let info = match outcome {
        UploadOutcome::NotModified { name, message } => {
            return Ok(Json(vec![NotModifiedResponse {
                action_taken: None,
                message,
                name,
            }])
            .into_response());
        }
        UploadOutcome::Created { info, .. } => info,
    };

    if do_redirect {
        let target = headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| format!("/api/projects/{}/files", access.project.id));
        return Ok(found(&target));
    }

    Ok((StatusCode::CREATED, Json(vec![info])).into_response())
}

/// GET /api/projects/{pid}/files/{name}
pub async fn view_file(
    State(state): State<AppState>,
    access: Authorized<ViewAccess>,
    Path((_, name)): Path<(String, String)>,
) -> ApiResult<Json<FileView>> {
    let view = state
        .preview_service
        .render(&access.subject, &access.project, &name)
        .await?;
    Ok(Json(view))
}

/// DELETE /api/projects/{pid}/files/{name}
pub async fn delete_file(
    State(state): State<AppState>,
    access: Authorized<EditAccess>,
    Path((_, name)): Path<(String, String)>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .file_service
        .delete(&access.subject, &access.project, &name)
        .await?;
    Ok(Json(serde_json::json!({})))
}

/// GET /api/projects/{pid}/files/{name}/download
///
/// Redirects to the newest version.
pub async fn download_file(
    State(state): State<AppState>,
    access: Authorized<ViewAccess>,
    Path((_, name)): Path<(String, String)>,
) -> ApiResult<Response> {
    let latest = state
        .download_service
        .latest_version(&access.project, &name)?;
    Ok(found(&urls::version_download_url(
        access.project.id,
        &name,
        latest,
    )))
}

/// GET /api/projects/{pid}/files/{name}/download/version/{vid}
pub async fn download_file_by_version(
    State(state): State<AppState>,
    access: Authorized<ViewAccess>,
    Path((_, name, vid)): Path<(String, String, usize)>,
) -> ApiResult<Response> {
    let result = state
        .download_service
        .resolve_download(&access.subject, &access.project, &name, vid)
        .await?;
    attachment(result)
}

/// Build an attachment response.
fn attachment(result: DownloadResult) -> ApiResult<Response> {
    let (body, length) = match result.source {
        ContentSource::Stream { stream, length } => (Body::from_stream(stream), length),
        ContentSource::Buffer(data) => {
            let length = data.len() as u64;
            (Body::from(data), length)
        }
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, result.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", result.filename),
        )
        .header(header::CONTENT_LENGTH, length)
        .body(body)
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// `302 Found` to `location`.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
