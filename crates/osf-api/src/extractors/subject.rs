//! `Viewer` extractor for the identity forwarded by the fronting proxy.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use osf_auth::guard::Subject;
use osf_core::error::AppError;
use osf_core::types::UserId;
use osf_entity::user::UserRef;

use crate::error::ApiError;

/// Header carrying the user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the user's display name.
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The request's subject; anonymous when no user header is present.
#[derive(Debug, Clone)]
pub struct Viewer(pub Subject);

impl std::ops::Deref for Viewer {
    type Target = Subject;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Read the subject from request headers.
pub fn subject_from_parts(parts: &Parts) -> Result<Subject, AppError> {
    let Some(raw_id) = parts.headers.get(USER_ID_HEADER) else {
        return Ok(Subject::anonymous());
    };

    let id: UserId = raw_id
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| AppError::validation("Invalid X-User-Id header"))?;

    let fullname = parts
        .headers
        .get(USER_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .unwrap_or_else(|| id.to_string());

    Ok(Subject::user(UserRef::new(id, fullname)))
}

impl<S: Send + Sync> FromRequestParts<S> for Viewer {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Viewer(subject_from_parts(parts)?))
    }
}
