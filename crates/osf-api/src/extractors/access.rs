//! Guard-chain extractors.
//!
//! `Authorized<P>` loads the project named by the `pid` path parameter and
//! runs policy `P`'s guard chain before the handler body executes. A denial
//! becomes the handler's error response.

use std::collections::HashMap;
use std::marker::PhantomData;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use osf_auth::guard::{GuardChain, Subject};
use osf_core::error::AppError;
use osf_core::types::ProjectId;
use osf_entity::project::Project;

use crate::error::ApiError;
use crate::extractors::subject::subject_from_parts;
use crate::state::AppState;

/// Selects the guard chain an [`Authorized`] extractor runs.
pub trait AccessPolicy: Send + Sync + 'static {
    /// The chain to evaluate.
    fn guards(state: &AppState) -> &GuardChain;
}

/// Read access: contributor or public project.
#[derive(Debug)]
pub struct ViewAccess;

impl AccessPolicy for ViewAccess {
    fn guards(state: &AppState) -> &GuardChain {
        &state.view_guards
    }
}

/// Write access: signed-in write contributor on a non-registration.
#[derive(Debug)]
pub struct EditAccess;

impl AccessPolicy for EditAccess {
    fn guards(state: &AppState) -> &GuardChain {
        &state.edit_guards
    }
}

/// A project the subject passed policy `P` for.
#[derive(Debug)]
pub struct Authorized<P> {
    /// Who is asking.
    pub subject: Subject,
    /// The project named in the path.
    pub project: Project,
    policy: PhantomData<P>,
}

impl<P: AccessPolicy> FromRequestParts<AppState> for Authorized<P> {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::bad_request(format!("Invalid path: {e}")))?;

        let project_id: ProjectId = params
            .get("pid")
            .ok_or_else(|| AppError::internal("Route has no project parameter"))?
            .parse()
            .map_err(|_| AppError::not_found("Project not found"))?;

        let project = state.project_service.get(project_id).await?;
        let subject = subject_from_parts(parts)?;

        P::guards(state)
            .evaluate(&subject, &project)
            .into_result()?;

        Ok(Self {
            subject,
            project,
            policy: PhantomData,
        })
    }
}
