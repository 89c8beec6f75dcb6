//! Ordered guard evaluation.

use std::sync::Arc;

use tracing::debug;

use osf_entity::project::Project;

use super::guards::{ContributorOrPublic, Guard, NotRegistration, RequireSession, WriteContributor};
use super::outcome::AuthorizationOutcome;
use super::subject::Subject;

/// An ordered list of guards. Evaluation stops at the first denial.
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    guards: Vec<Arc<dyn Guard>>,
}

impl GuardChain {
    /// An empty chain, which grants everything.
    pub fn new() -> Self {
        Self { guards: Vec::new() }
    }

    /// Append a guard to the chain.
    pub fn with(mut self, guard: impl Guard + 'static) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    /// Chain for reading files: contributor or public project.
    pub fn view() -> Self {
        Self::new().with(ContributorOrPublic)
    }

    /// Chain for changing files: signed-in write contributor, project not a
    /// registration.
    pub fn edit() -> Self {
        Self::new()
            .with(RequireSession)
            .with(WriteContributor)
            .with(NotRegistration)
    }

    /// Run every guard in order and return the first denial, if any.
    pub fn evaluate(&self, subject: &Subject, project: &Project) -> AuthorizationOutcome {
        for guard in &self.guards {
            let outcome = guard.check(subject, project);
            if let AuthorizationOutcome::Denied(denial) = &outcome {
                debug!(
                    guard = guard.name(),
                    project_id = %project.id,
                    reason = %denial.reason,
                    "Authorization denied"
                );
                return outcome;
            }
        }
        AuthorizationOutcome::Granted
    }
}
