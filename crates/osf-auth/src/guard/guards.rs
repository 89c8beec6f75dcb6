//! Individual guards.

use osf_entity::project::Project;

use super::outcome::{AuthorizationOutcome, Denial, DenialKind};
use super::subject::Subject;

/// One authorization check run before a handler.
pub trait Guard: Send + Sync + std::fmt::Debug {
    /// Stable name used in denials and logs.
    fn name(&self) -> &'static str;

    /// Evaluate the guard for `subject` acting on `project`.
    fn check(&self, subject: &Subject, project: &Project) -> AuthorizationOutcome;
}

/// Requires a forwarded user identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireSession;

impl Guard for RequireSession {
    fn name(&self) -> &'static str {
        "require_session"
    }

    fn check(&self, subject: &Subject, _project: &Project) -> AuthorizationOutcome {
        if subject.is_authenticated() {
            AuthorizationOutcome::Granted
        } else {
            AuthorizationOutcome::Denied(Denial::new(
                DenialKind::Unauthenticated,
                self.name(),
                "Sign in required",
            ))
        }
    }
}

/// Allows anyone on public projects, contributors on private ones (`can_view`).
#[derive(Debug, Clone, Copy, Default)]
pub struct ContributorOrPublic;

impl Guard for ContributorOrPublic {
    fn name(&self) -> &'static str {
        "contributor_or_public"
    }

    fn check(&self, subject: &Subject, project: &Project) -> AuthorizationOutcome {
        if project.can_view(subject.user_id()) {
            return AuthorizationOutcome::Granted;
        }
        let kind = if subject.is_authenticated() {
            DenialKind::Forbidden
        } else {
            DenialKind::Unauthenticated
        };
        AuthorizationOutcome::Denied(Denial::new(
            kind,
            self.name(),
            format!("Project {} is private", project.id),
        ))
    }
}

/// Requires a contributor with write permission (`can_edit`).
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteContributor;

impl Guard for WriteContributor {
    fn name(&self) -> &'static str {
        "write_contributor"
    }

    fn check(&self, subject: &Subject, project: &Project) -> AuthorizationOutcome {
        if project.can_edit(subject.user_id()) {
            AuthorizationOutcome::Granted
        } else {
            AuthorizationOutcome::Denied(Denial::new(
                DenialKind::Forbidden,
                self.name(),
                "Write permission on the project is required",
            ))
        }
    }
}

/// Rejects changes to registrations.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotRegistration;

impl Guard for NotRegistration {
    fn name(&self) -> &'static str {
        "not_registration"
    }

    fn check(&self, _subject: &Subject, project: &Project) -> AuthorizationOutcome {
        if project.is_registration {
            AuthorizationOutcome::Denied(Denial::new(
                DenialKind::Forbidden,
                self.name(),
                "Registrations cannot be modified",
            ))
        } else {
            AuthorizationOutcome::Granted
        }
    }
}
