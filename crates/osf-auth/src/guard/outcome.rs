//! Structured authorization results.

use serde::{Deserialize, Serialize};

use osf_core::error::AppError;
use osf_core::result::AppResult;

/// Why a guard refused the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    /// No user identity was supplied but one is required.
    Unauthenticated,
    /// The user is known but lacks the required permission.
    Forbidden,
}

/// A refusal produced by one guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    /// Category of the refusal.
    pub kind: DenialKind,
    /// Name of the guard that refused.
    pub guard: String,
    /// Human-readable reason.
    pub reason: String,
}

impl Denial {
    /// Create a denial.
    pub fn new(kind: DenialKind, guard: &str, reason: impl Into<String>) -> Self {
        Self {
            kind,
            guard: guard.to_string(),
            reason: reason.into(),
        }
    }

    /// Convert into the matching application error.
    pub fn into_error(self) -> AppError {
        match self.kind {
            DenialKind::Unauthenticated => AppError::unauthorized(self.reason),
            DenialKind::Forbidden => AppError::forbidden(self.reason),
        }
    }
}

/// Result of evaluating a guard or a guard chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AuthorizationOutcome {
    /// Every guard allowed the request.
    Granted,
    /// A guard refused the request.
    Denied(Denial),
}

impl AuthorizationOutcome {
    /// `Ok(())` when granted, otherwise the denial as an [`AppError`].
    pub fn into_result(self) -> AppResult<()> {
        match self {
            Self::Granted => Ok(()),
            Self::Denied(denial) => Err(denial.into_error()),
        }
    }
}
