//! User reference value object.

use serde::{Deserialize, Serialize};

use osf_core::types::UserId;

/// Snapshot of a user as recorded on an upload or contributor entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// The user's identifier.
    pub id: UserId,
    /// Display name at the time the reference was recorded.
    pub fullname: String,
}

impl UserRef {
    /// Create a new user reference.
    pub fn new(id: UserId, fullname: impl Into<String>) -> Self {
        Self {
            id,
            fullname: fullname.into(),
        }
    }

    /// Relative URL of the user's profile page.
    pub fn url(&self) -> String {
        format!("/profile/{}/", self.id)
    }
}
