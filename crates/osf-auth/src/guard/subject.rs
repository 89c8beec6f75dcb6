//! The identity a request acts as.

use serde::{Deserialize, Serialize};

use osf_core::types::UserId;
use osf_entity::user::UserRef;

/// Who is making the request. `user` is `None` for anonymous visitors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subject {
    /// The forwarded user identity, if any.
    pub user: Option<UserRef>,
}

impl Subject {
    /// An anonymous visitor.
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// A signed-in user.
    pub fn user(user: UserRef) -> Self {
        Self { user: Some(user) }
    }

    /// The user id, if signed in.
    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Whether a user identity was supplied.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Identity used for unique-visitor counting.
    pub fn visitor_key(&self) -> String {
        match &self.user {
            Some(u) => u.id.to_string(),
            None => "anonymous".to_string(),
        }
    }
}
