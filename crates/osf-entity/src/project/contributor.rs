//! Project contributor entity.

use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::user::UserRef;

/// A user listed on a project together with their permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// The contributing user.
    pub user: UserRef,
    /// Highest permission granted on the project.
    pub permission: Permission,
}
