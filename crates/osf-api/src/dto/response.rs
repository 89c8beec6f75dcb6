//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Storage provider type.
    pub storage: String,
    /// Whether the storage root is reachable.
    pub storage_healthy: bool,
}

/// Entry returned when an upload matched the current version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotModifiedResponse {
    /// Always `null`.
    pub action_taken: Option<String>,
    /// Explanation.
    pub message: String,
    /// Sanitized file name.
    pub name: String,
}
