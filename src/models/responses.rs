//! Response DTOs for the block cache API
//!
//! Defines the structure of JSON response bodies.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Load mode the cache gateway was started with
    pub mode: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(mode: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            mode: mode.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for JSON error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
