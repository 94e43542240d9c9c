//! Transport-only response bodies.
//!
//! Villa payloads live in [`crate::api`]; this module only holds what the
//! HTTP layer adds on its own.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Database connection status
    pub database: String,
}
