//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================
// ANALYTICS DTOs
// ============================================

/// Search event submission
///
/// Every field is optional at the wire level so that missing fields surface
/// as validation errors rather than body-parse failures. `id` and
/// `timestamp`, if sent, are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSearchRequest {
    /// Search text, may be empty
    #[serde(default)]
    pub query: Option<String>,
    /// Results shown to the user
    #[serde(default)]
    pub result_count: Option<i64>,
    /// Opaque filter object
    #[serde(default)]
    pub filters: Option<Value>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Search event submission response
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordSearchResponse {
    pub success: bool,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded", or "unhealthy"
    pub status: String,
    /// Storage status: "ok" or "error"
    pub storage: String,
    /// Where the event log lives
    pub store: String,
    /// Events currently in the log
    pub events: usize,
    /// Retention bound of the log
    pub max_events: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Version string
    pub version: String,
}
