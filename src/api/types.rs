//! API request and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::classifier::{Verdict, VerdictReason};

// ==================== Link Check ====================

/// Request to check a link. Accepted as JSON or as a urlencoded form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckRequest {
    /// The URL to judge.
    #[serde(default)]
    pub url: Option<String>,
}

/// Rejection for `/check` bodies that cannot be read.
///
/// Answers 400 with the same verdict a missing URL gets, so clients
/// always receive a `{safe, reason}` body.
#[derive(Debug)]
pub struct CheckRejection {
    /// What went wrong while reading the body (logged, not sent).
    pub detail: String,
}

impl IntoResponse for CheckRejection {
    fn into_response(self) -> Response {
        tracing::debug!(detail = %self.detail, "Malformed check request");
        (
            StatusCode::BAD_REQUEST,
            Json(Verdict::unsafe_because(VerdictReason::NoUrl)),
        )
            .into_response()
    }
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Number of unsafe rules loaded.
    pub rules: usize,
    /// Timestamp.
    pub timestamp: String,
}
