//! HTTP request handlers.

use axum::{
    extract::{FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};

use crate::api::types::*;
use crate::classifier::{Verdict, VerdictReason};
use crate::AppState;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Judge whether a submitted link looks safe.
///
/// POST /check
#[utoipa::path(
    post,
    path = "/check",
    request_body = CheckRequest,
    responses(
        (status = 200, description = "Verdict for the submitted URL", body = Verdict),
        (status = 400, description = "Body could not be read", body = Verdict),
        (status = 429, description = "Rate limit exceeded")
    ),
    tag = "links"
)]
pub async fn check_url(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<Verdict>, CheckRejection> {
    let body = read_check_request(request, &state).await?;
    let url = body.url.as_deref();

    let verdict = state.classifier.classify(url);

    if verdict.reason == VerdictReason::SuspiciousPattern {
        if let (Some(alerts), Some(url)) = (&state.alerts, url) {
            alerts.notify(url);
        }
    }

    tracing::debug!(safe = verdict.safe, reason = %verdict.reason, "Link checked");

    Ok(Json(verdict))
}

/// Read the `/check` body as a form or as JSON, by content type.
async fn read_check_request(
    request: Request,
    state: &AppState,
) -> Result<CheckRequest, CheckRejection> {
    if is_form(request.headers()) {
        Form::<CheckRequest>::from_request(request, state)
            .await
            .map(|Form(body)| body)
            .map_err(|e| CheckRejection {
                detail: e.body_text(),
            })
    } else {
        Json::<CheckRequest>::from_request(request, state)
            .await
            .map(|Json(body)| body)
            .map_err(|e| CheckRejection {
                detail: e.body_text(),
            })
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE))
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules: state.classifier.rules().len(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_form() {
        let mut headers = HeaderMap::new();
        assert!(!is_form(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_form(&headers));

        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        assert!(is_form(&headers));
    }
}
