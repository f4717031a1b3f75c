//! Route definitions for the API.

use std::path::Path;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::config::ServerConfig;
use crate::protection::{enforce_rate_limit, security_header_layers, RateLimiter};
use crate::AppState;

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::check_url, handlers::health_check),
    components(schemas(
        crate::api::types::CheckRequest,
        crate::api::types::HealthResponse,
        crate::classifier::Verdict,
    )),
    tags(
        (name = "links", description = "Link safety checks"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "RakshaMitra API",
        version = "0.1.0",
        description = "Link safety gateway - heuristically judges whether a submitted URL is safe",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the application router.
///
/// Layer order, outermost first: tracing, security headers, rate limit,
/// then routing. Unmatched paths fall through to the static directory.
pub fn build_router(
    state: AppState,
    server: &ServerConfig,
    rate_limiter: Option<RateLimiter>,
) -> Router {
    let mut router = Router::new()
        .route("/check", post(handlers::check_url))
        .route("/health", get(handlers::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(ServeDir::new(Path::new(&server.static_dir)))
        .layer(DefaultBodyLimit::max(server.body_limit_bytes));

    if let Some(limiter) = rate_limiter {
        router = router.layer(middleware::from_fn_with_state(limiter, enforce_rate_limit));
    }

    for layer in security_header_layers() {
        router = router.layer(layer);
    }

    router.layer(TraceLayer::new_for_http())
}
