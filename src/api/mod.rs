//! HTTP API layer for RakshaMitra.
//!
//! Provides the link check endpoint, health, OpenAPI docs and the static
//! frontend fallback.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
