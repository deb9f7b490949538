//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the full application: API routes under `/api`,
//! the health probe, and the tower-http layers for tracing, CORS and
//! request timeouts.

pub mod assessment;
pub mod middleware;

pub use assessment::{assessment_routes, AssessmentAppState};
pub use middleware::OptionalIdentity;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;

/// Builds the application router with all layers applied.
pub fn app_router(state: AssessmentAppState, server: &ServerConfig) -> Router {
    Router::new()
        .nest("/api", assessment_routes())
        .route("/health", get(assessment::handlers::health))
        .with_state(state)
        .layer(cors_layer(&server.cors_origins_list()))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins; no cross-origin access when none are set.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(middleware::IDENTITY_HEADER),
        ])
}
