//! HTTP handlers module
//!
//! Contains all HTTP endpoint handling logic

pub mod health;
pub mod review;

use crate::config::Settings;
use crate::middleware::logging::request_logging_middleware;
use crate::services::ReviewRelay;
use anyhow::Result;
use axum::{http::HeaderValue, routing::get, routing::post, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub settings: Settings,
    pub relay: ReviewRelay,
}

/// Create application router
pub async fn create_router(settings: Settings) -> Result<Router> {
    // Create the upstream relay
    let relay = ReviewRelay::new(settings.clone())?;

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        relay,
    });

    // Create middleware stack
    let middleware_stack = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_logging_middleware))
        .layer(RequestBodyLimitLayer::new(
            settings.request.max_request_size,
        ));

    // Create routes
    let router = Router::new()
        .route("/api/review", post(review::handle_review))
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(app_state)
        .layer(middleware_stack);

    let router = if settings.security.cors_enabled {
        router.layer(build_cors_layer(&settings))
    } else {
        router
    };

    Ok(router)
}

/// Build the CORS layer from the configured origin list
fn build_cors_layer(settings: &Settings) -> CorsLayer {
    let wildcard = settings
        .security
        .allowed_origins
        .iter()
        .any(|origin| origin == "*");

    if wildcard {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = settings
            .security
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
