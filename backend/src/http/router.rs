//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{events, lines, positions, HEALTH};

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Resources are consumed by browser clients on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route(HEALTH, get(handlers::health_check))
        // Field lines
        .route(lines::GET_GONG_FIELD_LINES, get(handlers::get_gong_field_lines))
        .route(lines::GET_FIELD_LINES, get(handlers::get_field_lines))
        // Delegated to the astronomy collaborator
        .route(positions::GET_OBSERVER_POSITION, get(handlers::get_observer_position))
        .route(positions::GET_PSP_POSITION, get(handlers::get_psp_position))
        .route(positions::GET_EVENT_POSITION, get(handlers::get_event_position))
        .route(positions::GET_EARTH_POSITION, get(handlers::get_earth_position))
        .route(events::GET_EVENTS, get(handlers::get_events))
        .fallback(handlers::unknown_endpoint)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
