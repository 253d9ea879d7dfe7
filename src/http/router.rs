//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Satellite CRUD
        .route("/satellites", get(handlers::list_satellites))
        .route("/satellites", post(handlers::create_satellite))
        .route("/satellites/{satellite_id}", get(handlers::get_satellite))
        .route(
            "/satellites/{satellite_id}",
            axum::routing::delete(handlers::delete_satellite),
        )
        // Location CRUD and history
        .route("/locations", get(handlers::list_locations))
        .route("/locations", post(handlers::create_location))
        .route("/locations/{location_id}", get(handlers::get_location))
        .route(
            "/locations/{location_id}",
            axum::routing::delete(handlers::delete_location),
        )
        .route(
            "/locations/by-satellite/{sat_id}",
            get(handlers::locations_by_satellite),
        )
        // ISS queries
        .route("/iss/sun", get(handlers::iss_sun))
        .route("/iss/position", get(handlers::iss_position));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
