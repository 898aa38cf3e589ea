// API layer module (adapters for controllers)
// Follows Hexagonal Architecture - API is an adapter

pub mod errors;
pub mod extract;
pub mod handlers;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::infrastructure::Store;
use handlers::{devices, health, measures};

/// Builds the application router
///
/// Collection routes answer both with and without the trailing slash.
pub fn router(store: Store) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Device routes
        .route(
            "/devices",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/devices/",
            get(devices::list_devices).post(devices::create_device),
        )
        .route(
            "/devices/:id",
            get(devices::get_device)
                .put(devices::update_device)
                .delete(devices::delete_device),
        )
        // Measure routes
        .route(
            "/measures",
            get(measures::list_measures).post(measures::create_measure),
        )
        .route(
            "/measures/",
            get(measures::list_measures).post(measures::create_measure),
        )
        .route(
            "/measures/:id",
            get(measures::get_measure)
                .put(measures::update_measure)
                .delete(measures::delete_measure),
        )
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(store)
}
