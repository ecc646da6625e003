use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;

/// Create the application router with all endpoints
pub fn create_router() -> Router {
    // Create CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Statement upload
        .route("/parse/sg/csv", post(handlers::parse_sg_csv))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
