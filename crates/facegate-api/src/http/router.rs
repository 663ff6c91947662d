//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Face flows
        .route("/attendance", post(handlers::attendance::record_attendance))
        .route("/faces/enroll", post(handlers::enroll::enroll_face))
        // Credential login
        .route("/auth/login", post(handlers::auth::login))
        // Employee directory
        .route(
            "/employees",
            get(handlers::employee::list_employees).post(handlers::employee::create_employee),
        )
        .route("/employees/{id}", put(handlers::employee::update_employee))
        // Reports
        .route(
            "/reports/attendance",
            get(handlers::recap::attendance_report),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
