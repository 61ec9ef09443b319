//! HTTP layer: routing, shared state and error mapping.

use std::env;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tokio::signal;
use tracing::info;

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

pub use crate::core::app_state::AppState;
pub use crate::error_handler::{AppError, AppResult};

use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    analytics::dashboard_route::dashboard,
    complaints::{
        get_complaint_route::get_complaint, similar_complaints_route::similar_complaints,
        submit_complaint_route::submit_complaint, update_status_route::update_status,
        user_complaints_route::user_complaints, verify_resolution_route::verify_resolution,
    },
    departments::{
        department_complaints_route::department_complaints,
        pending_complaints_route::pending_complaints,
    },
    map::{
        clusters_route::clusters, heatmap_route::heatmap, map_complaints_route::map_complaints,
        nearby_route::nearby,
    },
};

/// Builds the application router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/complaints/submit", post(submit_complaint))
        .route("/api/complaints/user/{user_id}", get(user_complaints))
        .route("/api/complaints/{id}", get(get_complaint))
        .route("/api/complaints/{id}/similar", get(similar_complaints))
        .route("/api/complaints/{id}/status", patch(update_status))
        .route("/api/complaints/{id}/verify", post(verify_resolution))
        .route(
            "/api/departments/{dept_name}/complaints",
            get(department_complaints),
        )
        .route(
            "/api/departments/{dept_name}/complaints/pending",
            get(pending_complaints),
        )
        .route("/api/map/complaints", get(map_complaints))
        .route("/api/map/heatmap", get(heatmap))
        .route("/api/map/nearby", get(nearby))
        .route("/api/map/clusters", get(clusters))
        .route("/api/analytics/dashboard", get(dashboard))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state)
}

/// Binds the listener and serves until Ctrl+C.
pub async fn start() -> AppResult<()> {
    let host_url = env::var("API_ADDRESS").map_err(|_| AppError::MissingEnv("API_ADDRESS"))?;
    let state = Arc::new(AppState::from_env()?);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&host_url)
        .await
        .map_err(AppError::Bind)?;
    info!("listening on {host_url}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
