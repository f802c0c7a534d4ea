//! Router de la API
//!
//! Todas las rutas viven bajo `/api`. Login y health son públicas;
//! el resto pasa por el middleware de autenticación JWT.

pub mod auth_routes;
pub mod expense_routes;
pub mod part_routes;
pub mod report_routes;
pub mod service_routes;
pub mod tractor_routes;

use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{auth::auth_middleware, cors::cors_layer};
use crate::state::AppState;

/// Construir el router completo con sus capas
pub fn create_app_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health_check))
        .merge(auth_routes::create_public_auth_router());

    let protected = Router::new()
        .merge(auth_routes::create_user_router())
        .merge(report_routes::create_dashboard_router())
        .nest("/tractors", tractor_routes::create_tractor_router())
        .nest("/parts", part_routes::create_part_router())
        .nest("/services", service_routes::create_service_router())
        .nest("/expenses", expense_routes::create_expense_router())
        .nest("/reports", report_routes::create_report_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .nest("/api", public.merge(protected))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout)),
        )
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
