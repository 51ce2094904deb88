use axum::{
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    db::AgendaStore,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
};

pub mod agenda;
pub mod extract;
pub mod events;
pub mod recommendations;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AgendaStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AgendaStore>) -> Self {
        Self { store }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(events::list))
        .route("/events/:event_id", get(events::detail))
        .route(
            "/users/:user_id/recommendations",
            get(recommendations::recommend),
        )
        .route("/users/:user_id/agenda", get(agenda::show))
        .route("/users/:user_id/agenda/talks", post(agenda::add_talk))
        .route(
            "/users/:user_id/agenda/talks/:talk_id",
            delete(agenda::remove_talk),
        )
        .route(
            "/users/:user_id/agenda/exhibitors",
            post(agenda::add_exhibitor),
        )
        .route(
            "/users/:user_id/agenda/exhibitors/:exhibitor_id",
            delete(agenda::remove_exhibitor),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
