//! Top-level router assembly
//!
//! Resource routes are mounted under the configured API prefix next to the
//! welcome and health routes. Anything unmatched falls through to a JSON 404,
//! handler panics become a generic 500, and every request is traced.

use super::entity_registry::EntityRegistry;
use super::host::ServerHost;
use crate::core::ApiError;
use crate::core::error::INTERNAL_SERVER_ERROR;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn build_router(
    host: Arc<ServerHost>,
    registry: &EntityRegistry,
    custom_routes: Vec<Router>,
) -> Router {
    let api = registry.build_routes(host.clone());

    let mut app = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check));

    app = match host.api_prefix() {
        "" => app.merge(api),
        prefix => app.nest(prefix, api),
    };

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to the REST API project!" }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "course-catalog"
    }))
}

/// Generic responder for unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_SERVER_ERROR })),
    )
        .into_response()
}
