use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    extract::State,
    Json, Router,
};
use chrono::Utc;
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::{Health, Status};
use service::DocumentStoreApi;

pub mod documents;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStoreApi>,
    /// Name reported by `/status`.
    pub owner: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn home() -> impl IntoResponse {
    ([("My-custom-header", "This is a great API")], "Welcome to my server")
}

async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let body = Status::up(state.owner.clone(), Utc::now().timestamp_millis());
    ([("Another-Header", "more things")], Json(body))
}

async fn metrics() -> impl IntoResponse {
    match service::metrics::encode_metrics() {
        Ok(text) => (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; version=0.0.4")], text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, [(header::CONTENT_TYPE, "text/plain")], e),
    }
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(home))
        .route("/status", get(status))
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    let store_routes = Router::new()
        .route("/set", patch(documents::set_value))
        .route("/get", get(documents::get_value))
        .route("/remove", axum::routing::delete(documents::remove_key))
        .route("/files", post(documents::create_file).delete(documents::delete_file))
        .route("/union", get(documents::union))
        .route("/intersection", get(documents::intersection))
        .route("/difference", get(documents::difference))
        .route("/merge", get(documents::merge));

    public
        .merge(store_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx responses are logged at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
