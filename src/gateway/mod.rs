//! HTTP gateway (Axum) over the detector and the document store.

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, Method, StatusCode, header, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use error::GatewayError;
pub use handler::{
    check_duplicate_handler, delete_file_handler, list_files_handler, nlp_check_handler,
    raw_file_handler, upload_handler,
};
pub use state::AppState;

use crate::constants::{
    PLAGCHECK_STATUS_ERROR, PLAGCHECK_STATUS_HEADER, PLAGCHECK_STATUS_HEALTHY,
    PLAGCHECK_STATUS_READY,
};
use crate::storage::DocumentStore;

pub fn create_router_with_state<S>(state: AppState<S>) -> Router
where
    S: DocumentStore + Clone + 'static,
{
    let router = Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<S>))
        .route("/nlp-check/{file_id}", get(nlp_check_handler::<S>))
        .route("/upload", post(upload_handler::<S>))
        .route("/files", get(list_files_handler::<S>))
        .route("/files/{file_id}/raw", get(raw_file_handler::<S>))
        .route("/delete/{file_id}", post(delete_file_handler::<S>))
        .route("/check-duplicate/{file_id}", get(check_duplicate_handler::<S>))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http());

    let router = match state.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(e) => {
            warn!(origin = %state.cors_origin, error = %e, "Invalid CORS origin, CORS disabled");
            router
        }
    };

    router.with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub storage: &'static str,
    pub encoder: &'static str,
    pub encoder_mode: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        PLAGCHECK_STATUS_HEADER,
        HeaderValue::from_static(PLAGCHECK_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: DocumentStore + Clone + 'static,
{
    let storage_status = if state.storage_path.is_dir() {
        PLAGCHECK_STATUS_READY
    } else {
        PLAGCHECK_STATUS_ERROR
    };

    let encoder_mode = if state.encoder.is_stub() { "stub" } else { "real" };

    let components = ComponentStatus {
        http: PLAGCHECK_STATUS_READY,
        storage: storage_status,
        encoder: PLAGCHECK_STATUS_READY,
        encoder_mode,
    };

    let is_ready = components.storage == PLAGCHECK_STATUS_READY;

    let (status_code, status_msg) = if is_ready {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "pending")
    };

    let mut headers = HeaderMap::new();
    headers.insert(PLAGCHECK_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
