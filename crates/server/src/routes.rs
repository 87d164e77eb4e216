use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::rpc::RpcRequest;
use common::types::Health;
use service::storage::kv_store::KvStore;

use crate::dispatch;

/// Shared handler state: the injected storage backend.
#[derive(Clone)]
pub struct RpcState {
    pub store: Arc<dyn KvStore>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// The single JSON-RPC endpoint. Decode failures are transport-level
/// (plain 400/500), never JSON-RPC error objects.
async fn handle_rpc(State(state): State<RpcState>, body: Bytes) -> Response {
    let req: RpcRequest = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(_) => return (StatusCode::BAD_REQUEST, "Invalid request").into_response(),
    };

    let res = dispatch::dispatch(&state.store, req).await;

    match serde_json::to_vec(&res) {
        Ok(buf) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            buf,
        )
            .into_response(),
        Err(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode response").into_response()
        }
    }
}

/// Build the full application router for the storage server.
pub fn build_router(state: RpcState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rpc", post(handle_rpc))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
