use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// Failure while talking to the storage back end; surfaces as 502.
#[derive(Debug)]
pub struct ApiError(pub String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.0;
        error!(error = %msg, "upstream rpc call failed");
        let status = StatusCode::BAD_GATEWAY;
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
