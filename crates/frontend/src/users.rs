use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use models::user::{User, UserInput};

use crate::errors::ApiError;
use crate::routes::FrontendState;

/// List all users.
pub async fn list_users(State(state): State<FrontendState>) -> Json<Vec<User>> {
    Json(state.users.list().await)
}

/// Create a user, then forward the record to the storage back end.
/// The local user map and the kv store are separate stores.
pub async fn create_user(
    State(state): State<FrontendState>,
    Json(input): Json<UserInput>,
) -> Result<Json<User>, ApiError> {
    let user = state.users.create(input).await;

    let value = serde_json::to_string(&user).map_err(|e| ApiError(e.to_string()))?;
    state
        .rpc
        .call("createUser", json!({"key": user.id, "value": value}))
        .await
        .map_err(|e| ApiError(e.to_string()))?;

    Ok(Json(user))
}

/// Fetch one user by id.
pub async fn get_user(
    State(state): State<FrontendState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, StatusCode> {
    match state.users.get(id).await {
        Some(user) => Ok(Json(user)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Store the payload under the path id, inserting when absent.
pub async fn update_user(
    State(state): State<FrontendState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UserInput>,
) -> Json<User> {
    Json(state.users.upsert(id, input).await)
}

/// Delete one user by id.
pub async fn delete_user(State(state): State<FrontendState>, Path(id): Path<Uuid>) -> StatusCode {
    if state.users.remove(id).await {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}
