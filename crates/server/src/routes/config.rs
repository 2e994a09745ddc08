use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::auth::ServerState;
use crate::errors::ApiError;

/// Fetch the stored configuration document for a user.
pub async fn get_config(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let doc = state.store.get(&user_id).await?;
    Ok(Json(doc))
}

/// Save the configuration document for a user, creating it if absent.
///
/// Takes the body as raw bytes so an absent or unparseable body maps to a
/// 400 with the fixed `Invalid JSON` message instead of axum's default
/// extractor rejection. Any syntactically valid JSON value is stored,
/// including `{}` and `null`.
pub async fn set_config(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let doc: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON".to_string()))?;
    state.store.set(&user_id, &doc).await?;
    Ok(Json(json!({
        "message": format!("Configuration for {user_id} saved successfully.")
    })))
}

/// Create the default configuration document for a new user.
pub async fn create_config(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.create(&user_id).await?;
    Ok(Json(json!({
        "message": format!("New configuration for {user_id} created successfully.")
    })))
}

/// Delete the stored configuration document for a user.
pub async fn delete_config(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(&user_id).await?;
    Ok(Json(json!({
        "message": format!("Configuration for {user_id} deleted successfully.")
    })))
}
