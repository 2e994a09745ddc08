use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use service::storage::config_store::ConfigStore;
use tracing::warn;

use crate::errors::ApiError;

/// Header carrying the shared secret on every guarded request.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Clone)]
pub struct ServerAuthConfig {
    /// Shared secret. `None` means the deployment never set one; guarded
    /// routes then answer 500 instead of letting anyone through.
    pub token: Option<String>,
}

#[derive(Clone)]
pub struct ServerState {
    pub store: ConfigStore,
    pub auth: ServerAuthConfig,
}

/// Token gate for the config API. Compares `X-Auth-Token` byte-for-byte
/// against the configured secret before any handler runs.
pub async fn require_auth_token(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.auth.token.as_deref() else {
        warn!("rejecting request: AUTH_TOKEN is not configured");
        return Err(ApiError::Internal(
            "Server not configured with AUTH_TOKEN".to_string(),
        ));
    };

    let presented = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    match presented {
        Some(token) if token == expected => Ok(next.run(req).await),
        _ => Err(ApiError::Unauthorized("Unauthorized".to_string())),
    }
}
