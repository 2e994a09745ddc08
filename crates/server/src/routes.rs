use axum::middleware;
use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::auth::{self, ServerState};

pub mod config;

pub async fn root() -> &'static str {
    "VPS Config Server is running."
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes plus the token-guarded
/// config API.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    // Public routes (banner + health)
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    // Guarded config API routes
    let config_api = Router::new()
        .route(
            "/api/config/:user_id",
            get(config::get_config)
                .post(config::set_config)
                .delete(config::delete_config),
        )
        .route("/api/config/create/:user_id", post(config::create_config))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth_token,
        ));

    // Compose
    public
        .merge(config_api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 请求到达时打点
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
