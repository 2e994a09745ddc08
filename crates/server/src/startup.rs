use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_default;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::auth::{ServerAuthConfig, ServerState};
use crate::routes;
use service::{runtime, storage::config_store::ConfigStore};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load the full configuration, falling back to env-only defaults when no
/// usable config file exists.
fn load_config() -> AppConfig {
    match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            info!(error = %e, "no usable config file, falling back to environment");
            AppConfig::from_env()
        }
    }
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = load_config();

    // 确保配置目录存在（启动时创建）
    runtime::ensure_env(&cfg.store.config_dir).await?;

    let store = ConfigStore::new(cfg.store.config_dir.clone()).await?;

    if cfg.auth.token.is_none() {
        warn!("AUTH_TOKEN is not set; every config API request will be answered with 500");
    }

    let state = ServerState {
        store,
        auth: ServerAuthConfig {
            token: cfg.auth.token.clone(),
        },
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(cors, state);

    // Bind and serve
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!(%addr, config_dir = %cfg.store.config_dir, "starting config server");
    println!("starting config server at {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
