use std::net::SocketAddr;

use dotenvy::dotenv;
use tracing::info;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "hostinfo", event = "logger_init", "tracing subscriber initialized");
}

/// Standalone host diagnostics page. Runs on its own listener and shares
/// nothing with the config server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let host = std::env::var("HOSTINFO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("HOSTINFO_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let app = server::hostinfo::build_router();
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(service = "hostinfo", event = "start", %addr, "hostinfo service starting");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
