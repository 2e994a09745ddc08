//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the configuration storage directory exists, creating it if missing.
pub async fn ensure_env(config_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    let dir = config_dir.as_ref();
    if tokio::fs::metadata(dir).await.is_err() {
        info!(dir = %dir.display(), "config directory missing; creating");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}
