//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the configuration directory exists, creating it when missing.
pub async fn ensure_env(config_dir: impl AsRef<Path>) -> anyhow::Result<()> {
    common::env::ensure_env(config_dir).await
}