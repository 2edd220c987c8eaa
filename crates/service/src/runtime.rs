//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the data directory and the audit log's parent exist.
pub async fn ensure_env(data_dir: &str, log_path: &Path) -> anyhow::Result<()> {
    common::env::ensure_env(data_dir).await?;
    common::env::ensure_log_parent(log_path).await
}
