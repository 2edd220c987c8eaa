//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the document directory exists, creating it when missing.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    if tokio::fs::metadata(data_dir).await.is_err() {
        warn!(%data_dir, "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    info!(%data_dir, "data directory ready");
    Ok(())
}

/// Ensure the parent directory of the audit log exists.
pub async fn ensure_log_parent(log_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_env_creates_missing_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("docstore_env_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();
        let _ = tokio::fs::remove_dir_all(&dir).await;

        ensure_env(&dir_str).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());

        ensure_log_parent(&dir.join("logs").join("log.txt")).await?;
        assert!(tokio::fs::metadata(dir.join("logs")).await?.is_dir());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
