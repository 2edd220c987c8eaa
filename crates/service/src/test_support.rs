#![cfg(test)]
use std::path::{Path, PathBuf};

use serde_json::Value;
use uuid::Uuid;

use crate::store::DocumentStore;

/// Scratch directory under the system temp dir, removed on drop.
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub async fn new(prefix: &str) -> Result<Self, anyhow::Error> {
        let path = std::env::temp_dir().join(format!("docstore_{prefix}_{}", Uuid::new_v4()));
        tokio::fs::create_dir_all(&path).await?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A store rooted here, logging to `log.txt` in the same directory.
    pub fn store(&self) -> DocumentStore {
        DocumentStore::new(&self.path, self.path.join("log.txt"))
    }

    pub async fn write_json(&self, name: &str, value: Value) -> Result<(), anyhow::Error> {
        tokio::fs::write(self.path.join(name), serde_json::to_vec(&value)?).await?;
        Ok(())
    }

    pub async fn read_json(&self, name: &str) -> Result<Value, anyhow::Error> {
        let bytes = tokio::fs::read(self.path.join(name)).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn log_lines(&self, name: &str) -> Result<Vec<String>, anyhow::Error> {
        match tokio::fs::read_to_string(self.path.join(name)).await {
            Ok(s) => Ok(s.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Payloads of the audit log with the trailing timestamp stripped.
    pub async fn log_payloads(&self) -> Result<Vec<String>, anyhow::Error> {
        Ok(self
            .log_lines("log.txt")
            .await?
            .into_iter()
            .map(|l| match l.rsplit_once(' ') {
                Some((payload, ts)) if ts.parse::<i64>().is_ok() => payload.to_string(),
                _ => l,
            })
            .collect())
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}
