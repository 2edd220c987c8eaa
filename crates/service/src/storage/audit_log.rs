use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::{fs, fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::warn;

/// Append-only audit log of operation outcomes.
///
/// Each entry is one line `<payload> <unix-millis>`. The file is opened on the
/// first append and kept open afterwards; the handle sits behind a mutex so
/// appends from concurrent operations never interleave.
pub struct AuditLog {
    path: PathBuf,
    file: Mutex<Option<fs::File>>,
}

impl AuditLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into(), file: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `payload` with the current timestamp. Failures are swallowed.
    ///
    /// Line breaks inside the payload are escaped so one entry stays one line.
    pub async fn log(&self, payload: impl AsRef<str>) {
        let line = format!("{} {}\n", escape_line_breaks(payload.as_ref()), Utc::now().timestamp_millis());
        if let Err(e) = self.append(line.as_bytes()).await {
            warn!(path = %self.path.display(), error = %e, "audit log append failed");
        }
    }

    async fn append(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut guard = self.file.lock().await;
        if guard.is_none() {
            let file = OpenOptions::new().create(true).append(true).open(&self.path).await?;
            *guard = Some(file);
        }
        if let Some(file) = guard.as_mut() {
            file.write_all(bytes).await?;
            file.flush().await?;
        }
        Ok(())
    }
}

fn escape_line_breaks(payload: &str) -> Cow<'_, str> {
    if !payload.contains(['\n', '\r']) {
        return Cow::Borrowed(payload);
    }
    Cow::Owned(payload.replace('\r', "\\r").replace('\n', "\\n"))
}
