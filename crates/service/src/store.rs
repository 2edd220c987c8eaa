use std::{path::PathBuf, sync::Arc};

use crate::errors::ServiceError;
use crate::metrics;
use crate::storage::{audit_log::AuditLog, document::DocumentAccessor};

/// The document store engine.
///
/// Stateless between calls: every operation reads fresh from disk, and its
/// outcome is both written to the audit log and returned to the caller.
/// Operation groups live in `kv`, `lifecycle`, `set_algebra` and `merge`.
#[derive(Clone)]
pub struct DocumentStore {
    pub(crate) docs: DocumentAccessor,
    pub(crate) audit: Arc<AuditLog>,
}

impl DocumentStore {
    /// The audit log is reserved: no document operation can read, replace or
    /// delete it, even when it lives inside `data_dir`.
    pub fn new<R: Into<PathBuf>, L: Into<PathBuf>>(data_dir: R, log_path: L) -> Self {
        let log_path = log_path.into();
        let docs = DocumentAccessor::new(data_dir).reserve(&log_path);
        Self { docs, audit: Arc::new(AuditLog::new(log_path)) }
    }

    pub fn accessor(&self) -> &DocumentAccessor {
        &self.docs
    }

    /// Write `ERROR <err>` to the audit log.
    pub(crate) async fn log_error(&self, err: &ServiceError) {
        self.audit.log(format!("ERROR {err}")).await;
    }

    /// Common tail of every operation: log a failure, count the outcome.
    pub(crate) async fn finish<T>(&self, op: &str, result: Result<T, ServiceError>) -> Result<T, ServiceError> {
        if let Err(e) = &result {
            self.log_error(e).await;
        }
        metrics::record(op, &result);
        result
    }
}
