use futures_util::future::try_join_all;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::ServiceError;
use crate::store::DocumentStore;

impl DocumentStore {
    /// Read every named document concurrently and combine them into one
    /// object keyed by name, in the order given.
    ///
    /// All reads must succeed; there is no partial result. The combined
    /// object is written to the audit log as compact JSON.
    pub async fn merge_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Map<String, Value>, ServiceError> {
        let reads = names.iter().map(|name| {
            let name = name.as_ref();
            async move { self.docs.read(name).await.map(|doc| (name.to_string(), Value::Object(doc))) }
        });
        let result = try_join_all(reads).await.map(|docs| docs.into_iter().collect::<Map<String, Value>>());
        if let Ok(merged) = &result {
            debug!(count = merged.len(), "documents merged");
            self.audit.log(Value::Object(merged.clone()).to_string()).await;
        }
        self.finish("merge", result).await
    }
}
