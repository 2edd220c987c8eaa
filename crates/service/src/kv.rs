//! Get/set/delete of one top-level key inside a document.
//!
//! Every mutation reads the whole document, edits it in memory and writes the
//! whole document back. Two concurrent mutations of the same file race: the
//! later write wins and the other update is lost. The file itself always
//! stays parsable.

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::store::DocumentStore;

/// Whether `value` counts as present for `get`.
///
/// `null`, `false`, `0` and `""` are treated the same as a missing key.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Audit log rendering of a value: strings raw, anything else as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl DocumentStore {
    /// Fetch `doc[key]`.
    ///
    /// Returns `Ok(None)` and logs `ERROR <key> invalid key on <file>` when the
    /// key is missing or its value is falsy.
    pub async fn get(&self, file: &str, key: &str) -> Result<Option<Value>, ServiceError> {
        let result = match self.docs.read(file).await {
            Ok(mut doc) => match doc.remove(key) {
                Some(value) if is_truthy(&value) => {
                    self.audit.log(render_value(&value)).await;
                    Ok(Some(value))
                }
                _ => {
                    debug!(%file, %key, "get on absent key");
                    self.audit.log(format!("ERROR {key} invalid key on {file}")).await;
                    Ok(None)
                }
            },
            Err(e) => Err(e),
        };
        self.finish("get", result).await
    }

    /// Assign `doc[key] = value` and rewrite the document.
    pub async fn set(&self, file: &str, key: &str, value: Value) -> Result<(), ServiceError> {
        let result = async {
            let mut doc = self.docs.read(file).await?;
            doc.insert(key.to_string(), value);
            self.docs.write(file, &doc).await
        }
        .await;
        if result.is_ok() {
            info!(%file, %key, "value set");
            self.audit.log(format!("{key} set on {file}")).await;
        }
        self.finish("set", result).await
    }

    /// Remove `key` and rewrite the document. Returns whether the key existed;
    /// removing an absent key is not an error.
    pub async fn delete(&self, file: &str, key: &str) -> Result<bool, ServiceError> {
        let result = async {
            let mut doc = self.docs.read(file).await?;
            let existed = doc.shift_remove(key).is_some();
            self.docs.write(file, &doc).await?;
            Ok::<bool, ServiceError>(existed)
        }
        .await;
        if let Ok(existed) = result {
            info!(%file, %key, existed, "key removed");
            self.audit.log(format!("{key} removed from {file}")).await;
        }
        self.finish("delete", result).await
    }
}
