//! Union, intersection and symmetric difference over the top-level key sets
//! of two documents. Values are never compared.
//!
//! Results follow document key order: keys of the first document come first
//! in their stored order, then keys only the second document has.

use std::collections::HashSet;

use serde_json::Value;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::document::Document;
use crate::store::DocumentStore;

/// Keys of `a` followed by keys of `b` not already seen.
pub fn union_keys(a: &Document, b: &Document) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    a.keys()
        .chain(b.keys())
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect()
}

/// Keys of `a` that `b` also has.
pub fn intersection_keys(a: &Document, b: &Document) -> Vec<String> {
    a.keys().filter(|k| b.contains_key(k.as_str())).cloned().collect()
}

/// Keys present in exactly one of the two documents.
pub fn difference_keys(a: &Document, b: &Document) -> Vec<String> {
    let only_a = a.keys().filter(|k| !b.contains_key(k.as_str()));
    let only_b = b.keys().filter(|k| !a.contains_key(k.as_str()));
    only_a.chain(only_b).cloned().collect()
}

impl DocumentStore {
    pub async fn union(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> {
        self.compare("union", file_a, file_b, union_keys).await
    }

    pub async fn intersection(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> {
        self.compare("intersection", file_a, file_b, intersection_keys).await
    }

    pub async fn difference(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> {
        self.compare("difference", file_a, file_b, difference_keys).await
    }

    /// Read both documents concurrently, then apply `op` to them. Either read
    /// failing fails the whole comparison.
    async fn compare(
        &self,
        name: &str,
        file_a: &str,
        file_b: &str,
        op: fn(&Document, &Document) -> Vec<String>,
    ) -> Result<Vec<String>, ServiceError> {
        let result = tokio::try_join!(self.docs.read(file_a), self.docs.read(file_b))
            .map(|(a, b)| op(&a, &b));
        if let Ok(keys) = &result {
            debug!(op = name, %file_a, %file_b, count = keys.len(), "key sets compared");
            let rendered = Value::from(keys.clone()).to_string();
            self.audit.log(rendered).await;
        }
        self.finish(name, result).await
    }
}
