use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ServiceError;
use crate::storage::document::Document;
use crate::store::DocumentStore;

/// Trait abstraction over the document store, as seen by front ends.
/// The file-backed `DocumentStore` is the only implementation in this crate.
#[async_trait]
pub trait DocumentStoreApi: Send + Sync {
    async fn get(&self, file: &str, key: &str) -> Result<Option<Value>, ServiceError>;
    async fn set(&self, file: &str, key: &str, value: Value) -> Result<(), ServiceError>;
    async fn delete(&self, file: &str, key: &str) -> Result<bool, ServiceError>;
    async fn create_file(&self, file: &str, initial: Option<Document>) -> Result<(), ServiceError>;
    async fn delete_file(&self, file: &str) -> Result<(), ServiceError>;
    async fn union(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError>;
    async fn intersection(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError>;
    async fn difference(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError>;
    async fn merge_all(&self, names: &[String]) -> Result<Map<String, Value>, ServiceError>;
}

#[async_trait]
impl DocumentStoreApi for DocumentStore {
    async fn get(&self, file: &str, key: &str) -> Result<Option<Value>, ServiceError> { DocumentStore::get(self, file, key).await }
    async fn set(&self, file: &str, key: &str, value: Value) -> Result<(), ServiceError> { DocumentStore::set(self, file, key, value).await }
    async fn delete(&self, file: &str, key: &str) -> Result<bool, ServiceError> { DocumentStore::delete(self, file, key).await }
    async fn create_file(&self, file: &str, initial: Option<Document>) -> Result<(), ServiceError> {
        DocumentStore::create_file(self, file, initial.as_ref()).await
    }
    async fn delete_file(&self, file: &str) -> Result<(), ServiceError> { DocumentStore::delete_file(self, file).await }
    async fn union(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> { DocumentStore::union(self, file_a, file_b).await }
    async fn intersection(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> { DocumentStore::intersection(self, file_a, file_b).await }
    async fn difference(&self, file_a: &str, file_b: &str) -> Result<Vec<String>, ServiceError> { DocumentStore::difference(self, file_a, file_b).await }
    async fn merge_all(&self, names: &[String]) -> Result<Map<String, Value>, ServiceError> { DocumentStore::merge_all(self, names).await }
}
