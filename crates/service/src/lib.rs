//! Per-file JSON document store.
//! - Each collection is one file holding one JSON object.
//! - Operations read fresh, mutate in memory and write the whole document back.
//! - Every outcome is appended to a shared audit log and also returned as a
//!   typed `Result`.

pub mod errors;
pub mod runtime;
pub mod metrics;
pub mod storage;
pub mod store;
pub mod kv;
pub mod lifecycle;
pub mod set_algebra;
pub mod merge;
pub mod api;
#[cfg(test)]
pub mod test_support;

pub use api::DocumentStoreApi;
pub use errors::ServiceError;
pub use storage::document::Document;
pub use store::DocumentStore;
