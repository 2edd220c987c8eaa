//! Storage primitives for the document store
//!
//! `document` reads and writes whole JSON documents; `audit_log` appends
//! outcome lines to the shared log.

pub mod audit_log;
pub mod document;
