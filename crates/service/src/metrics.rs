use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

use crate::errors::ServiceError;

// Prometheus metrics (default registry)
pub static OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "docstore_operations_total",
        "Store operations by name and outcome",
        &["op", "outcome"]
    )
    .expect("register operations_total")
});

/// Count one finished operation.
pub fn record<T>(op: &str, result: &Result<T, ServiceError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    OPERATIONS_TOTAL.with_label_values(&[op, outcome]).inc();
}

/// Render the default registry in the Prometheus text format.
pub fn encode_metrics() -> Result<String, String> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| format!("metrics encode error: {e}"))?;
    String::from_utf8(buffer).map_err(|e| format!("metrics encode error: {e}"))
}
