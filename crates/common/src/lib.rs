pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn status_serializes_expected_fields() {
        let s = types::Status::up("andrew maney", 1563221866619);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v, serde_json::json!({"up": true, "owner": "andrew maney", "timestamp": 1563221866619i64}));
    }
}
