//! Shared building blocks for the TripGuide crates: wire types reused by
//! several layers and the tracing subscriber setup.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn message_body_serializes_message_field() {
        let body = types::MessageBody::new("Forbidden access");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "Forbidden access"}));
    }
}
