//! Domain-specific assertion macros for advice harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! ordering or response-shape rule that was broken.

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Assert that a `GET /entries` body is sorted by `timestamp` descending.
///
/// ```rust
/// assert_newest_first!(resp.body);
/// ```
#[macro_export]
macro_rules! assert_newest_first {
    ($body:expr) => {{
        let body: &serde_json::Value = &$body;
        let entries = body.as_array().expect("list body is an array");
        let stamps: Vec<chrono::DateTime<chrono::Utc>> = entries
            .iter()
            .map(|e| {
                e["timestamp"]
                    .as_str()
                    .expect("timestamp is a string")
                    .parse()
                    .expect("timestamp is RFC 3339")
            })
            .collect();
        for (i, pair) in stamps.windows(2).enumerate() {
            if pair[0] < pair[1] {
                panic!(
                    "assert_newest_first! failed at index {}:\n  {} is older than the entry after it ({})",
                    i, pair[0], pair[1]
                );
            }
        }
    }};
}

// ---------------------------------------------------------------------------
// Response shape
// ---------------------------------------------------------------------------

/// Assert that a response carries `status` and exactly `{"error": message}`.
///
/// ```rust
/// assert_error_body!(resp, StatusCode::BAD_REQUEST, "Advice text is required and must be a string.");
/// ```
#[macro_export]
macro_rules! assert_error_body {
    ($resp:expr, $status:expr, $message:expr) => {{
        let resp = &$resp;
        pretty_assertions::assert_eq!(resp.status, $status, "unexpected status, body: {}", resp.body);
        pretty_assertions::assert_eq!(resp.body, serde_json::json!({ "error": $message }));
    }};
}

/// Assert that a JSON value is a well-formed entry: numeric id, string text,
/// RFC 3339 timestamp, and no other fields.
#[macro_export]
macro_rules! assert_entry_shape {
    ($value:expr) => {{
        let value: &serde_json::Value = &$value;
        let obj = value.as_object().expect("entry is an object");
        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        pretty_assertions::assert_eq!(keys, vec!["id", "text", "timestamp"]);
        assert!(obj["id"].is_u64(), "id is not an unsigned integer: {}", obj["id"]);
        assert!(obj["text"].is_string(), "text is not a string: {}", obj["text"]);
        obj["timestamp"]
            .as_str()
            .expect("timestamp is a string")
            .parse::<chrono::DateTime<chrono::Utc>>()
            .expect("timestamp is RFC 3339");
    }};
}
