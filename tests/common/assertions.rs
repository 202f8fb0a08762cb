//! Assertion helpers

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::Value;

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert the status and the `{error, status}` body of an error response
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let body: Value = response.json();
    assert_eq!(body["error"], message);
    assert_eq!(body["status"], status.as_u16());
}

/// Assert a JSON `{error, status}` body whose message is not fixed
pub fn assert_json_error(response: &TestResponse, status: StatusCode) {
    assert_eq!(response.status_code(), status, "{}", response.text());
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/json"),
        "expected a JSON error body, got {:?}",
        content_type
    );
    let body: Value = response.json();
    assert!(body["error"].is_string(), "{}", body);
    assert_eq!(body["status"], status.as_u16());
}

/// Assert only the status of a response
pub fn assert_status(response: &TestResponse, status: StatusCode) {
    assert_eq!(response.status_code(), status, "{}", response.text());
}
