//! Assertions over the backend's JSON error contract.
//!
//! Kept free of backend types so that the contract is checked the way a
//! client sees it: status line, `x-trace-id` header and body fields.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::StatusCode;
use serde::Deserialize;

/// Client-side view of an error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBodyLike {
    pub message: String,
    pub code: String,
    pub status: u16,
    pub trace_id: String,
}

/// Assert that a response is an error with the expected status and code.
///
/// Also checks that the body `trace_id` matches the `x-trace-id` header and,
/// when given, that `message` contains the expected fragment. Returns the
/// parsed body for further assertions.
pub async fn assert_error_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: StatusCode,
    expected_code: &str,
    expected_message_contains: Option<&str>,
) -> ErrorBodyLike {
    let status = resp.status();
    let trace_header = resp
        .headers()
        .get("x-trace-id")
        .map(|v| v.to_str().expect("x-trace-id should be valid UTF-8").to_string());
    let body = actix_web::test::read_body(resp).await;

    assert_eq!(
        status,
        expected_status,
        "unexpected status, body: {}",
        String::from_utf8_lossy(&body)
    );

    let parsed: ErrorBodyLike =
        serde_json::from_slice(&body).expect("error body should be valid JSON");

    assert_eq!(parsed.code, expected_code);
    assert_eq!(parsed.status, expected_status.as_u16());

    let trace_header = trace_header.expect("x-trace-id header should be present");
    assert_eq!(
        parsed.trace_id, trace_header,
        "trace_id in body should match x-trace-id header"
    );

    if let Some(fragment) = expected_message_contains {
        assert!(
            parsed.message.contains(fragment),
            "expected message to contain '{}', got '{}'",
            fragment,
            parsed.message
        );
    }

    parsed
}
