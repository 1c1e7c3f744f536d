//! Tests for domain error construction and serde contracts.

use super::*;
use super::DomainError as Error;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = TraceId::scope(trace_id, async move {
        Error::try_new(ErrorCode::InternalError, "boom")
            .expect("validation accepts non-empty message")
    })
    .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
#[tokio::test]
async fn deserialising_without_trace_clears_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let payload = json!({ "code": "invalid_request", "message": "bad" });

    let error = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("payload without trace is valid")
    })
    .await;

    assert!(error.trace_id().is_none());
}

#[rstest]
fn serialises_camel_case_and_skips_absent_fields(expected_trace_id: String) {
    let error = Error::not_found("user profile not found").with_trace_id(expected_trace_id);
    let value = serde_json::to_value(&error).expect("serialise error");

    assert_eq!(value.get("code"), Some(&json!("not_found")));
    assert_eq!(value.get("traceId"), Some(&json!(TRACE_ID)));
    assert!(value.get("details").is_none());
}

#[rstest]
#[case(json!({ "code": "not_found", "message": "  " }))]
#[case(json!({ "code": "not_found", "message": "gone", "traceId": " " }))]
fn deserialising_rejects_blank_fields(#[case] payload: serde_json::Value) {
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
fn details_round_trip_through_serde() {
    let error = Error::invalid_request("bad").with_details(json!({ "field": "username" }));
    let value = serde_json::to_value(&error).expect("serialise error");
    let parsed: Error = serde_json::from_value(value).expect("deserialise error");
    assert_eq!(parsed.details(), Some(&json!({ "field": "username" })));
}
