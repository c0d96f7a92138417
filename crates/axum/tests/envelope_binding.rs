//! Tests for the envelope-to-response binding and the validation adapter.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::body_json;
use manila_axum::validate::bad_request_from;
use manila_axum::IntoApiResponse;
use manila_core::{factory, EnvelopeError};
use serde_json::json;
use validator::{Validate, ValidationErrors};

#[derive(Validate)]
struct SignUp {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
}

// ---------------------------------------------------------------------------
// Test: success envelopes default to 200, or a caller-supplied status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_envelope_defaults_to_200() {
    let response = factory::success_with(7).into_api_response();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"data": 7}));
}

#[tokio::test]
async fn success_envelope_takes_the_caller_default() {
    let response = factory::success().into_api_response_with(StatusCode::CREATED);

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!({}));
}

// ---------------------------------------------------------------------------
// Test: failed envelopes take their status from error.code
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_envelope_uses_its_error_code() {
    let response = factory::not_found(Some("UserId"), 42).into_api_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": {
            "code": 404,
            "message": "The specified resource was not found.",
            "details": {"UserId": 42},
        }})
    );
}

// ---------------------------------------------------------------------------
// Test: validation failures become 400 envelopes keyed by field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_report_becomes_bad_request_envelope() {
    let report = SignUp {
        name: String::new(),
    }
    .validate()
    .unwrap_err();

    let envelope = bad_request_from(&report).unwrap();
    let response = envelope.into_api_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": {
            "code": 400,
            "message": "Request validation failed.",
            "details": {"name": ["name is required"]},
        }})
    );
}

// ---------------------------------------------------------------------------
// Test: a clean validation report is a caller error
// ---------------------------------------------------------------------------

#[test]
fn empty_validation_report_is_rejected() {
    let result = bad_request_from(&ValidationErrors::new());

    assert_matches!(result, Err(EnvelopeError::NoValidationErrors));
}
