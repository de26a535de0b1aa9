// Unit tests for the SmaError value: envelope mapping, fallbacks, and
// location tracking.

use crate::error::api::{SmaError, codes};
use crate::types::envelope::ErrorBody;

use common::HttpStatusCode;

use serde_json::json;

/// **VALUE**: Verifies envelope mapping carries every structured field the
/// server provides (code, retryable, retryAfter, requestId, details).
///
/// **WHY THIS MATTERS**: Callers branch on `code` and `retryable` without
/// re-inspecting the transport layer. If any field is dropped during
/// mapping, retry decisions upstream silently degrade.
///
/// **BUG THIS CATCHES**: Would catch a field renamed or forgotten in
/// `from_envelope` after a refactor of the error payload schema.
#[test]
fn given_full_error_body_when_mapped_then_all_fields_carried() {
    // GIVEN: A server error payload with every field populated
    let body = ErrorBody {
        message: Some("Too many requests".to_string()),
        code: Some("RATE_LIMITED".to_string()),
        retryable: true,
        retry_after: Some(30),
        request_id: Some("req_123".to_string()),
        details: Some(json!({"limit": 100})),
    };

    // WHEN: Mapping it with its HTTP status
    let err = SmaError::from_envelope(HttpStatusCode(429), Some(body));

    // THEN: Every field survives the mapping
    assert_eq!(err.code, "RATE_LIMITED");
    assert_eq!(err.message, "Too many requests");
    assert_eq!(err.status, Some(HttpStatusCode(429)));
    assert!(err.retryable);
    assert_eq!(err.retry_after, Some(30));
    assert_eq!(err.request_id.as_deref(), Some("req_123"));
    assert_eq!(err.details, Some(json!({"limit": 100})));
}

/// **VALUE**: Verifies the generic fallbacks when the server provides no
/// structured error payload.
///
/// **WHY THIS MATTERS**: Proxies and load balancers return bare status
/// pages. The SDK must still produce a branchable error: code HTTP_ERROR,
/// message "HTTP <status>", not retryable.
///
/// **BUG THIS CATCHES**: Would catch a refactor that panics or produces an
/// empty code when `error` is absent from the envelope.
#[test]
fn given_missing_error_body_when_mapped_then_generic_http_error() {
    let err = SmaError::from_envelope(HttpStatusCode(502), None);

    assert_eq!(err.code, codes::HTTP_ERROR);
    assert_eq!(err.message, "HTTP 502");
    assert!(!err.retryable);
    assert_eq!(err.retry_after, None);
}

/// **VALUE**: Verifies network errors are always flagged retryable.
///
/// **WHY THIS MATTERS**: Transport failures surface as a
/// retryable NETWORK_ERROR after the internal retry budget is spent, so
/// the caller knows reissuing the same request is safe.
#[test]
fn given_network_error_when_constructed_then_retryable_with_network_code() {
    let err = SmaError::network("Network error: connection refused");

    assert_eq!(err.code, codes::NETWORK_ERROR);
    assert!(err.retryable);
    assert!(err.status.is_none());
}

/// **VALUE**: Verifies operation errors default to not retryable.
///
/// **WHY THIS MATTERS**: "Call succeeded but operation failed" (HTTP 200,
/// success:false) must not invite blind retries; the server already gave
/// a definitive answer.
#[test]
fn given_operation_error_when_constructed_then_not_retryable() {
    let err = SmaError::operation(codes::POST_NOT_FOUND, "Post not found");

    assert_eq!(err.code, codes::POST_NOT_FOUND);
    assert!(!err.retryable);
}

/// **VALUE**: Verifies Display output includes the code, message, and the
/// originating file location.
///
/// **BUG THIS CATCHES**: Would catch removal of `#[track_caller]` from the
/// constructors or a Display format that drops the location.
#[test]
fn given_error_when_formatted_then_includes_code_message_and_location() {
    let err = SmaError::operation(codes::LOGIN_FAILED, "Login failed");
    let rendered = format!("{err}");

    assert!(rendered.contains("SmaError(LOGIN_FAILED)"));
    assert!(rendered.contains("Login failed"));
    assert!(rendered.contains("error.rs"));
}

/// **VALUE**: Verifies retryable status classification matches the fixed
/// server-error set {429, 500, 502, 503, 504}.
///
/// **WHY THIS MATTERS**: This set drives the transport retry loop for
/// idempotent and non-idempotent methods alike; widening it would retry
/// non-idempotent calls on definitive failures.
#[test]
fn given_status_codes_when_classified_then_retryable_set_is_exact() {
    for code in [429u16, 500, 502, 503, 504] {
        assert!(HttpStatusCode(code).is_retryable(), "{code} should retry");
    }
    for code in [400u16, 401, 403, 404, 409, 422, 501] {
        assert!(!HttpStatusCode(code).is_retryable(), "{code} should not retry");
    }
}
