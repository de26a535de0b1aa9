use crate::types::envelope::ErrorBody;

use common::{ErrorLocation, HttpStatusCode};

use serde_json::Value;
use thiserror::Error as ThisError;

/// Machine-readable error codes raised by the SDK itself.
///
/// Server-provided codes (e.g. `VALIDATION_ERROR`) pass through untouched;
/// these constants cover the paths where the SDK has to supply the code.
pub mod codes {
    /// Transport-level failure after exhausting retries.
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    /// Non-success status with no server-provided code.
    pub const HTTP_ERROR: &str = "HTTP_ERROR";
    /// Envelope data did not match the expected schema.
    pub const RESPONSE_DECODE_FAILED: &str = "RESPONSE_DECODE_FAILED";
    /// Refresh requested with no refresh token held.
    pub const NO_REFRESH_TOKEN: &str = "NO_REFRESH_TOKEN";

    // Operation-specific codes raised when the envelope reports
    // success:false or carries no data despite HTTP success.
    pub const LOGIN_FAILED: &str = "LOGIN_FAILED";
    pub const REGISTRATION_FAILED: &str = "REGISTRATION_FAILED";
    pub const TOKEN_REFRESH_FAILED: &str = "TOKEN_REFRESH_FAILED";
    pub const USER_INFO_FAILED: &str = "USER_INFO_FAILED";
    pub const POSTS_FETCH_FAILED: &str = "POSTS_FETCH_FAILED";
    pub const POST_NOT_FOUND: &str = "POST_NOT_FOUND";
    pub const POST_CREATION_FAILED: &str = "POST_CREATION_FAILED";
    pub const POST_UPDATE_FAILED: &str = "POST_UPDATE_FAILED";
    pub const POST_DELETION_FAILED: &str = "POST_DELETION_FAILED";
    pub const POST_PUBLISH_FAILED: &str = "POST_PUBLISH_FAILED";
    pub const BULK_POST_CREATION_FAILED: &str = "BULK_POST_CREATION_FAILED";
    pub const ANALYTICS_FETCH_FAILED: &str = "ANALYTICS_FETCH_FAILED";
    pub const PLATFORM_CONNECTION_FAILED: &str = "PLATFORM_CONNECTION_FAILED";
    pub const PLATFORM_DISCONNECTION_FAILED: &str = "PLATFORM_DISCONNECTION_FAILED";
    pub const HEALTH_CHECK_FAILED: &str = "HEALTH_CHECK_FAILED";
}

/// The single error value every SDK operation terminates in.
///
/// Carries enough structure for the caller to branch on [`SmaError::code`]
/// or [`SmaError::retryable`] without re-inspecting the transport layer.
#[derive(Debug, ThisError)]
#[error("SmaError({code}): {message} {location}")]
pub struct SmaError {
    pub message: String,
    pub code: String,
    pub status: Option<HttpStatusCode>,
    pub retryable: bool,
    /// Seconds the server asked us to wait before reissuing (429).
    pub retry_after: Option<u64>,
    /// Server-side correlation id, when echoed back.
    pub request_id: Option<String>,
    pub details: Option<Value>,
    pub location: ErrorLocation,
}

impl SmaError {
    /// An operation-level failure: the HTTP call succeeded but the envelope
    /// reported `success: false` or carried no data.
    #[track_caller]
    pub fn operation(code: &str, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.to_string(),
            status: None,
            retryable: false,
            retry_after: None,
            request_id: None,
            details: None,
            location: ErrorLocation::caller(),
        }
    }

    /// A transport-level failure after the retry budget is exhausted.
    /// Always retryable: the caller may reissue the same request.
    #[track_caller]
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: codes::NETWORK_ERROR.to_string(),
            status: None,
            retryable: true,
            retry_after: None,
            request_id: None,
            details: None,
            location: ErrorLocation::caller(),
        }
    }

    /// Map a non-success response to an error, taking code, retryability and
    /// tracing fields from the server's error payload where present.
    #[track_caller]
    pub fn from_envelope(status: HttpStatusCode, error: Option<ErrorBody>) -> Self {
        let error = error.unwrap_or_default();
        Self {
            message: error
                .message
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            code: error.code.unwrap_or_else(|| codes::HTTP_ERROR.to_string()),
            status: Some(status),
            retryable: error.retryable,
            retry_after: error.retry_after,
            request_id: error.request_id,
            details: error.details,
            location: ErrorLocation::caller(),
        }
    }

    /// Envelope data that failed to deserialize into the operation's
    /// typed result.
    #[track_caller]
    pub fn decode(context: &str, error: serde_json::Error) -> Self {
        Self {
            message: format!("{context}: {error}"),
            code: codes::RESPONSE_DECODE_FAILED.to_string(),
            status: None,
            retryable: false,
            retry_after: None,
            request_id: None,
            details: None,
            location: ErrorLocation::caller(),
        }
    }
}

impl From<reqwest::Error> for SmaError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        SmaError::network(format!("Network error: {error}"))
    }
}
