//! HTTP status code utilities for error mapping and retry decisions.

/// HTTP status code carried by SDK error values.
///
/// Stored directly rather than parsed back out of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    /// 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.0)
    }

    /// 4xx client errors (not retryable, except 429).
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Statuses the transport layer retries with backoff, for idempotent
    /// and non-idempotent methods alike.
    pub fn is_retryable(&self) -> bool {
        matches!(self.0, 429 | 500 | 502 | 503 | 504)
    }

    /// 401: the access token is invalid or expired; the client attempts
    /// exactly one refresh before surfacing the error.
    pub fn is_auth_expired(&self) -> bool {
        self.0 == 401
    }

    /// 429: the server asked us to slow down; `retryAfter` applies.
    pub fn is_rate_limited(&self) -> bool {
        self.0 == 429
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
