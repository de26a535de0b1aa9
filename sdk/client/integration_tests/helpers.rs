//! Test helpers for the wiremock-backed integration tests.
//!
//! Builds clients pointed at a mock server with fast retry timing and
//! provides canned response payloads.

use sma_client::types::AuthTokens;
use sma_client::{SmaClient, SmaConfig};

use common::RedactedSecret;

use std::time::{Duration, SystemTime};

use serde_json::{Value, json};

/// Keeps retry sleeps in tests to tens of milliseconds.
pub const FAST_BASE_DELAY: Duration = Duration::from_millis(10);

/// Client with default retry budget (2 retries) and fast backoff.
pub fn client_for(server_uri: &str) -> SmaClient {
    client_with_retries(server_uri, 2)
}

pub fn client_with_retries(server_uri: &str, retry_attempts: u32) -> SmaClient {
    SmaClient::new(SmaConfig {
        base_url: server_uri.to_string(),
        timeout: Duration::from_secs(5),
        retry_attempts,
        retry_base_delay: FAST_BASE_DELAY,
        ..SmaConfig::default()
    })
    .expect("client should build")
}

/// A token pair as if issued earlier, for tests that start authenticated.
pub fn tokens(access: &str, refresh: Option<&str>) -> AuthTokens {
    AuthTokens {
        access_token: RedactedSecret::new(access.to_string()),
        refresh_token: refresh.map(|r| RedactedSecret::new(r.to_string())),
        expires_at: SystemTime::now() + Duration::from_secs(900),
    }
}

pub fn success_envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn failure_envelope(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "error": { "message": message, "code": code, "retryable": false }
    })
}

pub fn user_json() -> Value {
    json!({
        "id": "user_1",
        "email": "a@example.com",
        "name": "Test User",
        "created_at": "2026-08-24T10:00:00Z",
        "updated_at": "2026-08-24T10:00:00Z"
    })
}

pub fn post_json(id: &str) -> Value {
    json!({
        "id": id,
        "content": "Hello from the SDK",
        "platforms": ["facebook", "instagram"],
        "status": "draft",
        "source": "manual",
        "created_at": "2026-08-24T10:00:00Z",
        "updated_at": "2026-08-24T10:00:00Z"
    })
}
