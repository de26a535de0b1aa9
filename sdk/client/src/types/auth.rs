use common::RedactedSecret;

use std::time::SystemTime;

use serde::Deserialize;

/// The token pair held by a client instance. At most one pair is active
/// per client; it is replaced on login/refresh and cleared on logout or
/// failed refresh.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: RedactedSecret,
    pub refresh_token: Option<RedactedSecret>,
    /// Client-side expiry window, computed from `token_ttl` at issue time.
    /// The server token itself is never parsed.
    pub expires_at: SystemTime,
}

impl AuthTokens {
    /// Whether the client-side expiry window has passed. Advisory only:
    /// the server's 401 remains the source of truth.
    pub fn is_expired(&self) -> bool {
        SystemTime::now() >= self.expires_at
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload of a successful login/register response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenGrant {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Payload of a successful refresh response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenRefresh {
    pub token: String,
}

/// What login/register hand back to the caller.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub tokens: AuthTokens,
}
