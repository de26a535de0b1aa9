//! Authentication operations and token lifecycle.

use super::{SmaClient, require_data};
use crate::error::api::{SmaError, codes};
use crate::types::auth::{AuthTokens, Session, TokenGrant, User};

use log::{info, warn};
use reqwest::Method;
use serde_json::json;

impl SmaClient {
    /// Login with email and password. On success the client holds the
    /// issued token pair and subsequent requests carry the bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`SmaError`] with code `LOGIN_FAILED` if the envelope
    /// reports failure, or a transport/HTTP error from the request itself.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Session, SmaError> {
        let body = json!({ "email": email, "password": password });
        let envelope = self
            .execute(Method::POST, "/auth/login", Some(body), None)
            .await?;

        let grant: TokenGrant = require_data(envelope, codes::LOGIN_FAILED, "Login failed")?;
        let tokens = self.store_tokens(grant.token, grant.refresh_token);
        info!("Logged in as {}", grant.user.email);

        Ok(Session {
            user: grant.user,
            tokens,
        })
    }

    /// Register a new account. Behaves like [`Self::login`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`SmaError`] with code `REGISTRATION_FAILED` on an
    /// unsuccessful envelope.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Session, SmaError> {
        let body = json!({ "email": email, "password": password, "name": name });
        let envelope = self
            .execute(Method::POST, "/auth/register", Some(body), None)
            .await?;

        let grant: TokenGrant =
            require_data(envelope, codes::REGISTRATION_FAILED, "Registration failed")?;
        let tokens = self.store_tokens(grant.token, grant.refresh_token);
        info!("Registered account for {}", grant.user.email);

        Ok(Session {
            user: grant.user,
            tokens,
        })
    }

    /// Exchange the held refresh token for a new access token.
    ///
    /// # Errors
    ///
    /// `NO_REFRESH_TOKEN` if no refresh token is held,
    /// `TOKEN_REFRESH_FAILED` if the server declines.
    pub async fn refresh_session(&mut self) -> Result<AuthTokens, SmaError> {
        self.try_refresh().await?;

        // try_refresh only succeeds with a pair installed.
        self.tokens().cloned().ok_or_else(|| {
            SmaError::operation(codes::TOKEN_REFRESH_FAILED, "Token refresh failed")
        })
    }

    /// Logout: best-effort server-side invalidation, then the local token
    /// pair is cleared unconditionally. The server call's failure is the
    /// one error the SDK swallows.
    pub async fn logout(&mut self) {
        let result = self.execute(Method::POST, "/auth/logout", None, None).await;
        self.clear_tokens();

        match result {
            Ok(_) => info!("Logged out"),
            Err(e) => warn!("Logout server call failed ({e}), local tokens cleared anyway"),
        }
    }

    /// Fetch the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`SmaError`] with code `USER_INFO_FAILED` on an
    /// unsuccessful envelope.
    pub async fn current_user(&mut self) -> Result<User, SmaError> {
        let envelope = self.execute(Method::GET, "/auth/me", None, None).await?;
        require_data(envelope, codes::USER_INFO_FAILED, "Failed to get user info")
    }
}
