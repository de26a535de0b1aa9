//! The SMA API client: transport, retry, and token lifecycle.
//!
//! Operations live in sibling modules (`auth`, `posts`, `analytics`,
//! `platforms`); this module owns the request execution core they all
//! go through.

mod analytics;
mod auth;
mod platforms;
mod posts;

use crate::SDK_USER_AGENT;
use crate::SDK_VERSION;
use crate::config::SmaConfig;
use crate::error::api::{SmaError, codes};
use crate::error::config::ConfigError;
use crate::request_id;
use crate::types::auth::{AuthTokens, TokenRefresh};
use crate::types::envelope::Envelope;

use common::{ErrorLocation, HttpStatusCode, RedactedSecret};

use std::time::{Duration, SystemTime};

use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use log::{debug, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

const SDK_VERSION_HEADER: &str = "X-SDK-Version";
const API_KEY_HEADER: &str = "X-API-Key";
const REQUEST_ID_HEADER: &str = "X-Request-ID";

const REFRESH_ENDPOINT: &str = "/auth/refresh";

/// Client for the SMA platform API.
///
/// Holds the configuration, the transport, and at most one active token
/// pair. Operations take `&mut self` because they may rotate or clear the
/// pair; instances are independent and intended for single-threaded use.
pub struct SmaClient {
    config: SmaConfig,
    http: Client,
    tokens: Option<AuthTokens>,
}

impl SmaClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config fails validation, the base URL
    /// does not parse, or the transport cannot be constructed.
    pub fn new(config: SmaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        url::Url::parse(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(SDK_VERSION_HEADER, HeaderValue::from_static(SDK_VERSION));

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(SDK_USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient {
                location: ErrorLocation::caller(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            config,
            http,
            tokens: None,
        })
    }

    /// The active token pair, if any.
    pub fn tokens(&self) -> Option<&AuthTokens> {
        self.tokens.as_ref()
    }

    /// Install a token pair obtained out of band.
    pub fn set_tokens(&mut self, tokens: AuthTokens) {
        self.tokens = Some(tokens);
    }

    /// Whether a token pair is held and its client-side expiry window has
    /// not passed.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.as_ref().is_some_and(|t| !t.is_expired())
    }

    pub(crate) fn clear_tokens(&mut self) {
        self.tokens = None;
    }

    pub(crate) fn store_tokens(&mut self, access: String, refresh: Option<String>) -> AuthTokens {
        let tokens = AuthTokens {
            access_token: RedactedSecret::new(access),
            refresh_token: refresh.map(RedactedSecret::new),
            expires_at: SystemTime::now() + self.config.token_ttl,
        };
        self.tokens = Some(tokens.clone());
        tokens
    }

    /// Replace only the access token, keeping the refresh token, and
    /// recompute the expiry window.
    fn install_refreshed_token(&mut self, access: String) {
        if let Some(tokens) = &mut self.tokens {
            tokens.access_token = RedactedSecret::new(access);
            tokens.expires_at = SystemTime::now() + self.config.token_ttl;
        }
    }

    fn has_refresh_token(&self) -> bool {
        self.tokens
            .as_ref()
            .is_some_and(|t| t.refresh_token.is_some())
    }

    /// Base URL + endpoint with exactly one separating slash.
    fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Issue one request on the wire: fresh `X-Request-ID`, bearer token if
    /// held, API key fallback otherwise.
    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(REQUEST_ID_HEADER, request_id::generate());

        if let Some(tokens) = &self.tokens {
            request = request.bearer_auth(tokens.access_token.as_str());
        } else if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key.as_str());
        }

        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            if self.config.debug {
                debug!("Request body: {body}");
            }
            request = request.json(body);
        }

        if self.config.debug {
            debug!("SMA request: {method} {url}");
        }

        request.send().await
    }

    /// The bounded retry loop: transport failures and retryable server
    /// statuses ({429, 500, 502, 503, 504}) back off `base × 2^attempt`
    /// for up to `retry_attempts` retries, idempotent and non-idempotent
    /// methods alike. Returns the final status and raw body.
    async fn send_with_retry(
        &self,
        method: &Method,
        url: &str,
        body: Option<&Value>,
        query: Option<&[(String, String)]>,
    ) -> Result<(HttpStatusCode, String), SmaError> {
        let mut backoff = ExponentialBackoff {
            // current_interval is what next_backoff yields first; without it
            // the crate's 500ms default overrides the configured base.
            current_interval: self.config.retry_base_delay,
            initial_interval: self.config.retry_base_delay,
            randomization_factor: 0.0,
            multiplier: 2.0,
            max_interval: Duration::from_secs(3600),
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        };

        let mut attempt: u32 = 0;

        loop {
            match self.send_once(method, url, body, query).await {
                Ok(response) => {
                    let status = HttpStatusCode::from(response.status().as_u16());

                    if status.is_retryable() && attempt < self.config.retry_attempts {
                        let delay = next_delay(&mut backoff, self.config.retry_base_delay);
                        warn!(
                            "HTTP {status} from {url}, retrying in {delay:?} (attempt {})",
                            attempt + 1
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let raw = response.text().await?;
                    if self.config.debug {
                        debug!("SMA response: {status} {raw}");
                    }
                    return Ok((status, raw));
                }
                Err(transport) => {
                    if attempt < self.config.retry_attempts {
                        let delay = next_delay(&mut backoff, self.config.retry_base_delay);
                        warn!(
                            "Request to {url} failed ({transport}), retrying in {delay:?} (attempt {})",
                            attempt + 1
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(SmaError::network(format!("Network error: {transport}")));
                }
            }
        }
    }

    /// Execute one logical request and return its envelope.
    ///
    /// On HTTP 401 with a refresh token held, performs exactly one
    /// refresh-and-resend of the original request; if the refresh fails,
    /// the token pair is cleared and the original 401 is mapped. The
    /// refresh call itself goes through [`Self::try_refresh`] and can
    /// never nest.
    pub(crate) async fn execute(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
        query: Option<Vec<(String, String)>>,
    ) -> Result<Envelope, SmaError> {
        let url = self.endpoint_url(endpoint);

        let (mut status, mut raw) = self
            .send_with_retry(&method, &url, body.as_ref(), query.as_deref())
            .await?;

        if status.is_auth_expired() && self.has_refresh_token() {
            match self.try_refresh().await {
                Ok(()) => {
                    debug!("Access token refreshed, resending original request");
                    (status, raw) = self
                        .send_with_retry(&method, &url, body.as_ref(), query.as_deref())
                        .await?;
                }
                Err(refresh_error) => {
                    warn!("Token refresh failed ({refresh_error}), clearing token pair");
                    self.clear_tokens();
                }
            }
        }

        let envelope = parse_envelope(raw);

        if !status.is_success() {
            return Err(SmaError::from_envelope(status, envelope.error));
        }

        Ok(envelope)
    }

    /// Exchange the refresh token for a new access token. Replaces only
    /// the access token and recomputes the client-side expiry.
    pub(crate) async fn try_refresh(&mut self) -> Result<(), SmaError> {
        let refresh_token = self
            .tokens
            .as_ref()
            .and_then(|t| t.refresh_token.as_ref())
            .ok_or_else(|| {
                SmaError::operation(codes::NO_REFRESH_TOKEN, "No refresh token available")
            })?;

        let body = serde_json::json!({ "refreshToken": refresh_token.as_str() });
        let url = self.endpoint_url(REFRESH_ENDPOINT);

        let (status, raw) = self
            .send_with_retry(&Method::POST, &url, Some(&body), None)
            .await?;

        let envelope = parse_envelope(raw);

        if !status.is_success() {
            return Err(SmaError::from_envelope(status, envelope.error));
        }

        let refreshed: TokenRefresh = require_data(
            envelope,
            codes::TOKEN_REFRESH_FAILED,
            "Token refresh failed",
        )?;

        self.install_refreshed_token(refreshed.token);
        Ok(())
    }

    /// Check API health.
    ///
    /// # Errors
    ///
    /// Returns [`SmaError`] with code `HEALTH_CHECK_FAILED` if the envelope
    /// reports failure or carries no data.
    pub async fn check_health(&mut self) -> Result<Value, SmaError> {
        let envelope = self.execute(Method::GET, "/health", None, None).await?;
        require_data(envelope, codes::HEALTH_CHECK_FAILED, "Health check failed")
    }
}

/// Parse the response body as an envelope; non-JSON bodies synthesize a
/// minimal failure payload carrying the raw text.
fn parse_envelope(raw: String) -> Envelope {
    match serde_json::from_str::<Envelope>(&raw) {
        Ok(envelope) => envelope,
        Err(_) => Envelope::from_raw_text(raw),
    }
}

fn next_delay(backoff: &mut ExponentialBackoff, fallback: Duration) -> Duration {
    // max_elapsed_time is None, so next_backoff always yields a delay.
    backoff.next_backoff().unwrap_or(fallback)
}

/// Map a success envelope's `data` into the operation's typed result.
/// `success: false` or missing `data` raises the operation-specific code
/// even when the transport layer reported HTTP success.
#[track_caller]
pub(crate) fn require_data<T: DeserializeOwned>(
    envelope: Envelope,
    code: &str,
    message: &str,
) -> Result<T, SmaError> {
    if !envelope.success {
        return Err(SmaError::operation(code, message));
    }

    let data = envelope
        .data
        .ok_or_else(|| SmaError::operation(code, message))?;

    serde_json::from_value(data).map_err(|e| SmaError::decode(message, e))
}

/// Like [`require_data`] for operations whose success carries no payload.
#[track_caller]
pub(crate) fn require_success(envelope: Envelope, code: &str, message: &str) -> Result<(), SmaError> {
    if !envelope.success {
        return Err(SmaError::operation(code, message));
    }
    Ok(())
}
