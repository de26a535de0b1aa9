//! OAuth platform connections.

use super::{SmaClient, require_data, require_success};
use crate::error::api::{SmaError, codes};
use crate::types::platform::{ConnectData, ConnectRequest, Platform, PlatformConnection};

use reqwest::Method;

impl SmaClient {
    /// Complete an OAuth connection to a platform with the authorization
    /// code from the redirect.
    pub async fn connect_platform(
        &mut self,
        platform: Platform,
        auth_code: &str,
        redirect_uri: &str,
    ) -> Result<PlatformConnection, SmaError> {
        let body = serde_json::to_value(ConnectRequest {
            code: auth_code.to_string(),
            redirect_uri: redirect_uri.to_string(),
        })
        .map_err(|e| SmaError::decode("Failed to encode connect request", e))?;

        let envelope = self
            .execute(
                Method::POST,
                &format!("/oauth/connect/{platform}"),
                Some(body),
                None,
            )
            .await?;

        let data: ConnectData = require_data(
            envelope,
            codes::PLATFORM_CONNECTION_FAILED,
            "Failed to connect platform",
        )?;
        Ok(data.platform_connection)
    }

    /// Sever the OAuth connection to a platform.
    pub async fn disconnect_platform(&mut self, platform: Platform) -> Result<(), SmaError> {
        let envelope = self
            .execute(
                Method::DELETE,
                &format!("/oauth/disconnect/{platform}"),
                None,
                None,
            )
            .await?;
        require_success(
            envelope,
            codes::PLATFORM_DISCONNECTION_FAILED,
            "Failed to disconnect platform",
        )
    }
}
