use serde::{Deserialize, Serialize};

/// Supported social media platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Instagram,
    Pinterest,
    X,
}

impl Platform {
    /// Path segment used by the OAuth connect/disconnect endpoints.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Pinterest => "pinterest",
            Platform::X => "x",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An active OAuth link between an SMA account and a platform account.
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformConnection {
    pub id: String,
    pub platform: String,
    pub platform_user_id: String,
    #[serde(default)]
    pub platform_username: Option<String>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Body of `POST /oauth/connect/{platform}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectRequest {
    pub code: String,
    pub redirect_uri: String,
}

/// Connect responses nest the connection under `platformConnection`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConnectData {
    pub platform_connection: PlatformConnection,
}
