use common::ErrorLocation;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config Validation Error: {reason} {location}")]
    Validation {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config URL Error: {reason} {location}")]
    Url {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config HTTP Client Error: {reason} {location}")]
    HttpClient {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Config Environment Error: {variable}: {reason} {location}")]
    Env {
        location: ErrorLocation,
        variable: String,
        reason: String,
    },
}

impl From<url::ParseError> for ConfigError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ConfigError::Url {
            location: ErrorLocation::caller(),
            reason: error.to_string(),
        }
    }
}
