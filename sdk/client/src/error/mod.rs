pub mod api;
pub mod config;

pub use api::{SmaError, codes};
pub use config::ConfigError;

use thiserror::Error;

/// Umbrella error for callers that hold one error type across
/// construction and operations.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Api(#[from] api::SmaError),
}
