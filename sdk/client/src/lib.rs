//! Rust SDK for the Social Media Automation platform API.
//!
//! The entry point is [`client::SmaClient`]: configure it with
//! [`config::SmaConfig`], then call typed operations (auth, posts,
//! analytics, platform connections). Every operation issues exactly one
//! logical request; transport failures and retryable server statuses are
//! retried with exponential backoff, and an expired access token triggers
//! exactly one refresh-and-resend.

pub mod client;
pub mod config;
pub mod error;
pub mod request_id;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::SmaClient;
pub use config::SmaConfig;
pub use error::{SdkError, SmaError};

/// SDK version reported to the server.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent sent with every request.
pub const SDK_USER_AGENT: &str = const_format::concatcp!("sma-sdk-rust/", SDK_VERSION);
