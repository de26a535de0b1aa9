//! Shared primitives for the SMA SDK.
//!
//! This crate contains types with no business logic that both the SDK and
//! its consumers need: error locations, HTTP status categorization, and
//! secret handling.
//!
//! ## Architecture
//!
//! - **common** (this crate): primitives shared across layers
//! - **sma-client**: the SDK proper (configuration, transport, operations)
//!
//! Keeping these out of `sma-client` lets error values and secrets cross
//! crate boundaries without dragging the HTTP stack along.

pub mod error;
pub mod http_status;
pub mod redacted_secret;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
