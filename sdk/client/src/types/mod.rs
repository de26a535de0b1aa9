//! Wire schemas for the SMA API.
//!
//! One module per endpoint family. Field casing follows the server
//! exactly: the response envelope's error payload is camelCase, domain
//! records are snake_case.

pub mod analytics;
pub mod auth;
pub mod envelope;
pub mod platform;
pub mod post;

pub use analytics::{Analytics, AnalyticsQuery};
pub use auth::{AuthTokens, Session, User};
pub use envelope::{Envelope, ErrorBody};
pub use platform::{Platform, PlatformConnection};
pub use post::{Pagination, PlatformPost, Post, PostDraft, PostPage, PostQuery, PostSource, PostStatus};
