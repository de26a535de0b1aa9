//! Secret string handling with redacted Debug output.
//!
//! Wraps API keys and access/refresh tokens so they can move through the
//! SDK without ever reaching logs or serialized output.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// A bearer secret (API key, access token, refresh token) that never
/// exposes its value in logs or debug output.
#[derive(Clone)]
pub struct RedactedSecret {
    inner: String,
}

impl RedactedSecret {
    pub fn new(secret: String) -> Self {
        Self { inner: secret }
    }

    /// Get the actual secret for transmission.
    ///
    /// # Security Note
    /// Only call this when building the outgoing request header or body.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Length of the secret (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<&str> for RedactedSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret.to_string())
    }
}

impl fmt::Debug for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedSecret([REDACTED])")
    }
}

impl fmt::Display for RedactedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED SECRET]")
    }
}

impl Drop for RedactedSecret {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Prevent accidental serialization
impl serde::Serialize for RedactedSecret {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "RedactedSecret cannot be serialized - use as_str() explicitly",
            ),
            location: ErrorLocation::caller(),
        }))
    }
}
