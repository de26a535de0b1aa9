//! Per-request tracing identifiers.
//!
//! Format: `sdk_<unix-millis>_<9 hex chars>`, sortable by issue time with
//! a random suffix to break ties. A retried attempt gets a fresh id, since
//! each attempt is a distinct request on the wire.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

const SUFFIX_LEN: usize = 9;

/// Generate a unique request id for the `X-Request-ID` header.
pub fn generate() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();

    let hex = Uuid::new_v4().simple().to_string();
    format!("sdk_{}_{}", millis, &hex[..SUFFIX_LEN])
}
