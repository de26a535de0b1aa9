use serde::Deserialize;
use serde_json::Value;

/// The `{success, data, error}` wrapper every API response uses.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorBody>,
}

impl Envelope {
    /// Minimal failure envelope synthesized when the response body is not
    /// valid JSON. The raw text becomes the error message.
    pub fn from_raw_text(text: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorBody {
                message: Some(text),
                ..ErrorBody::default()
            }),
        }
    }
}

/// Structured error payload inside a failure envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub code: Option<String>,
    pub retryable: bool,
    /// Seconds to wait before retrying (rate limits).
    pub retry_after: Option<u64>,
    pub request_id: Option<String>,
    pub details: Option<Value>,
}
