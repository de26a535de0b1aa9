//! Posting analytics.

use super::{SmaClient, require_data};
use crate::error::api::{SmaError, codes};
use crate::types::analytics::{Analytics, AnalyticsQuery};

use reqwest::Method;

impl SmaClient {
    /// Fetch aggregate posting metrics, optionally bounded by date range
    /// and platform.
    pub async fn analytics(&mut self, query: &AnalyticsQuery) -> Result<Analytics, SmaError> {
        let envelope = self
            .execute(Method::GET, "/posts/analytics", None, Some(query.to_params()))
            .await?;
        require_data(
            envelope,
            codes::ANALYTICS_FETCH_FAILED,
            "Failed to get analytics",
        )
    }
}
