use std::collections::HashMap;

use serde::Deserialize;

/// Aggregate posting metrics for an account.
#[derive(Debug, Clone, Deserialize)]
pub struct Analytics {
    pub total_posts: u64,
    pub published_posts: u64,
    pub failed_posts: u64,
    pub scheduled_posts: u64,
    /// Post counts keyed by platform name.
    pub platform_breakdown: HashMap<String, u64>,
    pub success_rate: f64,
    pub average_posts_per_day: f64,
}

/// Filter for `GET /posts/analytics`. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, Default)]
pub struct AnalyticsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub platform: Option<super::platform::Platform>,
}

impl AnalyticsQuery {
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(start) = &self.start_date {
            params.push(("startDate".to_string(), start.clone()));
        }
        if let Some(end) = &self.end_date {
            params.push(("endDate".to_string(), end.clone()));
        }
        if let Some(platform) = &self.platform {
            params.push(("platform".to_string(), platform.as_str().to_string()));
        }

        params
    }
}
