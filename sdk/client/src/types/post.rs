use super::platform::Platform;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Scheduled,
    Publishing,
    Published,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSource {
    Manual,
    Blogger,
    Soloboss,
}

/// Per-platform delivery state inside a [`Post`].
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformPost {
    pub platform: String,
    #[serde(default)]
    pub platform_post_id: Option<String>,
    pub content: String,
    pub status: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub hashtags: Option<Vec<String>>,
    pub platforms: Vec<String>,
    #[serde(default)]
    pub scheduled_time: Option<String>,
    pub status: PostStatus,
    pub source: PostSource,
    #[serde(default)]
    pub platform_posts: Option<Vec<PlatformPost>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating or updating a post. `None` fields are
/// omitted from the wire so updates stay partial.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDraft {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    pub platforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<PostSource>,
}

/// Listing filter for `GET /posts`.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<PostStatus>,
    pub platform: Option<Platform>,
    pub sort: String,
    pub order: String,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            status: None,
            platform: None,
            sort: "createdAt".to_string(),
            order: "desc".to_string(),
        }
    }
}

impl PostQuery {
    /// Flatten into query parameters; unset filters are omitted.
    pub(crate) fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
            ("sort".to_string(), self.sort.clone()),
            ("order".to_string(), self.order.clone()),
        ];

        if let Some(status) = &self.status {
            params.push(("status".to_string(), status_param(status)));
        }
        if let Some(platform) = &self.platform {
            params.push(("platform".to_string(), platform.as_str().to_string()));
        }

        params
    }
}

fn status_param(status: &PostStatus) -> String {
    match status {
        PostStatus::Draft => "draft",
        PostStatus::Scheduled => "scheduled",
        PostStatus::Publishing => "publishing",
        PostStatus::Published => "published",
        PostStatus::Failed => "failed",
    }
    .to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// One page of the posts listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostPage {
    pub posts: Vec<Post>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}
