//! Post CRUD, publishing, and bulk creation.

use super::{SmaClient, require_data, require_success};
use crate::error::api::{SmaError, codes};
use crate::types::post::{Post, PostDraft, PostPage, PostQuery};

use reqwest::Method;
use serde_json::{Value, json};

impl SmaClient {
    /// List posts with paging and optional status/platform filters.
    pub async fn list_posts(&mut self, query: &PostQuery) -> Result<PostPage, SmaError> {
        let envelope = self
            .execute(Method::GET, "/posts", None, Some(query.to_params()))
            .await?;
        require_data(envelope, codes::POSTS_FETCH_FAILED, "Failed to get posts")
    }

    /// Fetch a single post.
    ///
    /// # Errors
    ///
    /// `POST_NOT_FOUND` when the envelope reports failure or carries no
    /// data, even on HTTP success.
    pub async fn get_post(&mut self, post_id: &str) -> Result<Post, SmaError> {
        let envelope = self
            .execute(Method::GET, &format!("/posts/{post_id}"), None, None)
            .await?;
        require_data(envelope, codes::POST_NOT_FOUND, "Post not found")
    }

    pub async fn create_post(&mut self, draft: &PostDraft) -> Result<Post, SmaError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| SmaError::decode("Failed to encode post draft", e))?;
        let envelope = self.execute(Method::POST, "/posts", Some(body), None).await?;
        require_data(
            envelope,
            codes::POST_CREATION_FAILED,
            "Failed to create post",
        )
    }

    pub async fn update_post(&mut self, post_id: &str, draft: &PostDraft) -> Result<Post, SmaError> {
        let body = serde_json::to_value(draft)
            .map_err(|e| SmaError::decode("Failed to encode post draft", e))?;
        let envelope = self
            .execute(Method::PUT, &format!("/posts/{post_id}"), Some(body), None)
            .await?;
        require_data(envelope, codes::POST_UPDATE_FAILED, "Failed to update post")
    }

    pub async fn delete_post(&mut self, post_id: &str) -> Result<(), SmaError> {
        let envelope = self
            .execute(Method::DELETE, &format!("/posts/{post_id}"), None, None)
            .await?;
        require_success(
            envelope,
            codes::POST_DELETION_FAILED,
            "Failed to delete post",
        )
    }

    /// Publish a post immediately. The per-platform results payload is
    /// passed through as JSON; its shape is not documented upstream.
    pub async fn publish_post(&mut self, post_id: &str) -> Result<Value, SmaError> {
        let envelope = self
            .execute(
                Method::POST,
                &format!("/posts/{post_id}/publish"),
                None,
                None,
            )
            .await?;
        require_data(
            envelope,
            codes::POST_PUBLISH_FAILED,
            "Failed to publish post",
        )
    }

    /// Create multiple posts in one request for the whole batch.
    pub async fn create_bulk_posts(&mut self, drafts: &[PostDraft]) -> Result<Value, SmaError> {
        let body = json!({ "posts": drafts });
        let envelope = self
            .execute(Method::POST, "/posts/bulk", Some(body), None)
            .await?;
        require_data(
            envelope,
            codes::BULK_POST_CREATION_FAILED,
            "Failed to create bulk posts",
        )
    }
}
