//! Post operations: envelope-to-type mapping, operation-specific error
//! codes, query flattening, bulk batching, and analytics.

use crate::helpers::{client_for, failure_envelope, post_json, success_envelope};

use sma_client::error::codes;
use sma_client::types::{AnalyticsQuery, Platform, PostDraft, PostQuery, PostStatus};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a server-side validation rejection surfaces with
/// the server's code and retryable flag intact.
///
/// **WHY THIS MATTERS**: Callers branch on
/// `code == "VALIDATION_ERROR"` and must see `retryable == false` so they
/// do not reissue bad input.
#[tokio::test]
async fn given_validation_rejection_when_create_post_then_server_code_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(failure_envelope("VALIDATION_ERROR", "Content is required")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let draft = PostDraft {
        content: String::new(),
        platforms: vec![],
        ..PostDraft::default()
    };

    let err = client.create_post(&draft).await.expect_err("should reject");

    assert_eq!(err.code, "VALIDATION_ERROR");
    assert!(!err.retryable);
    assert_eq!(err.status.map(|s| s.as_u16()), Some(400));
}

/// **VALUE**: Verifies HTTP 200 with `success: false` raises the
/// operation-specific code, not a generic success.
///
/// **WHY THIS MATTERS**: "Call succeeded" and "operation succeeded" are
/// different things; conflating them returns garbage to the caller.
#[tokio::test]
async fn given_http_success_with_failed_envelope_when_get_post_then_post_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let err = client.get_post("missing").await.expect_err("should fail");

    assert_eq!(err.code, codes::POST_NOT_FOUND);
    assert!(!err.retryable);
}

#[tokio::test]
async fn given_post_envelope_when_get_post_then_typed_post_returned() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/post_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(post_json("post_1"))))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let post = client.get_post("post_1").await.expect("get_post");

    assert_eq!(post.id, "post_1");
    assert_eq!(post.status, PostStatus::Draft);
}

#[tokio::test]
async fn given_filters_when_list_posts_then_query_params_flattened() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("status", "scheduled"))
        .and(query_param("sort", "createdAt"))
        .and(query_param("order", "desc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(
            json!({"posts": [post_json("post_1")], "pagination": {"page": 2, "limit": 5, "total": 6, "total_pages": 2}}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let query = PostQuery {
        page: 2,
        limit: 5,
        status: Some(PostStatus::Scheduled),
        ..PostQuery::default()
    };

    let page = client.list_posts(&query).await.expect("list_posts");

    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.pagination.map(|p| p.total), Some(6));
}

#[tokio::test]
async fn given_deletion_rejected_when_delete_post_then_deletion_failed_code() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/posts/post_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let err = client.delete_post("post_1").await.expect_err("should fail");

    assert_eq!(err.code, codes::POST_DELETION_FAILED);
}

/// **VALUE**: Verifies bulk creation is one request for the whole batch,
/// wrapped under the `posts` key.
#[tokio::test]
async fn given_three_drafts_when_create_bulk_posts_then_single_batched_request() {
    let server = MockServer::start().await;

    let drafts: Vec<PostDraft> = (1..=3)
        .map(|i| PostDraft {
            content: format!("Post {i}"),
            platforms: vec!["facebook".to_string()],
            ..PostDraft::default()
        })
        .collect();

    Mock::given(method("POST"))
        .and(path("/posts/bulk"))
        .and(body_json(json!({
            "posts": [
                {"content": "Post 1", "platforms": ["facebook"]},
                {"content": "Post 2", "platforms": ["facebook"]},
                {"content": "Post 3", "platforms": ["facebook"]}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(
            json!({"scheduledPosts": ["post_1", "post_2", "post_3"]}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let result = client.create_bulk_posts(&drafts).await.expect("bulk");

    assert_eq!(result["scheduledPosts"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn given_publish_envelope_when_publish_post_then_data_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/posts/post_1/publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(
            json!({"results": [{"platform": "facebook", "status": "published"}]}),
        )))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let result = client.publish_post("post_1").await.expect("publish");

    assert_eq!(result["results"][0]["platform"], "facebook");
}

#[tokio::test]
async fn given_date_range_when_analytics_then_camel_case_params_and_typed_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/posts/analytics"))
        .and(query_param("startDate", "2026-08-01"))
        .and(query_param("endDate", "2026-08-24"))
        .and(query_param("platform", "facebook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(json!({
            "total_posts": 40,
            "published_posts": 30,
            "failed_posts": 2,
            "scheduled_posts": 8,
            "platform_breakdown": {"facebook": 25, "instagram": 15},
            "success_rate": 93.75,
            "average_posts_per_day": 1.7
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let query = AnalyticsQuery {
        start_date: Some("2026-08-01".to_string()),
        end_date: Some("2026-08-24".to_string()),
        platform: Some(Platform::Facebook),
    };

    let analytics = client.analytics(&query).await.expect("analytics");

    assert_eq!(analytics.total_posts, 40);
    assert_eq!(analytics.platform_breakdown.get("facebook"), Some(&25));
}

/// **VALUE**: Verifies the API key header fallback when no token pair is
/// held, the unauthenticated path after logout or failed refresh.
#[tokio::test]
async fn given_api_key_and_no_tokens_when_request_then_api_key_header_sent() {
    use common::RedactedSecret;
    use sma_client::{SmaClient, SmaConfig};
    use std::time::Duration;

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("X-API-Key", "key_123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!({"status": "ok"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = SmaClient::new(SmaConfig {
        base_url: server.uri(),
        api_key: Some(RedactedSecret::new("key_123".to_string())),
        timeout: Duration::from_secs(5),
        ..SmaConfig::default()
    })
    .expect("client should build");

    let health = client.check_health().await.expect("health");
    assert_eq!(health["status"], "ok");
}
