// Unit tests for wire schemas: envelope parsing, casing, and query
// parameter flattening.

use crate::types::analytics::AnalyticsQuery;
use crate::types::envelope::Envelope;
use crate::types::platform::Platform;
use crate::types::post::{Post, PostDraft, PostQuery, PostStatus};

use serde_json::json;

/// **VALUE**: Verifies the error payload's camelCase fields (retryAfter,
/// requestId) land in the snake_case Rust struct.
///
/// **BUG THIS CATCHES**: Would catch a missing `rename_all` after a
/// schema refactor: the fields would silently deserialize to None and
/// retry-after handling upstream would stop working.
#[test]
fn given_camel_case_error_body_when_parsed_then_fields_populated() {
    let raw = json!({
        "success": false,
        "error": {
            "message": "Rate limit exceeded",
            "code": "RATE_LIMITED",
            "retryable": true,
            "retryAfter": 60,
            "requestId": "req_789",
            "details": {"window": "1m"}
        }
    });

    let envelope: Envelope = serde_json::from_value(raw).expect("envelope should parse");
    let error = envelope.error.expect("error body present");

    assert!(!envelope.success);
    assert_eq!(error.code.as_deref(), Some("RATE_LIMITED"));
    assert!(error.retryable);
    assert_eq!(error.retry_after, Some(60));
    assert_eq!(error.request_id.as_deref(), Some("req_789"));
}

/// **VALUE**: Verifies a non-JSON body synthesizes a failure envelope
/// carrying the raw text as the message.
#[test]
fn given_raw_text_when_synthesized_then_failure_envelope_with_message() {
    let envelope = Envelope::from_raw_text("<html>502 Bad Gateway</html>".to_string());

    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert_eq!(
        envelope.error.and_then(|e| e.message).as_deref(),
        Some("<html>502 Bad Gateway</html>")
    );
}

#[test]
fn given_post_json_when_parsed_then_status_and_source_enums_match() {
    let raw = json!({
        "id": "post_1",
        "content": "Hello",
        "platforms": ["facebook", "x"],
        "status": "scheduled",
        "source": "manual",
        "scheduled_time": "2026-08-25T09:00:00Z",
        "created_at": "2026-08-24T10:00:00Z",
        "updated_at": "2026-08-24T10:00:00Z"
    });

    let post: Post = serde_json::from_value(raw).expect("post should parse");

    assert_eq!(post.status, PostStatus::Scheduled);
    assert_eq!(post.scheduled_time.as_deref(), Some("2026-08-25T09:00:00Z"));
    assert!(post.images.is_none());
    assert!(post.platform_posts.is_none());
}

/// **VALUE**: Verifies unset draft fields are omitted from the wire so
/// updates stay partial.
#[test]
fn given_minimal_draft_when_serialized_then_optional_fields_omitted() {
    let draft = PostDraft {
        content: "Hello".to_string(),
        platforms: vec!["facebook".to_string()],
        ..PostDraft::default()
    };

    let value = serde_json::to_value(&draft).expect("draft should serialize");
    let object = value.as_object().expect("draft is an object");

    assert!(object.contains_key("content"));
    assert!(object.contains_key("platforms"));
    assert!(!object.contains_key("images"));
    assert!(!object.contains_key("hashtags"));
    assert!(!object.contains_key("scheduled_time"));
    assert!(!object.contains_key("source"));
}

#[test]
fn given_default_post_query_when_flattened_then_paging_and_sort_only() {
    let params = PostQuery::default().to_params();

    assert_eq!(
        params,
        vec![
            ("page".to_string(), "1".to_string()),
            ("limit".to_string(), "20".to_string()),
            ("sort".to_string(), "createdAt".to_string()),
            ("order".to_string(), "desc".to_string()),
        ]
    );
}

#[test]
fn given_filtered_post_query_when_flattened_then_status_and_platform_included() {
    let query = PostQuery {
        status: Some(PostStatus::Draft),
        platform: Some(Platform::Instagram),
        ..PostQuery::default()
    };

    let params = query.to_params();

    assert!(params.contains(&("status".to_string(), "draft".to_string())));
    assert!(params.contains(&("platform".to_string(), "instagram".to_string())));
}

#[test]
fn given_analytics_query_when_flattened_then_camel_case_date_params() {
    let query = AnalyticsQuery {
        start_date: Some("2026-08-01".to_string()),
        end_date: Some("2026-08-24".to_string()),
        platform: Some(Platform::Facebook),
    };

    let params = query.to_params();

    assert_eq!(
        params,
        vec![
            ("startDate".to_string(), "2026-08-01".to_string()),
            ("endDate".to_string(), "2026-08-24".to_string()),
            ("platform".to_string(), "facebook".to_string()),
        ]
    );
}

#[test]
fn given_empty_analytics_query_when_flattened_then_no_params() {
    assert!(AnalyticsQuery::default().to_params().is_empty());
}
