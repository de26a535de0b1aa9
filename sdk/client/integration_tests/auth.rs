//! Authentication flow tests: login, bearer propagation, one-shot
//! refresh, and logout's unconditional token clearing.

use crate::helpers::{client_for, client_with_retries, failure_envelope, success_envelope, tokens, user_json};

use sma_client::error::codes;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies a successful login yields an authenticated client
/// whose subsequent request carries `Authorization: Bearer t1`.
///
/// **WHY THIS MATTERS**: This is the core auth contract: if the bearer
/// header is dropped or malformed, every authenticated operation breaks.
#[tokio::test]
async fn given_successful_login_when_next_request_then_carries_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@example.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(
            json!({"token": "t1", "refreshToken": "r1", "user": user_json()}),
        )))
        .expect(1)
        .mount(&server)
        .await;

    // Only matches when the bearer token from login is attached.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(user_json())))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());

    let session = client.login("a@example.com", "pw").await.expect("login");
    assert_eq!(session.user.email, "a@example.com");
    assert!(client.is_authenticated());

    let user = client.current_user().await.expect("current_user");
    assert_eq!(user.id, "user_1");
}

#[tokio::test]
async fn given_login_envelope_without_data_when_login_then_login_failed_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let err = client
        .login("a@example.com", "pw")
        .await
        .expect_err("login should fail");

    assert_eq!(err.code, codes::LOGIN_FAILED);
    assert!(!client.is_authenticated());
}

/// **VALUE**: Verifies the 401 handling contract: exactly one refresh
/// call, then the original request is resent once with the new token.
///
/// **WHY THIS MATTERS**: A broken guard here either retries refresh in a
/// loop (hammering the auth endpoint) or silently reuses a stale token.
///
/// **BUG THIS CATCHES**: The `.expect(1)` on the refresh mock fails the
/// test if refresh is attempted zero or multiple times.
#[tokio::test]
async fn given_401_with_refresh_token_when_request_then_one_refresh_and_resend() {
    let server = MockServer::start().await;

    // Stale token gets 401.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer t1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(failure_envelope("TOKEN_EXPIRED", "Token expired")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refreshToken": "r1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!({"token": "t2"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Refreshed token succeeds.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .and(header("Authorization", "Bearer t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(user_json())))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    client.set_tokens(tokens("t1", Some("r1")));

    let user = client.current_user().await.expect("current_user");
    assert_eq!(user.email, "a@example.com");

    // Refresh keeps the pair; only the access token rotated.
    let held = client.tokens().expect("tokens held");
    assert_eq!(held.access_token.as_str(), "t2");
    assert_eq!(held.refresh_token.as_ref().map(|r| r.as_str()), Some("r1"));
}

/// **VALUE**: Verifies a failed refresh clears the token pair and the
/// original 401 error surfaces, never a stale retry.
#[tokio::test]
async fn given_failed_refresh_when_request_then_tokens_cleared_and_original_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(failure_envelope("TOKEN_EXPIRED", "Token expired")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(failure_envelope("INVALID_REFRESH_TOKEN", "Refresh rejected")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    client.set_tokens(tokens("t1", Some("r1")));

    let err = client.current_user().await.expect_err("should surface 401");

    // Original failure, not the refresh failure.
    assert_eq!(err.code, "TOKEN_EXPIRED");
    assert_eq!(err.status.map(|s| s.as_u16()), Some(401));
    assert!(client.tokens().is_none());
}

#[tokio::test]
async fn given_401_without_refresh_token_when_request_then_no_refresh_attempted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(failure_envelope("TOKEN_EXPIRED", "Token expired")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    client.set_tokens(tokens("t1", None));

    let err = client.current_user().await.expect_err("should 401");
    assert_eq!(err.status.map(|s| s.as_u16()), Some(401));
}

/// **VALUE**: Verifies logout clears the token pair even when the server
/// call fails, the one error path the SDK deliberately swallows.
#[tokio::test]
async fn given_failing_server_when_logout_then_tokens_cleared_anyway() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut client = client_with_retries(&server.uri(), 0);
    client.set_tokens(tokens("t1", None));

    client.logout().await;

    assert!(client.tokens().is_none());
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn given_healthy_server_when_logout_then_tokens_cleared() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    client.set_tokens(tokens("t1", None));

    client.logout().await;

    assert!(client.tokens().is_none());
}
