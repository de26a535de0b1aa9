//! OAuth platform connection tests.

use crate::helpers::{client_for, success_envelope};

use sma_client::error::codes;
use sma_client::types::Platform;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_auth_code_when_connect_platform_then_connection_unwrapped() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/connect/facebook"))
        .and(body_json(json!({
            "code": "oauth_code_abc",
            "redirectUri": "https://app.example.com/callback"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_envelope(json!({
            "platformConnection": {
                "id": "conn_1",
                "platform": "facebook",
                "platform_user_id": "fb_user_9",
                "platform_username": "Test Page",
                "is_active": true,
                "created_at": "2026-08-24T10:00:00Z",
                "updated_at": "2026-08-24T10:00:00Z"
            }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let connection = client
        .connect_platform(
            Platform::Facebook,
            "oauth_code_abc",
            "https://app.example.com/callback",
        )
        .await
        .expect("connect");

    assert_eq!(connection.id, "conn_1");
    assert_eq!(connection.platform_user_id, "fb_user_9");
    assert!(connection.is_active);
}

#[tokio::test]
async fn given_failed_envelope_when_connect_platform_then_connection_failed_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/connect/pinterest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let err = client
        .connect_platform(Platform::Pinterest, "bad_code", "https://app.example.com/cb")
        .await
        .expect_err("should fail");

    assert_eq!(err.code, codes::PLATFORM_CONNECTION_FAILED);
}

#[tokio::test]
async fn given_success_envelope_when_disconnect_platform_then_ok() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/oauth/disconnect/x"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    client
        .disconnect_platform(Platform::X)
        .await
        .expect("disconnect");
}

#[tokio::test]
async fn given_failed_envelope_when_disconnect_platform_then_disconnection_failed_code() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/oauth/disconnect/instagram"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let err = client
        .disconnect_platform(Platform::Instagram)
        .await
        .expect_err("should fail");

    assert_eq!(err.code, codes::PLATFORM_DISCONNECTION_FAILED);
}
