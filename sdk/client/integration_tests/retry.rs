//! Retry behavior: attempt counts, exponential backoff timing, the
//! retryable status set, and rate-limit propagation.

use crate::helpers::{client_for, client_with_retries, failure_envelope, success_envelope};

use sma_client::error::codes;

use std::time::Instant;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies transport failures make `retry_attempts + 1`
/// attempts with delays following `base × 2^attempt`, then surface a
/// retryable NETWORK_ERROR.
///
/// **WHY THIS MATTERS**: The bounded loop replaced the original recursive
/// retry; if the counter or backoff doubling regresses, clients either
/// give up immediately or hammer a dead endpoint.
///
/// **BUG THIS CATCHES**: The elapsed-time floor fails if any backoff
/// sleep is skipped (10ms + 20ms for two retries).
#[tokio::test]
async fn given_dead_endpoint_when_request_then_backoff_then_network_error() {
    // Bind a port with a plain listener, record the address, then drop it
    // so connections are refused. Nothing else can be listening there.
    let dead_uri = {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("bind an ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        format!("http://{addr}")
    };

    let mut client = client_with_retries(&dead_uri, 2);

    let started = Instant::now();
    let err = client.check_health().await.expect_err("should fail");
    let elapsed = started.elapsed();

    assert_eq!(err.code, codes::NETWORK_ERROR);
    assert!(err.retryable);
    // Two backoff sleeps: 10ms, then 20ms.
    assert!(
        elapsed.as_millis() >= 30,
        "expected at least 30ms of backoff, got {elapsed:?}"
    );
}

/// **VALUE**: Verifies the first retry sleeps the configured base delay,
/// not a built-in default.
///
/// **WHY THIS MATTERS**: A lower bound on elapsed time cannot tell a
/// 10ms base from a 500ms one. The upper bound here pins the first delay
/// to `retry_base_delay` itself.
///
/// **BUG THIS CATCHES**: Would catch the backoff being constructed with
/// the crate's default first interval instead of the configured base, in
/// which case this single retry takes over half a second.
#[tokio::test]
async fn given_fast_base_delay_when_single_retry_then_first_sleep_is_configured_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!({"status": "ok"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_with_retries(&server.uri(), 1);

    let started = Instant::now();
    let health = client.check_health().await.expect("health after one retry");
    let elapsed = started.elapsed();

    assert_eq!(health["status"], "ok");
    assert!(
        elapsed.as_millis() >= 10,
        "expected the 10ms base delay to elapse, got {elapsed:?}"
    );
    // Generous ceiling for two local requests plus one 10ms sleep.
    assert!(
        elapsed.as_millis() < 300,
        "single 10ms-base retry took {elapsed:?}"
    );
}

/// **VALUE**: Verifies a retryable status (503) is retried and the
/// request succeeds once the server recovers.
#[tokio::test]
async fn given_transient_503_when_request_then_retried_to_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(success_envelope(json!({"status": "ok"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server.uri());
    let health = client.check_health().await.expect("health after retry");

    assert_eq!(health["status"], "ok");
}

/// **VALUE**: Verifies the retry ceiling on a persistently failing
/// endpoint: `retry_attempts + 1` requests on the wire, then the mapped
/// HTTP error.
#[tokio::test]
async fn given_persistent_503_when_request_then_attempt_ceiling_respected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(failure_envelope("SERVICE_UNAVAILABLE", "Down for maintenance")),
        )
        .expect(3)
        .mount(&server)
        .await;

    let mut client = client_with_retries(&server.uri(), 2);
    let err = client.check_health().await.expect_err("should fail");

    assert_eq!(err.code, "SERVICE_UNAVAILABLE");
    assert_eq!(err.status.map(|s| s.as_u16()), Some(503));

    server.verify().await;
}

/// **VALUE**: Verifies rate-limit responses carry `retry_after` through
/// to the caller, who owns the slow-down decision.
#[tokio::test]
async fn given_rate_limited_when_request_then_retry_after_propagated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "success": false,
            "error": {
                "message": "Rate limit exceeded",
                "code": "RATE_LIMITED",
                "retryable": true,
                "retryAfter": 30
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_with_retries(&server.uri(), 0);
    let err = client.check_health().await.expect_err("should rate limit");

    assert_eq!(err.code, "RATE_LIMITED");
    assert!(err.retryable);
    assert_eq!(err.retry_after, Some(30));
    assert_eq!(err.status.map(|s| s.as_u16()), Some(429));
}

/// **VALUE**: Verifies non-JSON error bodies synthesize a minimal failure
/// payload from the raw text instead of panicking or losing the message.
#[tokio::test]
async fn given_html_error_body_when_request_then_raw_text_becomes_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(502).set_body_string("<html>502 Bad Gateway</html>"),
        )
        .mount(&server)
        .await;

    let mut client = client_with_retries(&server.uri(), 0);
    let err = client.check_health().await.expect_err("should fail");

    assert_eq!(err.code, codes::HTTP_ERROR);
    assert_eq!(err.message, "<html>502 Bad Gateway</html>");
    assert_eq!(err.status.map(|s| s.as_u16()), Some(502));
}
