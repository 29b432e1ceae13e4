//! Integration tests for the metrics gate.
//!
//! The store is unreachable in these tests, which sharpens the assertions:
//! any path that must not touch the store has to answer 401, because a
//! store access would surface as 500.

mod common;

use axum::body::Body;
use axum::extract::Request;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use common::{send, test_app};

fn metrics_request(authorization: Option<&str>) -> Request {
    let mut builder = Request::builder().method("GET").uri("/api/metrics/query");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

fn basic(payload: &str) -> String {
    format!("Basic {}", BASE64.encode(payload))
}

#[tokio::test]
async fn missing_authorization_is_unauthorized() {
    let app = test_app(vec![], vec![]).await;
    let (status, body) = send(&app.router, metrics_request(None)).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "unauthorized");
    assert!(app.upstream.forwarded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn non_basic_scheme_is_unauthorized() {
    let app = test_app(vec![], vec![]).await;
    let (status, body) = send(&app.router, metrics_request(Some("Bearer abc"))).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn undecodable_payload_is_unauthorized() {
    let app = test_app(vec![], vec![]).await;
    let (status, body) = send(&app.router, metrics_request(Some("Basic %%%"))).await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn malformed_token_short_circuits_before_the_store() {
    let app = test_app(vec![], vec![]).await;

    // No my_ prefix: the store is unreachable, so a lookup would answer
    // 500. A 401 proves the parser rejected it first.
    let (status, body) = send(
        &app.router,
        metrics_request(Some(&basic("sys123:wrongformat"))),
    )
    .await;
    assert_eq!(status, 401);
    assert_eq!(body["error"], "unauthorized");

    // Same for a token without the dot separator.
    let (status, _) = send(
        &app.router,
        metrics_request(Some(&basic("sys123:my_onlypublic"))),
    )
    .await;
    assert_eq!(status, 401);

    assert!(app.upstream.forwarded.lock().unwrap().is_empty());
}

#[tokio::test]
async fn parse_failures_share_one_externally_visible_outcome() {
    let app = test_app(vec![], vec![]).await;
    let attempts = [
        "Basic".to_string(),
        basic("no-separator"),
        basic("sys123:my_.secret"),
        basic("sys123:my_pub."),
    ];
    for attempt in attempts {
        let (status, body) = send(&app.router, metrics_request(Some(&attempt))).await;
        assert_eq!(status, 401, "attempt={attempt}");
        assert_eq!(body["error"], "unauthorized", "attempt={attempt}");
    }
}

#[tokio::test]
async fn store_failure_is_an_internal_error_not_unauthorized() {
    let app = test_app(vec![], vec![]).await;

    // Well-formed credential; the lookup hits the unreachable store. An
    // outage must stay distinguishable from a bad credential.
    let (status, _) = send(
        &app.router,
        metrics_request(Some(&basic("sys123:my_pub1.secretXYZ"))),
    )
    .await;
    assert_eq!(status, 500);
    assert!(app.upstream.forwarded.lock().unwrap().is_empty());
}
