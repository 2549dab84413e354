use std::sync::Arc;

use async_trait::async_trait;
use flagship_pages::core::RowSource;
use flagship_pages::web::{router, AppState};
use flagship_pages::{Result, Row, ServerConfig};
use httpmock::prelude::*;
use serde_json::json;

struct NoRows;

#[async_trait]
impl RowSource for NoRows {
    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        Ok(Vec::new())
    }
}

async fn spawn_app() -> String {
    let state = AppState::new(Arc::new(NoRows), &ServerConfig::default());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move { axum::serve(listener, router(state)).await.expect("serve app") });
    format!("http://{addr}")
}

async fn post_raw(base: &str, body: &str) -> reqwest::Response {
    reqwest::Client::new()
        .post(format!("{base}/api/submit"))
        .header("Content-Type", "application/json")
        .body(body.to_string())
        .send()
        .await
        .expect("submit request")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_form_action_is_rejected_without_calling_out() {
    let webhook = MockServer::start_async().await;
    let hook = webhook
        .mock_async(|when, then| {
            when.path("/partner-hook");
            then.status(200);
        })
        .await;
    let base = spawn_app().await;

    let response = post_raw(&base, "{}").await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "Missing formAction");
    assert_eq!(hook.hits_async().await, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_json_falls_through_to_missing_form_action() {
    let base = spawn_app().await;

    let response = post_raw(&base, "{ this is not json").await;

    assert_eq!(response.status(), 400);
    assert_eq!(response.text().await.unwrap(), "Missing formAction");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_string_form_action_is_rejected() {
    let base = spawn_app().await;

    let response = post_raw(&base, &json!({"formAction": 42}).to_string()).await;

    assert_eq!(response.status(), 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_successful_forward_acknowledges_with_ok() {
    let webhook = MockServer::start_async().await;
    let hook = webhook
        .mock_async(|when, then| {
            when.method(POST)
                .path("/partner-hook")
                .json_body(json!({
                    "name": "Jane Doe",
                    "business": "Le Grand Hotel",
                    "selectedSigns": "[\"flag\"]"
                }));
            then.status(200).body("accepted");
        })
        .await;
    let base = spawn_app().await;

    let body = json!({
        "formAction": webhook.url("/partner-hook"),
        "name": "Jane Doe",
        "business": "Le Grand Hotel",
        "selectedSigns": "[\"flag\"]"
    });
    let response = post_raw(&base, &body.to_string()).await;

    assert_eq!(response.status(), 200);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json")));
    assert_eq!(response.text().await.unwrap(), r#"{"ok":true}"#);
    hook.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_webhook_failure_becomes_bad_gateway_with_detail() {
    let webhook = MockServer::start_async().await;
    webhook
        .mock_async(|when, then| {
            when.method(POST).path("/partner-hook");
            then.status(500).body("database unavailable");
        })
        .await;
    let base = spawn_app().await;

    let body = json!({ "formAction": webhook.url("/partner-hook"), "name": "Jane" });
    let response = post_raw(&base, &body.to_string()).await;

    assert_eq!(response.status(), 502);
    assert_eq!(
        response.text().await.unwrap(),
        "Upstream error: 500 Internal Server Error\ndatabase unavailable"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_or_malformed_webhook_is_a_generic_failure() {
    let base = spawn_app().await;

    for form_action in ["not a url", "http://127.0.0.1:1/closed"] {
        let body = json!({ "formAction": form_action });
        let response = post_raw(&base, &body.to_string()).await;

        assert_eq!(response.status(), 500, "formAction {form_action:?}");
        assert_eq!(response.text().await.unwrap(), "Unexpected error");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_healthz() {
    let base = spawn_app().await;

    let body: serde_json::Value = reqwest::get(format!("{base}/healthz"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body, json!({"status": "ok"}));
}
