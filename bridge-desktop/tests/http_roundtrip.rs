//! Round-trip tests for the reqwest client and the in-process host router
//! against a local axum server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use bridge_desktop::{DesktopHostRouter, ReqwestHttpClient};
use bridge_traits::{HostRouter, HttpClient, HttpMethod, HttpRequest};
use serde_json::{json, Value};

async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };

    Json(json!({
        "method": method.as_str(),
        "authorization": header("authorization"),
        "content_type": header("content-type"),
        "body": body,
    }))
}

fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/text", get(|| async { "pong" }))
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"message": "no such invoice"}))) }),
        )
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
}

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app()).await.unwrap() });
    addr
}

#[tokio::test]
async fn reqwest_client_returns_status_as_data() {
    let addr = spawn_server().await;
    let client = ReqwestHttpClient::new().unwrap();

    let response = client
        .execute(HttpRequest::new(HttpMethod::Get, format!("http://{addr}/missing")))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["message"], "no such invoice");
}

#[tokio::test]
async fn reqwest_client_sends_headers_and_body() {
    let addr = spawn_server().await;
    let client = ReqwestHttpClient::new().unwrap();

    let request = HttpRequest::new(HttpMethod::Put, format!("http://{addr}/echo"))
        .bearer_token("abc")
        .json(&json!({"alias": "satoshi"}))
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert!(response.is_success());
    let echoed = response.decoded_body().unwrap().unwrap();
    assert_eq!(echoed["method"], "PUT");
    assert_eq!(echoed["authorization"], "Bearer abc");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], r#"{"alias":"satoshi"}"#);
}

#[tokio::test]
async fn host_router_envelopes() {
    let addr = spawn_server().await;
    let http = Arc::new(ReqwestHttpClient::new().unwrap());
    let router = DesktopHostRouter::new(http)
        .with_base_url(format!("http://{addr}").parse().unwrap())
        .with_bearer_token("host-token");

    let envelope = router.route("/echo", "POST", r#"{"amount":5}"#).await.unwrap();
    let body = envelope.body.unwrap();
    assert_eq!(body["method"], "POST");
    assert_eq!(body["authorization"], "Bearer host-token");
    assert_eq!(body["body"], r#"{"amount":5}"#);

    let envelope = router.route("/text", "GET", "").await.unwrap();
    assert_eq!(envelope.body, Some(json!("pong")));

    let envelope = router.route("/empty", "GET", "").await.unwrap();
    assert_eq!(envelope.body, None);
    assert_eq!(envelope.error_message(), None);

    let envelope = router.route("/missing", "GET", "").await.unwrap();
    assert_eq!(envelope.error_message(), Some("HTTP 404: no such invoice"));
}
