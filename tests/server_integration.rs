//! HTTP front-end tests.
//!
//! The router is served on an ephemeral local port and called with a real
//! HTTP client. Providers are in-process doubles, so no network is needed.

use async_trait::async_trait;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use trivia::Resolver;
use trivia_search::{AnswerProvider, ProviderKind, ProviderOutcome};

struct FixedProvider(&'static str);

#[async_trait]
impl AnswerProvider for FixedProvider {
    async fn attempt(&self, _query: &str) -> ProviderOutcome {
        ProviderOutcome::Answer {
            text: self.0.to_owned(),
            source_field: "fixed".into(),
        }
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Google
    }
}

async fn spawn_server(resolver: Resolver) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, trivia::server::router(resolver))
            .await
            .expect("serve");
    });
    addr
}

fn answering(text: &'static str) -> Resolver {
    Resolver::with_providers(vec![Arc::new(FixedProvider(text))], Duration::from_secs(2))
}

fn empty() -> Resolver {
    Resolver::with_providers(Vec::new(), Duration::from_secs(2))
}

async fn post_ask(addr: SocketAddr, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{addr}/ask"))
        .json(&body)
        .send()
        .await
        .expect("send");
    let status = response.status().as_u16();
    (status, response.json().await.expect("json body"))
}

#[tokio::test]
async fn ask_returns_answer() {
    let addr = spawn_server(answering("Paris")).await;

    let (status, body) = post_ask(addr, json!({"question": "capital of france"})).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({"success": true, "question": "capital of france", "answer": "Paris"})
    );
}

#[tokio::test]
async fn ask_evaluates_arithmetic() {
    let addr = spawn_server(empty()).await;

    let (status, body) = post_ask(addr, json!({"question": "What is 12 times 12?"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["answer"], "144");
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn ask_reports_failure_reason() {
    let addr = spawn_server(empty()).await;

    let (status, body) = post_ask(addr, json!({"question": "who wrote hamlet"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], false);
    assert_eq!(body["reason"], "no_provider_answer");
    assert_eq!(
        body["answer"],
        "Sorry, I couldn't find an answer to that question."
    );
}

#[tokio::test]
async fn ask_rejects_blank_question() {
    let addr = spawn_server(answering("unused")).await;

    for payload in [json!({"question": "   "}), json!({})] {
        let (status, body) = post_ask(addr, payload).await;
        assert_eq!(status, 400);
        assert_eq!(
            body,
            json!({"success": false, "error": "Please provide a question"})
        );
    }
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let addr = spawn_server(answering("unused")).await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/ask"))
        .header("content-type", "application/json")
        .body("{\"question\": ")
        .send()
        .await
        .expect("send");

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn ask_with_only_symbols_is_empty_question() {
    let addr = spawn_server(answering("unused")).await;

    let (status, body) = post_ask(addr, json!({"question": "???"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["reason"], "empty_question");
}

#[tokio::test]
async fn status_lists_providers_and_deadline() {
    let addr = spawn_server(answering("x")).await;

    let body: Value = reqwest::get(format!("http://{addr}/status"))
        .await
        .expect("send")
        .json()
        .await
        .expect("json");

    assert_eq!(
        body,
        json!({"status": "running", "deadline_ms": 2000, "providers": ["Google"]})
    );
}

#[tokio::test]
async fn health_is_ok() {
    let addr = spawn_server(empty()).await;

    let response = reqwest::get(format!("http://{addr}/health"))
        .await
        .expect("send");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn serve_stops_on_cancel() {
    let cancel = tokio_util::sync::CancellationToken::new();
    let config = trivia::config::ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    };
    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { trivia::server::serve(&config, empty(), cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let result = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("server stops")
        .expect("join");
    assert!(result.is_ok());
}
