// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Completion gateway against a local upstream server

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use mac_arti::config::LlmConfig;
use mac_arti::dialogue::{PromptMessage, Role};
use mac_arti::llm::{ChatCompletionsGateway, CompletionGateway, GatewayError};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
struct Upstream {
    status: StatusCode,
    body: Value,
    delay: Duration,
    hits: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<(Option<String>, Value)>>>,
}

async fn completions(
    State(upstream): State<Upstream>,
    headers: axum::http::HeaderMap,
    Json(payload): Json<Value>,
) -> (StatusCode, Json<Value>) {
    upstream.hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *upstream.last_request.lock().unwrap() = Some((auth, payload));
    tokio::time::sleep(upstream.delay).await;
    (upstream.status, Json(upstream.body.clone()))
}

async fn spawn_upstream(status: StatusCode, body: Value, delay: Duration) -> (String, Upstream) {
    let upstream = Upstream {
        status,
        body,
        delay,
        hits: Arc::new(AtomicUsize::new(0)),
        last_request: Arc::new(Mutex::new(None)),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(completions))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1/chat/completions", addr), upstream)
}

fn config(api_url: String) -> LlmConfig {
    LlmConfig {
        api_key: Some("test-key".to_string()),
        api_url,
        ..LlmConfig::default()
    }
}

fn prompt() -> Vec<PromptMessage> {
    vec![
        PromptMessage::new(Role::System, "Eres 'Arti'.\n- Obra: Vertical celeste"),
        PromptMessage::new(Role::User, "¿Qué es Vertical celeste?"),
    ]
}

#[tokio::test]
async fn test_success_returns_first_choice() {
    let (url, upstream) = spawn_upstream(
        StatusCode::OK,
        json!({"choices": [{"message": {"role": "assistant", "content": "Una instalación de Eielson."}}]}),
        Duration::ZERO,
    )
    .await;

    let gateway = ChatCompletionsGateway::new(config(url)).unwrap();
    let reply = gateway.complete(&prompt()).await.unwrap();
    assert_eq!(reply, "Una instalación de Eielson.");

    let (auth, payload) = upstream.last_request.lock().unwrap().clone().unwrap();
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(payload["model"], "deepseek-chat");
    assert_eq!(payload["max_tokens"], 512);
    assert_eq!(payload["stream"], false);
    assert_eq!(payload["messages"].as_array().unwrap().len(), 2);
    assert_eq!(payload["messages"][1]["role"], "user");
}

#[tokio::test]
async fn test_rate_limited_maps_to_upstream_error() {
    let (url, _upstream) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        json!({"error": {"message": "rate limited"}}),
        Duration::ZERO,
    )
    .await;

    let gateway = ChatCompletionsGateway::new(config(url)).unwrap();
    let err = gateway.complete(&prompt()).await.unwrap_err();
    assert_eq!(
        err,
        GatewayError::UpstreamError {
            status: 429,
            detail: "rate limited".to_string()
        }
    );
}

#[tokio::test]
async fn test_error_without_message_uses_generic_detail() {
    let (url, _upstream) =
        spawn_upstream(StatusCode::INTERNAL_SERVER_ERROR, json!({}), Duration::ZERO).await;

    let gateway = ChatCompletionsGateway::new(config(url)).unwrap();
    match gateway.complete(&prompt()).await {
        Err(GatewayError::UpstreamError { status, detail }) => {
            assert_eq!(status, 500);
            assert_eq!(detail, "Error desconocido de la API");
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (url, _upstream) =
        spawn_upstream(StatusCode::OK, json!({"choices": []}), Duration::ZERO).await;

    let gateway = ChatCompletionsGateway::new(config(url)).unwrap();
    assert!(matches!(
        gateway.complete(&prompt()).await,
        Err(GatewayError::MalformedUpstreamResponse(_))
    ));
}

#[tokio::test]
async fn test_missing_credential_makes_no_request() {
    let (url, upstream) = spawn_upstream(StatusCode::OK, json!({}), Duration::ZERO).await;

    let gateway = ChatCompletionsGateway::new(LlmConfig {
        api_key: None,
        ..config(url)
    })
    .unwrap();
    assert_eq!(
        gateway.complete(&prompt()).await,
        Err(GatewayError::MissingCredential)
    );
    assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let gateway =
        ChatCompletionsGateway::new(config(format!("http://{}/v1/chat/completions", addr)))
            .unwrap();
    assert!(matches!(
        gateway.complete(&prompt()).await,
        Err(GatewayError::UpstreamUnavailable(_))
    ));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let (url, _upstream) = spawn_upstream(
        StatusCode::OK,
        json!({"choices": [{"message": {"content": "tarde"}}]}),
        Duration::from_secs(3),
    )
    .await;

    let gateway = ChatCompletionsGateway::new(LlmConfig {
        timeout_secs: 1,
        ..config(url)
    })
    .unwrap();
    assert!(matches!(
        gateway.complete(&prompt()).await,
        Err(GatewayError::UpstreamUnavailable(_))
    ));
}
