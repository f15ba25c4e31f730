// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Retry policy wired into the gateway

use mac_arti::config::LlmConfig;
use mac_arti::dialogue::{PromptMessage, Role};
use mac_arti::llm::{ChatCompletionsGateway, CompletionGateway, GatewayError, RetryPolicy};
use std::time::{Duration, Instant};

fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/v1/chat/completions", addr)
}

#[tokio::test]
async fn test_retry_policy_waits_between_attempts() {
    let gateway = ChatCompletionsGateway::new(LlmConfig {
        api_key: Some("test-key".to_string()),
        api_url: unreachable_url(),
        ..LlmConfig::default()
    })
    .unwrap()
    .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(40)));

    let start = Instant::now();
    let result = gateway
        .complete(&[PromptMessage::new(Role::User, "hola")])
        .await;

    assert!(matches!(result, Err(GatewayError::UpstreamUnavailable(_))));
    // Two backoffs: >= 30ms and >= 60ms with jitter
    assert!(start.elapsed() >= Duration::from_millis(90));
}

#[test]
fn test_default_policy_is_single_attempt() {
    assert_eq!(RetryPolicy::default().max_attempts, 1);
}
