// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// GET /obras and GET /health

use async_trait::async_trait;
use mac_arti::api::{create_router, AppState};
use mac_arti::config::AppConfig;
use mac_arti::dialogue::PromptMessage;
use mac_arti::llm::{CompletionGateway, GatewayError};
use mac_arti::pipeline::build_pipeline_with_gateway;
use serde_json::Value;
use std::sync::Arc;

struct UnusedGateway;

#[async_trait]
impl CompletionGateway for UnusedGateway {
    async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, GatewayError> {
        Err(GatewayError::Internal("not expected".to_string()))
    }
}

async fn spawn_api() -> String {
    let pipeline = build_pipeline_with_gateway(&AppConfig::default(), Arc::new(UnusedGateway))
        .await
        .unwrap();
    let app = create_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn get_json(url: String) -> Value {
    let response = reqwest::get(url).await.unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_list_all_artworks() {
    let base = spawn_api().await;
    let body = get_json(format!("{}/obras", base)).await;

    assert_eq!(body["count"], 4);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0]["id"], "obra-bryce");
    assert_eq!(results[0]["snippet"], "Obra: El mundo en llamas");
    assert_eq!(results[0]["metadata"]["artista"], "Fernando Bryce");
}

#[tokio::test]
async fn test_list_artworks_by_zone() {
    let base = spawn_api().await;
    let body = get_json(format!("{}/obras?zona=Radicalidad%20y%20resistencia", base)).await;

    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["id"], "obra-flores");
}

#[tokio::test]
async fn test_health() {
    let base = spawn_api().await;
    let body = get_json(format!("{}/health", base)).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["knowledgeItems"], 8);
    assert_eq!(body["embeddingDimension"], 384);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let base = spawn_api().await;
    let response = reqwest::Client::new()
        .get(format!("{}/health", base))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
