// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// POST /chat end to end with a recording completion gateway

use async_trait::async_trait;
use mac_arti::api::{create_router, AppState};
use mac_arti::config::AppConfig;
use mac_arti::dialogue::{PromptMessage, Role, FALLBACK_RESPONSE};
use mac_arti::llm::{CompletionGateway, GatewayError};
use mac_arti::pipeline::build_pipeline_with_gateway;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Records every prompt and answers with a fixed result
struct RecordingGateway {
    reply: Result<String, GatewayError>,
    calls: Mutex<Vec<Vec<PromptMessage>>>,
}

impl RecordingGateway {
    fn new(reply: Result<String, GatewayError>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<Vec<PromptMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionGateway for RecordingGateway {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        self.reply.clone()
    }
}

async fn spawn_api(gateway: Arc<RecordingGateway>) -> String {
    let pipeline = build_pipeline_with_gateway(&AppConfig::default(), gateway)
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

async fn post_chat(base: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{}/chat", base))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_chat_answer_shape() {
    let gateway = RecordingGateway::new(Ok(
        "El mundo en llamas está en la zona Referente y Postmodernidad.".to_string(),
    ));
    let base = spawn_api(gateway.clone()).await;

    let (status, body) = post_chat(&base, json!({"message": "Cuéntame sobre Fernando Bryce"})).await;

    assert_eq!(status, 200);
    assert!(body["response"].as_str().unwrap().contains("El mundo en llamas"));
    let items = body["relevantItems"].as_array().unwrap();
    assert!(!items.is_empty() && items.len() <= 4);
    assert!(items.iter().all(|i| i["metadata"]["tipo"] == "obra"));
    assert_eq!(
        body["mediaReferences"],
        json!([{"kind": "obra", "assetId": "obra-bryce", "label": "El mundo en llamas"}])
    );

    let calls = gateway.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0].role, Role::System);
    assert!(calls[0][0].content.contains("- Obra:"));
    assert_eq!(calls[0].last().unwrap().content, "Cuéntame sobre Fernando Bryce");
}

#[tokio::test]
async fn test_chat_snake_case_body_and_history() {
    let gateway = RecordingGateway::new(Ok("Sí.".to_string()));
    let base = spawn_api(gateway.clone()).await;

    let (status, _) = post_chat(
        &base,
        json!({
            "message": "¿Y en la zona Centro?",
            "message_history": [
                {"role": "user", "content": "¿Qué obras hay?"},
                {"role": "assistant"},
                {"role": "assistant", "content": "Hay cuatro obras."}
            ],
            "zona_filter": "Centro",
            "max_results": 2
        }),
    )
    .await;
    assert_eq!(status, 200);

    let prompt = &gateway.calls()[0];
    let roles: Vec<Role> = prompt.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![Role::System, Role::User, Role::Assistant, Role::User]);
    assert!(prompt[0].content.contains("Retablo Ayacuchano"));
    assert!(!prompt[0].content.contains("Vertical celeste"));
}

#[tokio::test]
async fn test_chat_fallback_without_gateway_call() {
    let gateway = RecordingGateway::new(Ok("no debería llamarse".to_string()));
    let base = spawn_api(gateway.clone()).await;

    let (status, body) = post_chat(&base, json!({"message": "obras", "zoneFilter": "Azotea"})).await;

    assert_eq!(status, 200);
    assert_eq!(body["response"], FALLBACK_RESPONSE);
    assert_eq!(
        body["suggestions"],
        json!(["Listar todas las obras", "Ver zonas del museo"])
    );
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_chat_error_statuses() {
    let cases = [
        (GatewayError::MissingCredential, 401, "missing_credential"),
        (
            GatewayError::UpstreamUnavailable("timeout".to_string()),
            502,
            "upstream_unavailable",
        ),
        (
            GatewayError::UpstreamError {
                status: 429,
                detail: "rate limited".to_string(),
            },
            429,
            "upstream_error",
        ),
        (
            GatewayError::MalformedUpstreamResponse("no choices".to_string()),
            500,
            "malformed_upstream_response",
        ),
    ];

    for (error, expected_status, expected_type) in cases {
        let base = spawn_api(RecordingGateway::new(Err(error))).await;
        let (status, body) = post_chat(&base, json!({"message": "Vertical celeste"})).await;
        assert_eq!(status, expected_status);
        assert_eq!(body["errorType"], expected_type);
        assert!(!body["message"].as_str().unwrap().contains("rate limited"));
    }
}

#[tokio::test]
async fn test_chat_invalid_requests() {
    let gateway = RecordingGateway::new(Ok("x".to_string()));
    let base = spawn_api(gateway.clone()).await;

    for body in [
        json!({"message": ""}),
        json!({"message": "hola", "maxResults": 0}),
        json!({"message": "hola", "maxResults": 21}),
        json!({"history": []}),
    ] {
        let (status, response) = post_chat(&base, body).await;
        assert_eq!(status, 400);
        assert_eq!(response["errorType"], "invalid_request");
    }
    assert!(gateway.calls().is_empty());
}
