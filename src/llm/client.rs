// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for an OpenAI-compatible chat completions endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

use super::errors::{GatewayError, UNKNOWN_UPSTREAM_DETAIL};
use super::retry::RetryPolicy;
use crate::config::LlmConfig;
use crate::dialogue::PromptMessage;

/// Completion capability consumed by the chat pipeline
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Sends the prompt and returns the assistant's reply text
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, GatewayError>;
}

// --- OpenAI-compatible serde structs ---

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Gateway backed by reqwest with a fixed request timeout
pub struct ChatCompletionsGateway {
    client: Client,
    config: LlmConfig,
    retry: RetryPolicy,
}

impl ChatCompletionsGateway {
    pub fn new(config: LlmConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::Internal(e.to_string()))?;

        let retry = RetryPolicy::new(
            config.max_attempts,
            Duration::from_millis(config.retry_base_delay_ms),
        );

        info!(
            "Completion gateway configured: endpoint={}, model={}, timeout={}s, attempts={}",
            config.api_url, config.model, config.timeout_secs, retry.max_attempts
        );
        if !config.has_credential() {
            warn!("DEEPSEEK_API_KEY not set; chat requests will be rejected");
        }

        Ok(Self {
            client,
            config,
            retry,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_once(
        &self,
        api_key: &str,
        messages: &[PromptMessage],
    ) -> Result<String, GatewayError> {
        let start = Instant::now();
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Connection error calling completion endpoint: {}", e);
                GatewayError::UpstreamUnavailable(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::UpstreamUnavailable(e.to_string()))?;

        if !status.is_success() {
            let detail = upstream_error_detail(&body);
            error!("Completion API error {}: {}", status.as_u16(), detail);
            return Err(GatewayError::UpstreamError {
                status: status.as_u16(),
                detail,
            });
        }

        let content = parse_reply(&body)?;
        debug!(
            "Completion returned {} chars in {}ms",
            content.len(),
            start.elapsed().as_millis()
        );
        Ok(content)
    }
}

#[async_trait]
impl CompletionGateway for ChatCompletionsGateway {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, GatewayError> {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return Err(GatewayError::MissingCredential),
        };

        self.retry.run(|| self.send_once(api_key, messages)).await
    }
}

/// `error.message` from an error body, or a generic detail
pub fn upstream_error_detail(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_UPSTREAM_DETAIL.to_string())
}

/// `choices[0].message.content` from a success body
pub fn parse_reply(body: &str) -> Result<String, GatewayError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GatewayError::MalformedUpstreamResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| {
            GatewayError::MalformedUpstreamResponse(
                "missing choices[0].message.content".to_string(),
            )
        })
}
