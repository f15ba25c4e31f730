// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup wiring: encoder, indexed store, gateway and detector

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::info;

use super::chat::ChatPipeline;
use crate::config::AppConfig;
use crate::dialogue::DialogueBuilder;
use crate::embeddings::build_encoder;
use crate::llm::{ChatCompletionsGateway, CompletionGateway};
use crate::media::MediaDetector;
use crate::rag::{build_store, load_items, RetrievalEngine};

/// Builds a pipeline with the HTTP completion gateway from `config`
pub async fn build_pipeline(config: &AppConfig) -> Result<ChatPipeline> {
    let gateway = ChatCompletionsGateway::new(config.llm.clone())
        .context("Failed to create completion gateway")?;
    build_pipeline_with_gateway(config, Arc::new(gateway)).await
}

/// Builds a pipeline around an existing gateway
pub async fn build_pipeline_with_gateway(
    config: &AppConfig,
    gateway: Arc<dyn CompletionGateway>,
) -> Result<ChatPipeline> {
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let encoder = build_encoder(&config.embedding).context("Failed to load embedding encoder")?;

    let items = load_items(config.knowledge_base_path.as_deref())
        .await
        .context("Failed to load knowledge base")?;
    let store = build_store(encoder.as_ref(), items)
        .await
        .context("Failed to index knowledge base")?;

    let retrieval = RetrievalEngine::new(encoder, Arc::new(store))?;
    let dialogue = DialogueBuilder::new(
        config.dialogue.persona,
        config.dialogue.max_history_turns,
    );
    let detector = MediaDetector::new().context("Failed to compile media rules")?;

    info!(
        "Chat pipeline ready: persona={}, top_k={} (max {}), history={} turns",
        config.dialogue.persona,
        config.retrieval.default_top_k,
        config.retrieval.max_top_k,
        config.dialogue.max_history_turns
    );

    Ok(ChatPipeline::new(retrieval, dialogue, gateway, detector)
        .with_top_k_limits(config.retrieval.default_top_k, config.retrieval.max_top_k))
}
