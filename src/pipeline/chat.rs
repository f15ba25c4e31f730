// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat pipeline: retrieve, assemble, prompt, complete, detect media
//!
//! Each request runs independently against read-only shared handles. The only
//! await point of consequence is the outbound completion call.

use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use super::errors::ChatError;
use crate::config::{DEFAULT_TOP_K, MAX_TOP_K};
use crate::dialogue::{fallback_suggestions, ConversationHistory, DialogueBuilder, FALLBACK_RESPONSE};
use crate::llm::CompletionGateway;
use crate::media::{MediaDetector, MediaReference};
use crate::rag::{assemble_context, ItemMetadata, RetrievalEngine, RetrievalFilter};

/// One visitor question with its conversation so far
#[derive(Debug, Clone, Default)]
pub struct ChatQuery {
    pub message: String,
    pub history: ConversationHistory,
    pub zone_filter: Option<String>,
    pub max_results: Option<usize>,
}

impl ChatQuery {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_history(mut self, history: ConversationHistory) -> Self {
        self.history = history;
        self
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone_filter = Some(zone.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelevantItem {
    pub id: String,
    pub metadata: ItemMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnswer {
    pub response: String,
    pub relevant_items: Vec<RelevantItem>,
    pub media_references: Vec<MediaReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallbackReply {
    pub response: String,
    pub suggestions: Vec<String>,
}

impl Default for FallbackReply {
    fn default() -> Self {
        Self {
            response: FALLBACK_RESPONSE.to_string(),
            suggestions: fallback_suggestions(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatReply {
    Answer(ChatAnswer),
    /// Retrieval found nothing; no completion call was made
    Fallback(FallbackReply),
}

impl ChatReply {
    pub fn response(&self) -> &str {
        match self {
            ChatReply::Answer(answer) => &answer.response,
            ChatReply::Fallback(fallback) => &fallback.response,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ChatReply::Fallback(_))
    }
}

pub struct ChatPipeline {
    retrieval: RetrievalEngine,
    dialogue: DialogueBuilder,
    gateway: Arc<dyn CompletionGateway>,
    detector: MediaDetector,
    default_top_k: usize,
    max_top_k: usize,
}

impl ChatPipeline {
    pub fn new(
        retrieval: RetrievalEngine,
        dialogue: DialogueBuilder,
        gateway: Arc<dyn CompletionGateway>,
        detector: MediaDetector,
    ) -> Self {
        Self {
            retrieval,
            dialogue,
            gateway,
            detector,
            default_top_k: DEFAULT_TOP_K,
            max_top_k: MAX_TOP_K,
        }
    }

    pub fn with_top_k_limits(mut self, default_top_k: usize, max_top_k: usize) -> Self {
        self.default_top_k = default_top_k;
        self.max_top_k = max_top_k;
        self
    }

    pub fn retrieval(&self) -> &RetrievalEngine {
        &self.retrieval
    }

    fn resolve_top_k(&self, requested: Option<usize>) -> Result<usize, ChatError> {
        let top_k = requested.unwrap_or(self.default_top_k);
        if top_k == 0 || top_k > self.max_top_k {
            return Err(ChatError::InvalidRequest(format!(
                "maxResults must be between 1 and {}, got {}",
                self.max_top_k, top_k
            )));
        }
        Ok(top_k)
    }

    pub async fn handle(&self, query: ChatQuery) -> Result<ChatReply, ChatError> {
        let start = Instant::now();

        if query.message.trim().is_empty() {
            return Err(ChatError::InvalidRequest(
                "message cannot be empty".to_string(),
            ));
        }
        let top_k = self.resolve_top_k(query.max_results)?;

        let filter = RetrievalFilter::artworks().with_zone(query.zone_filter.as_deref());
        let retrieved = self
            .retrieval
            .retrieve(&query.message, &filter, top_k)
            .await?;

        if retrieved.is_empty() {
            info!(
                "No artworks matched (zone: {:?}), returning fallback",
                query.zone_filter
            );
            return Ok(ChatReply::Fallback(FallbackReply::default()));
        }

        let context = assemble_context(&retrieved);
        let messages = self
            .dialogue
            .build_messages(&context, &query.history, &query.message);

        let reply = self.gateway.complete(&messages).await.map_err(|e| {
            warn!("Completion failed [{}]: {}", e.error_code(), e);
            ChatError::from(e)
        })?;

        let media_references = self.detector.detect_media(&query.message, &reply);
        let relevant_items = retrieved
            .iter()
            .map(|hit| RelevantItem {
                id: hit.id.clone(),
                metadata: hit.metadata.clone(),
            })
            .collect::<Vec<_>>();

        info!(
            "Chat answered in {}ms ({} items, {} media references)",
            start.elapsed().as_millis(),
            relevant_items.len(),
            media_references.len()
        );

        Ok(ChatReply::Answer(ChatAnswer {
            response: reply,
            relevant_items,
            media_references,
        }))
    }
}
