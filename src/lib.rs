// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod dialogue;
pub mod embeddings;
pub mod llm;
pub mod media;
pub mod pipeline;
pub mod rag;
pub mod vector;
pub mod version;

pub use config::AppConfig;
pub use dialogue::{DialogueBuilder, PersonaTemplate, PromptMessage};
pub use embeddings::{EmbeddingEncoder, HashEmbeddingEncoder, OnnxEmbeddingModel};
pub use llm::{ChatCompletionsGateway, CompletionGateway, GatewayError, RetryPolicy};
pub use media::{MediaDetector, MediaReference};
pub use pipeline::{ChatError, ChatPipeline, ChatQuery, ChatReply};
pub use rag::{InMemoryVectorStore, KnowledgeItem, RetrievalEngine, RetrievalFilter, VectorStore};
