// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Service configuration loaded from environment variables

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::dialogue::PersonaTemplate;
use crate::embeddings::DEFAULT_ONNX_MODEL;

pub const DEFAULT_LLM_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "deepseek-chat";
/// Upper bound on the outbound completion call
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TOP_K: usize = 4;
pub const MAX_TOP_K: usize = 20;
pub const DEFAULT_MAX_HISTORY_TURNS: usize = 10;

/// Top-level configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub embedding: EmbeddingSettings,
    pub retrieval: RetrievalSettings,
    pub dialogue: DialogueSettings,
    pub server: ServerConfig,
    /// JSON snapshot of knowledge items; the built-in catalog is used when unset
    pub knowledge_base_path: Option<PathBuf>,
}

/// Completion endpoint configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer credential; absence fails each chat request with 401
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Total attempts per request, 1 means no retry
    pub max_attempts: u32,
    pub retry_base_delay_ms: u64,
}

/// Embedding encoder configuration
#[derive(Debug, Clone)]
pub struct EmbeddingSettings {
    pub model_name: String,
    pub model_path: Option<PathBuf>,
    pub tokenizer_path: Option<PathBuf>,
    /// Dimension of the hashed encoder (ONNX models report their own)
    pub dimension: usize,
}

#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub default_top_k: usize,
    pub max_top_k: usize,
}

#[derive(Debug, Clone)]
pub struct DialogueSettings {
    pub persona: PersonaTemplate,
    pub max_history_turns: usize,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            llm: LlmConfig::from_env(),
            embedding: EmbeddingSettings::from_env(),
            retrieval: RetrievalSettings {
                default_top_k: env_parse("RAG_DEFAULT_TOP_K").unwrap_or(DEFAULT_TOP_K),
                max_top_k: MAX_TOP_K,
            },
            dialogue: DialogueSettings {
                persona: env::var("ARTI_PERSONA")
                    .ok()
                    .and_then(|v| PersonaTemplate::from_str(&v))
                    .unwrap_or_default(),
                max_history_turns: env_parse("MAX_HISTORY_TURNS")
                    .unwrap_or(DEFAULT_MAX_HISTORY_TURNS),
            },
            server: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_parse("API_PORT").unwrap_or(8000),
            },
            knowledge_base_path: env_path("KNOWLEDGE_BASE_PATH"),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.llm.validate()?;
        if self.embedding.dimension == 0 {
            return Err("Embedding dimension must be greater than 0".to_string());
        }
        if self.embedding.model_path.is_some() != self.embedding.tokenizer_path.is_some() {
            return Err(
                "EMBEDDING_MODEL_PATH and EMBEDDING_TOKENIZER_PATH must be set together"
                    .to_string(),
            );
        }
        if self.retrieval.default_top_k == 0 {
            return Err("Default top-k must be at least 1".to_string());
        }
        if self.retrieval.default_top_k > self.retrieval.max_top_k {
            return Err(format!(
                "Default top-k cannot exceed {}",
                self.retrieval.max_top_k
            ));
        }
        Ok(())
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env::var("DEEPSEEK_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            api_url: env::var("DEEPSEEK_API_URL").unwrap_or(defaults.api_url),
            model: env::var("LLM_MODEL").unwrap_or(defaults.model),
            temperature: env_parse("LLM_TEMPERATURE").unwrap_or(defaults.temperature),
            max_tokens: env_parse("LLM_MAX_TOKENS").unwrap_or(defaults.max_tokens),
            timeout_secs: env_parse("LLM_TIMEOUT_SECS").unwrap_or(defaults.timeout_secs),
            max_attempts: env_parse("LLM_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            retry_base_delay_ms: env_parse("LLM_RETRY_BASE_DELAY_MS")
                .unwrap_or(defaults.retry_base_delay_ms),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("LLM timeout must be greater than 0".to_string());
        }
        if self.max_attempts == 0 {
            return Err("LLM max attempts must be at least 1".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("LLM temperature must be between 0.0 and 2.0".to_string());
        }
        if self.max_tokens == 0 {
            return Err("LLM max tokens must be greater than 0".to_string());
        }
        Ok(())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|k| !k.trim().is_empty())
            .unwrap_or(false)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_LLM_API_URL.to_string(),
            model: DEFAULT_LLM_MODEL.to_string(),
            temperature: 0.1,
            max_tokens: 512,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
            max_attempts: 1,
            retry_base_delay_ms: 250,
        }
    }
}

impl EmbeddingSettings {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_name: env::var("EMBEDDING_MODEL_NAME").unwrap_or(defaults.model_name),
            model_path: env_path("EMBEDDING_MODEL_PATH"),
            tokenizer_path: env_path("EMBEDDING_TOKENIZER_PATH"),
            dimension: env_parse("EMBEDDING_DIMENSION").unwrap_or(defaults.dimension),
        }
    }
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_ONNX_MODEL.to_string(),
            model_path: None,
            tokenizer_path: None,
            dimension: 384,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            default_top_k: DEFAULT_TOP_K,
            max_top_k: MAX_TOP_K,
        }
    }
}

impl Default for DialogueSettings {
    fn default() -> Self {
        Self {
            persona: PersonaTemplate::default(),
            max_history_turns: DEFAULT_MAX_HISTORY_TURNS,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}
