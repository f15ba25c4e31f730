// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Embedding encoders
//!
//! The same encoder instance indexes the knowledge base at startup and encodes
//! queries at request time, so both live in one vector space. Its dimension is
//! part of the knowledge store's schema for the lifetime of the process.

pub mod hashed;
pub mod onnx_model;

pub use hashed::{HashEmbeddingEncoder, HASH_ENCODER_NAME};
pub use onnx_model::{OnnxEmbeddingModel, DEFAULT_ONNX_MODEL};

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::EmbeddingSettings;

/// Text → fixed-dimension vectors
///
/// Implementations must be deterministic and return exactly one vector of
/// `dimension()` values per input text. An empty input slice is an error.
#[async_trait]
pub trait EmbeddingEncoder: Send + Sync {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Builds the encoder described by the settings
///
/// With both ONNX paths configured the ONNX model is loaded; otherwise the
/// hashed bag-of-words encoder is used.
pub fn build_encoder(settings: &EmbeddingSettings) -> Result<Arc<dyn EmbeddingEncoder>> {
    match (&settings.model_path, &settings.tokenizer_path) {
        (Some(model_path), Some(tokenizer_path)) => {
            let model = OnnxEmbeddingModel::new(
                settings.model_name.clone(),
                model_path.as_path(),
                tokenizer_path.as_path(),
            )?;
            Ok(Arc::new(model))
        }
        _ => {
            info!(
                "No ONNX model configured, using {} encoder ({} dimensions)",
                HASH_ENCODER_NAME, settings.dimension
            );
            Ok(Arc::new(HashEmbeddingEncoder::new(settings.dimension)?))
        }
    }
}
