// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! ONNX sentence-transformer encoder
//!
//! Wraps ONNX Runtime to run a multilingual MiniLM sentence transformer
//! (`paraphrase-multilingual-MiniLM-L12-v2` in the museum deployment).
//!
//! Features:
//! - ONNX model loading from disk
//! - BERT tokenization with truncation and batch padding
//! - Attention-masked mean pooling over token embeddings
//! - Output dimension discovered from a validation inference at load time

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use ndarray::{Array2, Axis};
use ort::execution_providers::CPUExecutionProvider;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use super::EmbeddingEncoder;

/// Default model used by the museum knowledge base
pub const DEFAULT_ONNX_MODEL: &str = "paraphrase-multilingual-MiniLM-L12-v2";

/// Maximum sequence length accepted by MiniLM models
const MAX_SEQUENCE_LENGTH: usize = 256;

/// ONNX-based sentence embedding model
///
/// The session needs `&mut` to run, so it sits behind a mutex; the tokenizer is
/// shared read-only. Clones share both.
#[derive(Clone)]
pub struct OnnxEmbeddingModel {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    model_name: String,
    dimension: usize,
}

impl std::fmt::Debug for OnnxEmbeddingModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxEmbeddingModel")
            .field("model_name", &self.model_name)
            .field("dimension", &self.dimension)
            .finish_non_exhaustive()
    }
}

/// Token ids and attention mask for a padded batch, row-major
struct EncodedBatch {
    rows: usize,
    width: usize,
    input_ids: Vec<i64>,
    attention_mask: Vec<i64>,
}

impl OnnxEmbeddingModel {
    /// Loads the model and tokenizer and probes the output dimension
    ///
    /// # Errors
    /// Returns error if either file is missing or invalid, or if the model does
    /// not produce `[batch, seq_len, hidden]` token embeddings.
    ///
    /// # Example
    /// ```ignore
    /// let model = OnnxEmbeddingModel::new(
    ///     "paraphrase-multilingual-MiniLM-L12-v2",
    ///     "./models/minilm/model.onnx",
    ///     "./models/minilm/tokenizer.json",
    /// )?;
    /// ```
    pub fn new<P: AsRef<Path>>(
        model_name: impl Into<String>,
        model_path: P,
        tokenizer_path: P,
    ) -> Result<Self> {
        let model_name = model_name.into();
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("ONNX model file not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        info!("Initializing ONNX embedding model {}", model_name);

        let session = Session::builder()
            .context("Failed to create session builder")?
            .with_execution_providers([CPUExecutionProvider::default().build()])
            .context("Failed to set CPU execution provider")?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .context("Failed to set optimization level")?
            .with_intra_threads(4)
            .context("Failed to set intra threads")?
            .commit_from_file(model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        let mut model = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            model_name,
            dimension: 0,
        };

        let probe = model.run(&["validation test".to_string()])?;
        model.dimension = probe
            .first()
            .map(|v| v.len())
            .ok_or_else(|| anyhow!("Validation inference returned no embeddings"))?;

        info!(
            "ONNX embedding model {} loaded ({} dimensions)",
            model.model_name, model.dimension
        );

        Ok(model)
    }

    fn tokenize(&self, texts: &[String]) -> Result<EncodedBatch> {
        let encodings = texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text.as_str(), true)
                    .map_err(|e| anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        let width = encodings
            .iter()
            .map(|enc| enc.get_ids().len())
            .max()
            .unwrap_or(0);

        let mut input_ids = Vec::with_capacity(texts.len() * width);
        let mut attention_mask = Vec::with_capacity(texts.len() * width);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let padding = width - ids.len();
            input_ids.extend(ids.iter().map(|&id| id as i64));
            input_ids.extend(std::iter::repeat(0i64).take(padding));
            attention_mask.extend(encoding.get_attention_mask().iter().map(|&m| m as i64));
            attention_mask.extend(std::iter::repeat(0i64).take(padding));
        }

        Ok(EncodedBatch {
            rows: texts.len(),
            width,
            input_ids,
            attention_mask,
        })
    }

    /// Tokenizes, runs one batch inference and mean-pools each row
    fn run(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let batch = self.tokenize(texts)?;
        let shape = (batch.rows, batch.width);

        let input_ids = Array2::from_shape_vec(shape, batch.input_ids)
            .context("Failed to create input_ids array")?;
        let attention_mask = Array2::from_shape_vec(shape, batch.attention_mask.clone())
            .context("Failed to create attention_mask array")?;
        let token_type_ids = Array2::<i64>::zeros(shape);

        let mut session = self
            .session
            .lock()
            .map_err(|_| anyhow!("ONNX session lock poisoned"))?;
        let outputs = session.run(ort::inputs![
            "input_ids" => Value::from_array(input_ids)?,
            "attention_mask" => Value::from_array(attention_mask)?,
            "token_type_ids" => Value::from_array(token_type_ids)?
        ])?;

        // Different exports name the output differently; take the first one
        let hidden = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        if hidden.ndim() != 3 {
            anyhow::bail!(
                "Model outputs unexpected shape {:?} (expected [batch, seq_len, hidden])",
                hidden.shape()
            );
        }

        let mut embeddings = Vec::with_capacity(batch.rows);
        for row in 0..batch.rows {
            let tokens = hidden.index_axis(Axis(0), row);
            let seq_len = tokens.shape()[0];
            let hidden_dim = tokens.shape()[1];
            let mask = &batch.attention_mask[row * batch.width..(row + 1) * batch.width];

            let mut pooled = vec![0.0f32; hidden_dim];
            let mut mask_sum = 0.0f32;
            for i in 0..seq_len {
                let weight = mask[i] as f32;
                mask_sum += weight;
                for (j, value) in pooled.iter_mut().enumerate() {
                    *value += tokens[[i, j]] * weight;
                }
            }
            for value in &mut pooled {
                *value /= mask_sum.max(1e-9);
            }
            embeddings.push(pooled);
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl EmbeddingEncoder for OnnxEmbeddingModel {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            anyhow::bail!("At least one text is required for encoding");
        }

        let embeddings = self.run(texts)?;
        for (i, embedding) in embeddings.iter().enumerate() {
            if embedding.len() != self.dimension {
                anyhow::bail!(
                    "Unexpected embedding dimension at index {}: {} (expected {})",
                    i,
                    embedding.len(),
                    self.dimension
                );
            }
        }
        Ok(embeddings)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
