// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hashed bag-of-words encoder
//!
//! Deterministic, model-free embeddings: every lowercase alphanumeric token is
//! hashed with SHA-256 into one bucket with a sign, and the resulting vector is
//! L2-normalized. Texts sharing words land close together, which is enough for
//! offline runs and tests without downloading an ONNX model.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::EmbeddingEncoder;
use crate::vector::Embedding;

pub const HASH_ENCODER_NAME: &str = "hashed-bow";

#[derive(Debug, Clone)]
pub struct HashEmbeddingEncoder {
    dimension: usize,
}

impl HashEmbeddingEncoder {
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(anyhow!("Embedding dimension must be greater than 0"));
        }
        Ok(Self { dimension })
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let mut values = vec![0.0f32; self.dimension];

        for token in tokens(text) {
            let digest = Sha256::digest(token.as_bytes());
            let bucket = u64::from_le_bytes([
                digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6],
                digest[7],
            ]) as usize
                % self.dimension;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            values[bucket] += sign;
        }

        let mut embedding = Embedding::new(values);
        embedding.normalize();
        embedding.into_inner()
    }
}

/// Lowercase alphanumeric runs; accents are kept so "kené" and "kene" differ
fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[async_trait]
impl EmbeddingEncoder for HashEmbeddingEncoder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Err(anyhow!("At least one text is required for encoding"));
        }
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        HASH_ENCODER_NAME
    }
}
