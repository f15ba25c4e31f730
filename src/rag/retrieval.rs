// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Retrieval engine: query text to ranked knowledge items

use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::errors::StoreError;
use super::knowledge::{KnowledgeItem, RetrievalFilter};
use super::knowledge_store::{RetrievalResult, VectorStore};
use crate::embeddings::EmbeddingEncoder;

/// Encodes a query once and runs one filtered nearest-neighbor search
#[derive(Clone)]
pub struct RetrievalEngine {
    encoder: Arc<dyn EmbeddingEncoder>,
    store: Arc<dyn VectorStore>,
}

impl RetrievalEngine {
    /// # Errors
    /// Fails if the encoder and store disagree on the vector dimension.
    pub fn new(
        encoder: Arc<dyn EmbeddingEncoder>,
        store: Arc<dyn VectorStore>,
    ) -> Result<Self, StoreError> {
        if encoder.dimension() != store.dimension() {
            return Err(StoreError::DimensionMismatch {
                expected: store.dimension(),
                actual: encoder.dimension(),
            });
        }
        Ok(Self { encoder, store })
    }

    /// Returns at most `top_k` items matching `filter`, nearest first
    ///
    /// Zero matches is an empty result, not an error.
    pub async fn retrieve(
        &self,
        query: &str,
        filter: &RetrievalFilter,
        top_k: usize,
    ) -> Result<RetrievalResult, StoreError> {
        if top_k == 0 {
            return Err(StoreError::InvalidTopK(top_k));
        }

        let start = Instant::now();
        let mut vectors = self.encoder.encode(&[query.to_string()]).await?;
        let embedding = vectors
            .pop()
            .ok_or_else(|| StoreError::Encoding("encoder returned no vector".to_string()))?;

        let result = self.store.query(&embedding, filter, top_k).await?;

        debug!(
            "Retrieved {} of top-{} items ({} constraints) in {}ms",
            result.len(),
            top_k,
            filter.constraints().len(),
            start.elapsed().as_millis()
        );

        Ok(result)
    }

    /// Items matching `filter` without ranking
    pub async fn list(&self, filter: &RetrievalFilter) -> Result<Vec<KnowledgeItem>, StoreError> {
        self.store.get(filter).await
    }

    pub fn store(&self) -> &Arc<dyn VectorStore> {
        &self.store
    }
}
