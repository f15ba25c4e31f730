// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Knowledge store: filtered nearest-neighbor search over indexed items
//!
//! The store is filled once at startup and read-only afterwards, so handles are
//! shared across requests without locking.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;

use super::errors::StoreError;
use super::knowledge::{ItemMetadata, KnowledgeItem, RetrievalFilter};
use crate::vector::Embedding;

/// One ranked match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalHit {
    pub id: String,
    pub metadata: ItemMetadata,
    pub text: String,
    /// Cosine distance to the query; lower is more similar
    pub distance: f32,
}

/// Matches ranked by ascending distance; may be empty
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    hits: Vec<RetrievalHit>,
}

impl RetrievalResult {
    pub fn new(hits: Vec<RetrievalHit>) -> Self {
        Self { hits }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn hits(&self) -> &[RetrievalHit] {
        &self.hits
    }

    pub fn iter(&self) -> impl Iterator<Item = &RetrievalHit> {
        self.hits.iter()
    }
}

/// Vector store capability consumed by the retrieval engine
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Nearest neighbours of `embedding` among items matching `filter`
    ///
    /// Returns at most `top_k` hits ordered by ascending distance.
    async fn query(
        &self,
        embedding: &[f32],
        filter: &RetrievalFilter,
        top_k: usize,
    ) -> Result<RetrievalResult, StoreError>;

    /// All items matching `filter`, in indexing order
    async fn get(&self, filter: &RetrievalFilter) -> Result<Vec<KnowledgeItem>, StoreError>;

    /// Vector dimension fixed for the store's lifetime
    fn dimension(&self) -> usize;

    fn count(&self) -> usize;
}

#[derive(Debug, Clone)]
struct StoredItem {
    item: KnowledgeItem,
    vector: Embedding,
}

/// In-memory store with brute-force cosine search
///
/// The catalog is small (tens of items), so scanning every entry per query is
/// cheaper than maintaining an index.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimension: usize,
    entries: Vec<StoredItem>,
    positions: HashMap<String, usize>,
}

impl InMemoryVectorStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Adds an item with its precomputed vector
    ///
    /// # Errors
    /// * invalid id or metadata
    /// * id already present
    /// * vector of the wrong dimension or with non-finite values
    pub fn insert(&mut self, item: KnowledgeItem, vector: Vec<f32>) -> Result<(), StoreError> {
        item.validate()?;

        if self.positions.contains_key(&item.id) {
            return Err(StoreError::DuplicateId(item.id));
        }

        if vector.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.len(),
            });
        }

        let vector = Embedding::new(vector);
        if !vector.is_finite() {
            return Err(StoreError::NonFiniteVector(item.id));
        }

        self.positions.insert(item.id.clone(), self.entries.len());
        self.entries.push(StoredItem { item, vector });
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Option<&KnowledgeItem> {
        self.positions.get(id).map(|&i| &self.entries[i].item)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn query(
        &self,
        embedding: &[f32],
        filter: &RetrievalFilter,
        top_k: usize,
    ) -> Result<RetrievalResult, StoreError> {
        if top_k == 0 {
            return Err(StoreError::InvalidTopK(top_k));
        }

        if embedding.len() != self.dimension {
            return Err(StoreError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.len(),
            });
        }

        let query = Embedding::new(embedding.to_vec());

        let mut hits: Vec<RetrievalHit> = self
            .entries
            .iter()
            .filter(|entry| filter.matches(&entry.item.metadata))
            .map(|entry| RetrievalHit {
                id: entry.item.id.clone(),
                metadata: entry.item.metadata.clone(),
                text: entry.item.text.clone(),
                distance: query.cosine_distance(&entry.vector),
            })
            .collect();

        // Stable sort keeps indexing order between equal distances
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        Ok(RetrievalResult::new(hits))
    }

    async fn get(&self, filter: &RetrievalFilter) -> Result<Vec<KnowledgeItem>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| filter.matches(&entry.item.metadata))
            .map(|entry| entry.item.clone())
            .collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn count(&self) -> usize {
        self.entries.len()
    }
}
