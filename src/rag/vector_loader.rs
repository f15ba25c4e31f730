// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Startup indexing of the knowledge base
//!
//! Encodes every item with the encoder that will also serve queries, so the
//! store's dimension always equals the query dimension.

use std::path::Path;
use std::time::Instant;
use tracing::info;

use super::catalog::mac_catalog;
use super::errors::StoreError;
use super::knowledge::KnowledgeItem;
use super::knowledge_store::{InMemoryVectorStore, VectorStore};
use crate::embeddings::EmbeddingEncoder;

/// Items encoded per encoder call
const INDEX_BATCH_SIZE: usize = 32;

/// Parses a JSON array of `{id, text, metadata}` items
pub fn parse_snapshot(json: &str) -> Result<Vec<KnowledgeItem>, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::SnapshotParse(e.to_string()))
}

/// Reads knowledge items from `path`, or the built-in catalog when `None`
pub async fn load_items(path: Option<&Path>) -> Result<Vec<KnowledgeItem>, StoreError> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await?;
            let items = parse_snapshot(&json)?;
            info!("Read {} knowledge items from {}", items.len(), path.display());
            Ok(items)
        }
        None => Ok(mac_catalog()),
    }
}

/// Encodes and indexes `items` into a new store
pub async fn build_store(
    encoder: &dyn EmbeddingEncoder,
    items: Vec<KnowledgeItem>,
) -> Result<InMemoryVectorStore, StoreError> {
    let start = Instant::now();
    let mut store = InMemoryVectorStore::new(encoder.dimension());

    for batch in items.chunks(INDEX_BATCH_SIZE) {
        let texts: Vec<String> = batch.iter().map(|item| item.text.clone()).collect();
        let vectors = encoder.encode(&texts).await?;
        if vectors.len() != batch.len() {
            return Err(StoreError::Encoding(format!(
                "encoder returned {} vectors for {} texts",
                vectors.len(),
                batch.len()
            )));
        }
        for (item, vector) in batch.iter().cloned().zip(vectors) {
            store.insert(item, vector)?;
        }
    }

    info!(
        "Indexed {} knowledge items with {} ({}D) in {}ms",
        store.count(),
        encoder.model_name(),
        encoder.dimension(),
        start.elapsed().as_millis()
    );

    Ok(store)
}
