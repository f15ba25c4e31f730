// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Unranked artwork listing, optionally restricted to one zone

use serde::Serialize;

use super::errors::ChatError;
use crate::rag::{ItemMetadata, RetrievalEngine, RetrievalFilter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkSummary {
    pub id: String,
    pub metadata: ItemMetadata,
    /// Item text up to the first `|`
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkListing {
    pub count: usize,
    pub results: Vec<ArtworkSummary>,
}

pub async fn list_artworks(
    retrieval: &RetrievalEngine,
    zone: Option<&str>,
) -> Result<ArtworkListing, ChatError> {
    let filter = RetrievalFilter::artworks().with_zone(zone);
    let items = retrieval.list(&filter).await?;

    let results: Vec<ArtworkSummary> = items
        .into_iter()
        .map(|item| ArtworkSummary {
            snippet: item.snippet().to_string(),
            id: item.id,
            metadata: item.metadata,
        })
        .collect();

    Ok(ArtworkListing {
        count: results.len(),
        results,
    })
}
