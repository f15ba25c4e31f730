// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use super::errors::ApiErrorResponse;
use super::http_server::AppState;
use crate::pipeline::{list_artworks, ArtworkListing};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingParams {
    /// Zone name; `zoneFilter` is accepted too
    #[serde(alias = "zoneFilter")]
    pub zona: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub features: Vec<String>,
    pub knowledge_items: usize,
    pub embedding_dimension: usize,
}

/// GET /obras - Artworks in indexing order, optionally for one zone
pub async fn list_artworks_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ArtworkListing>, ApiErrorResponse> {
    list_artworks(state.pipeline.retrieval(), params.zona.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            error!("Failed to list artworks: {}", e);
            ApiErrorResponse(e)
        })
}

/// GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.pipeline.retrieval().store();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        features: crate::version::FEATURES.iter().map(|f| f.to_string()).collect(),
        knowledge_items: store.count(),
        embedding_dimension: store.dimension(),
    })
}
