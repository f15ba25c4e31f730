// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Filtered nearest-neighbor retrieval over the built-in catalog

use mac_arti::embeddings::{EmbeddingEncoder, HashEmbeddingEncoder};
use mac_arti::rag::{
    assemble_context, build_store, mac_catalog, ItemKind, RetrievalEngine, RetrievalFilter,
    VectorStore,
};
use std::sync::Arc;

const ZONES: [&str; 4] = [
    "IAC",
    "Radicalidad y resistencia",
    "Referente y Postmodernidad",
    "Centro",
];

async fn engine() -> RetrievalEngine {
    let encoder = Arc::new(HashEmbeddingEncoder::new(384).unwrap());
    let store = build_store(encoder.as_ref(), mac_catalog()).await.unwrap();
    RetrievalEngine::new(encoder, Arc::new(store)).unwrap()
}

#[tokio::test]
async fn test_every_hit_satisfies_filter() {
    let engine = engine().await;
    let queries = ["obra", "instalación con luz", "pigmentos naturales", "Ayacucho"];

    for zone in ZONES {
        let filter = RetrievalFilter::artworks().with_zone(Some(zone));
        for query in queries {
            let result = engine.retrieve(query, &filter, 4).await.unwrap();
            for hit in result.iter() {
                assert_eq!(hit.metadata.kind, ItemKind::Obra);
                assert_eq!(hit.metadata.zone.as_deref(), Some(zone));
            }
        }
    }
}

#[tokio::test]
async fn test_result_never_exceeds_top_k() {
    let engine = engine().await;
    for top_k in 1..=6 {
        let result = engine
            .retrieve("arte contemporáneo", &RetrievalFilter::any(), top_k)
            .await
            .unwrap();
        assert_eq!(result.len(), top_k.min(8));
    }
}

#[tokio::test]
async fn test_ranking_is_ascending_by_distance() {
    let engine = engine().await;
    let result = engine
        .retrieve("Retablo Ayacuchano escultura en madera", &RetrievalFilter::any(), 8)
        .await
        .unwrap();
    assert_eq!(result.hits()[0].id, "obra-lopez-antay");
    for pair in result.hits().windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
}

#[tokio::test]
async fn test_query_dimension_matches_store() {
    let encoder = HashEmbeddingEncoder::new(64).unwrap();
    let store = build_store(&encoder, mac_catalog()).await.unwrap();
    let query = encoder.encode(&["hola".to_string()]).await.unwrap();
    assert_eq!(query[0].len(), store.dimension());
}

#[tokio::test]
async fn test_context_follows_ranking() {
    let engine = engine().await;
    let result = engine
        .retrieve("Shao Kené Sara Flores", &RetrievalFilter::artworks(), 2)
        .await
        .unwrap();
    let context = assemble_context(&result);
    let lines: Vec<&str> = context.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("- Obra: Shao Kené 5"));
    assert_eq!(lines[1], format!("- {}", result.hits()[1].text));
}
