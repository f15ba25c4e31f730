// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Knowledge base snapshots loaded from disk

use mac_arti::embeddings::HashEmbeddingEncoder;
use mac_arti::rag::{build_store, load_items, RetrievalFilter, StoreError, VectorStore};
use serde_json::json;
use std::io::Write;

fn write_snapshot(value: serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_indexed_and_filterable() {
    let file = write_snapshot(json!([
        {"id": "zona-norte", "text": "Zona Norte: fotografía", "metadata": {"tipo": "zona", "nombre": "Norte"}},
        {"id": "obra-a", "text": "Obra: A | Artista: Uno", "metadata": {"tipo": "obra", "zona": "Norte", "artista": "Uno", "año": 1999}},
        {"id": "obra-b", "text": "Obra: B | Artista: Dos", "metadata": {"tipo": "obra", "zona": "Sur", "artista": "Dos"}}
    ]));

    let encoder = HashEmbeddingEncoder::new(32).unwrap();
    let items = load_items(Some(file.path())).await.unwrap();
    let store = build_store(&encoder, items).await.unwrap();
    assert_eq!(store.count(), 3);

    let norte = store
        .get(&RetrievalFilter::artworks().with_zone(Some("Norte")))
        .await
        .unwrap();
    assert_eq!(norte.len(), 1);
    assert_eq!(norte[0].id, "obra-a");
    assert_eq!(norte[0].snippet(), "Obra: A");
}

#[tokio::test]
async fn test_snapshot_rejects_artwork_without_artist() {
    let file = write_snapshot(json!([
        {"id": "obra-x", "text": "Obra X", "metadata": {"tipo": "obra", "zona": "Centro"}}
    ]));

    let encoder = HashEmbeddingEncoder::new(32).unwrap();
    let items = load_items(Some(file.path())).await.unwrap();
    let err = build_store(&encoder, items).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidItem { .. }));
}

#[tokio::test]
async fn test_snapshot_rejects_duplicate_ids() {
    let item = json!({"id": "obra-x", "text": "Obra X", "metadata": {"tipo": "obra", "zona": "Centro", "artista": "X"}});
    let file = write_snapshot(json!([item.clone(), item]));

    let encoder = HashEmbeddingEncoder::new(32).unwrap();
    let items = load_items(Some(file.path())).await.unwrap();
    assert!(matches!(
        build_store(&encoder, items).await,
        Err(StoreError::DuplicateId(_))
    ));
}

#[tokio::test]
async fn test_snapshot_not_an_array() {
    let file = write_snapshot(json!({"items": []}));
    assert!(matches!(
        load_items(Some(file.path())).await,
        Err(StoreError::SnapshotParse(_))
    ));
}
