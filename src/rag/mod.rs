// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// RAG (Retrieval-Augmented Generation) module
// Knowledge items, in-memory vector store, retrieval and context assembly

pub mod catalog;
pub mod context;
pub mod errors;
pub mod knowledge;
pub mod knowledge_store;
pub mod retrieval;
pub mod vector_loader;

pub use catalog::mac_catalog;
pub use context::assemble_context;
pub use errors::StoreError;
pub use knowledge::{
    FieldConstraint, ItemKind, ItemMetadata, KnowledgeItem, MetadataValue, RetrievalFilter,
};
pub use knowledge_store::{InMemoryVectorStore, RetrievalHit, RetrievalResult, VectorStore};
pub use retrieval::RetrievalEngine;
pub use vector_loader::{build_store, load_items, parse_snapshot};
