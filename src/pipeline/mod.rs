// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Chat pipeline module
// Request orchestration, reply shapes, artwork listing and the error taxonomy

pub mod bootstrap;
pub mod chat;
pub mod errors;
pub mod listing;

pub use bootstrap::{build_pipeline, build_pipeline_with_gateway};
pub use chat::{ChatAnswer, ChatPipeline, ChatQuery, ChatReply, FallbackReply, RelevantItem};
pub use errors::ChatError;
pub use listing::{list_artworks, ArtworkListing, ArtworkSummary};
