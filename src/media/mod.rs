// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Media module
// Entity and pattern detection producing media references for chat answers

pub mod detector;
pub mod rules;

pub use detector::MediaDetector;
pub use rules::{MediaAsset, MediaReference, ENTITY_TABLE};
