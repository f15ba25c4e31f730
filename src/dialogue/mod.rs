// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Dialogue module
// Persona templates, history validation and prompt message construction

pub mod builder;
pub mod fallback;
pub mod history;
pub mod persona;

pub use builder::{DialogueBuilder, PromptMessage};
pub use fallback::{fallback_suggestions, FALLBACK_RESPONSE, FALLBACK_SUGGESTIONS};
pub use history::{ConversationHistory, ConversationTurn, Role};
pub use persona::{PersonaTemplate, USAGE_KEYWORD, ZONE_MAP_LEGEND};
