// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API request types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dialogue::ConversationHistory;
use crate::pipeline::ChatQuery;

/// Longest accepted visitor message, in characters
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Request body for POST /chat
///
/// camelCase field names; the snake_case names of the first museum frontend
/// are accepted as aliases.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatApiRequest {
    pub message: String,

    /// Raw `{role, content}` entries; malformed ones are dropped later
    #[serde(default, alias = "message_history")]
    pub history: Option<Vec<Value>>,

    #[serde(default, alias = "zona_filter", skip_serializing_if = "Option::is_none")]
    pub zone_filter: Option<String>,

    #[serde(default, alias = "max_results", skip_serializing_if = "Option::is_none")]
    pub max_results: Option<i64>,
}

impl ChatApiRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.message.trim().is_empty() {
            return Err("message cannot be empty".to_string());
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!(
                "message too long (max {} characters)",
                MAX_MESSAGE_CHARS
            ));
        }
        if let Some(n) = self.max_results {
            if n < 1 {
                return Err("maxResults must be at least 1".to_string());
            }
        }
        Ok(())
    }

    /// Converts a validated request into a pipeline query
    pub fn into_query(self) -> ChatQuery {
        let history = self
            .history
            .as_deref()
            .map(ConversationHistory::from_values)
            .unwrap_or_default();

        ChatQuery {
            message: self.message,
            history,
            zone_filter: self.zone_filter,
            max_results: self.max_results.map(|n| n.max(0) as usize),
        }
    }
}
