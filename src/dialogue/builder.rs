// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt message construction
//!
//! Output shape: one system message (persona with rendered context), then the
//! bounded history in original order, then the current user message last.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::history::{ConversationHistory, ConversationTurn, Role};
use super::persona::PersonaTemplate;
use crate::config::DEFAULT_MAX_HISTORY_TURNS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogueBuilder {
    persona: PersonaTemplate,
    max_history_turns: usize,
}

impl Default for DialogueBuilder {
    fn default() -> Self {
        Self::new(PersonaTemplate::default(), DEFAULT_MAX_HISTORY_TURNS)
    }
}

impl DialogueBuilder {
    pub fn new(persona: PersonaTemplate, max_history_turns: usize) -> Self {
        Self {
            persona,
            max_history_turns,
        }
    }

    pub fn persona(&self) -> PersonaTemplate {
        self.persona
    }

    pub fn build_messages(
        &self,
        context: &str,
        history: &ConversationHistory,
        user_message: &str,
    ) -> Vec<PromptMessage> {
        // Caller-supplied system turns would compete with the persona
        let mut kept: Vec<&ConversationTurn> = history
            .turns()
            .iter()
            .filter(|turn| turn.role != Role::System)
            .collect();

        if kept.len() > self.max_history_turns {
            kept.drain(..kept.len() - self.max_history_turns);
        }

        if kept
            .last()
            .is_some_and(|turn| turn.role == Role::User && turn.content == user_message)
        {
            kept.pop();
        }

        let mut messages = Vec::with_capacity(kept.len() + 2);
        messages.push(PromptMessage::new(Role::System, self.persona.render(context)));
        messages.extend(
            kept.into_iter()
                .map(|turn| PromptMessage::new(turn.role, turn.content.clone())),
        );
        messages.push(PromptMessage::new(Role::User, user_message));

        debug!(
            "Built {} prompt messages with {} persona (history: {} of {})",
            messages.len(),
            self.persona,
            messages.len() - 2,
            history.len()
        );

        messages
    }
}
