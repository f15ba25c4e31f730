// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Renders retrieved items into the context block of the system prompt

use super::knowledge_store::RetrievalResult;

/// One `- <text>` line per item in ranking order
///
/// Item text is inserted verbatim. Callers are expected to short-circuit on an
/// empty result before building a prompt.
pub fn assemble_context(result: &RetrievalResult) -> String {
    result
        .iter()
        .map(|hit| format!("- {}", hit.text))
        .collect::<Vec<_>>()
        .join("\n")
}
