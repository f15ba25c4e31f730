// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reply used when retrieval finds nothing; the LLM is not called

pub const FALLBACK_RESPONSE: &str =
    "No encuentro información relevante. ¿Quieres buscar algo más específico? 🔍";

pub const FALLBACK_SUGGESTIONS: &[&str] = &["Listar todas las obras", "Ver zonas del museo"];

pub fn fallback_suggestions() -> Vec<String> {
    FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
}
