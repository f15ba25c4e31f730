// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the MAC Arti service

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-arti-rag-2025-10-20";

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Build date
pub const BUILD_DATE: &str = "2025-10-20";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "semantic-retrieval",
    "zone-filter",
    "persona-templates",
    "bounded-history",
    "media-references",
    "deepseek-chat",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("MAC Arti {} ({})", VERSION_NUMBER, BUILD_DATE)
}
