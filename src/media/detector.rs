// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Post-hoc media detection over a question/answer pair

use regex::{Regex, RegexBuilder};
use tracing::debug;

use super::rules::{pattern_table, MediaAsset, MediaReference, ENTITY_TABLE};

pub struct MediaDetector {
    entities: Vec<(&'static str, MediaAsset)>,
    patterns: Vec<(Regex, MediaAsset)>,
}

impl MediaDetector {
    /// Compiles the built-in rule tables
    pub fn new() -> Result<Self, regex::Error> {
        Self::with_rules(ENTITY_TABLE.to_vec(), pattern_table())
    }

    pub fn with_rules(
        entities: Vec<(&'static str, MediaAsset)>,
        patterns: Vec<(String, MediaAsset)>,
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .into_iter()
            .map(|(source, asset)| {
                RegexBuilder::new(&source)
                    .case_insensitive(true)
                    .dot_matches_new_line(true)
                    .build()
                    .map(|regex| (regex, asset))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entities, patterns })
    }

    /// References for every entity or pattern found in the user message plus
    /// reply, without duplicates, in discovery order
    pub fn detect_media(&self, user_message: &str, assistant_reply: &str) -> Vec<MediaReference> {
        let text = format!("{} {}", user_message, assistant_reply).to_lowercase();

        let entity_hits = self
            .entities
            .iter()
            .filter(|(key, _)| text.contains(key))
            .map(|(_, asset)| asset);
        let pattern_hits = self
            .patterns
            .iter()
            .filter(|(regex, _)| regex.is_match(&text))
            .map(|(_, asset)| asset);

        let mut references: Vec<MediaReference> = Vec::new();
        for asset in entity_hits.chain(pattern_hits) {
            let reference = asset.to_reference();
            if !references.contains(&reference) {
                references.push(reference);
            }
        }

        debug!("Detected {} media references", references.len());
        references
    }
}
