// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Declarative media rules
//!
//! Entity keys are lowercase substrings; patterns are case-insensitive regular
//! expressions. Both tables are scanned in order and their order is the order
//! in which references are reported.

use serde::{Deserialize, Serialize};

/// Pointer to supplementary visual material surfaced next to an answer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaReference {
    pub kind: String,
    pub asset_id: String,
    pub label: String,
}

/// Static form of a [`MediaReference`] used in rule tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaAsset {
    pub kind: &'static str,
    pub asset_id: &'static str,
    pub label: &'static str,
}

impl MediaAsset {
    pub fn to_reference(&self) -> MediaReference {
        MediaReference {
            kind: self.kind.to_string(),
            asset_id: self.asset_id.to_string(),
            label: self.label.to_string(),
        }
    }
}

pub const BRYCE_WORK: MediaAsset = MediaAsset {
    kind: "obra",
    asset_id: "obra-bryce",
    label: "El mundo en llamas",
};

pub const FLORES_WORK: MediaAsset = MediaAsset {
    kind: "obra",
    asset_id: "obra-flores",
    label: "Shao Kené 5",
};

pub const LOPEZ_ANTAY_WORK: MediaAsset = MediaAsset {
    kind: "obra",
    asset_id: "obra-lopez-antay",
    label: "Retablo Ayacuchano",
};

pub const EIELSON_WORK: MediaAsset = MediaAsset {
    kind: "obra",
    asset_id: "obra-eielson",
    label: "Vertical celeste",
};

pub const MUSEUM_MAP: MediaAsset = MediaAsset {
    kind: "mapa",
    asset_id: "mapa-sala-permanente",
    label: "Mapa de la Sala Permanente",
};

pub const USAGE_GUIDE: MediaAsset = MediaAsset {
    kind: "guia",
    asset_id: "guia-de-uso",
    label: "Cómo usar a Arti",
};

/// Exact-match entities: lowercase key → asset
pub const ENTITY_TABLE: &[(&str, MediaAsset)] = &[
    ("fernando bryce", BRYCE_WORK),
    ("bryce", BRYCE_WORK),
    ("el mundo en llamas", BRYCE_WORK),
    ("sara flores", FLORES_WORK),
    ("shao kené", FLORES_WORK),
    ("shao kene", FLORES_WORK),
    ("joaquín lópez antay", LOPEZ_ANTAY_WORK),
    ("joaquin lopez antay", LOPEZ_ANTAY_WORK),
    ("lópez antay", LOPEZ_ANTAY_WORK),
    ("lopez antay", LOPEZ_ANTAY_WORK),
    ("retablo ayacuchano", LOPEZ_ANTAY_WORK),
    ("jorge eduardo eielson", EIELSON_WORK),
    ("eielson", EIELSON_WORK),
    ("vertical celeste", EIELSON_WORK),
    ("map", MUSEUM_MAP),
    ("label", USAGE_GUIDE),
];

const WORK_WORDS: &str = r"(obra|pintura|escultura|instalaci[oó]n|work|painting|sculpture)";

/// Regex rules: pattern source → asset
pub fn pattern_table() -> Vec<(String, MediaAsset)> {
    vec![
        (format!(r"{}.*\bbryce\b", WORK_WORDS), BRYCE_WORK),
        (format!(r"{}.*\bflores\b", WORK_WORDS), FLORES_WORK),
        (format!(r"{}.*\b(l[oó]pez\s+)?antay\b", WORK_WORDS), LOPEZ_ANTAY_WORK),
        (format!(r"{}.*\beielson\b", WORK_WORDS), EIELSON_WORK),
        (
            r"(mapa|map|ubicaci[oó]n|location|d[oó]nde|where|sala|room).*(museo|museum)"
                .to_string(),
            MUSEUM_MAP,
        ),
    ]
}
