// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Knowledge base records and metadata filters
//!
//! Metadata keeps the original flat JSON shape (`tipo`, `zona`, `artista`,
//! free-form keys) on the wire, but the discriminant and the well-known keys
//! are typed fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::errors::StoreError;

/// Discriminant of a knowledge item (`tipo`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Exhibition zone description
    Zona,
    /// Individual artwork
    Obra,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Zona => "zona",
            ItemKind::Obra => "obra",
        }
    }
}

/// Scalar metadata value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetadataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::Bool(v) => write!(f, "{}", v),
            MetadataValue::Integer(v) => write!(f, "{}", v),
            MetadataValue::Float(v) => write!(f, "{}", v),
            MetadataValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        MetadataValue::Text(value.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        MetadataValue::Text(value)
    }
}

/// Item metadata: typed discriminant plus an open set of scalar attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(rename = "tipo")]
    pub kind: ItemKind,
    #[serde(rename = "zona", default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(rename = "artista", default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, MetadataValue>,
}

impl ItemMetadata {
    pub fn zone(name: impl Into<String>) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("nombre".to_string(), MetadataValue::Text(name.into()));
        Self {
            kind: ItemKind::Zona,
            zone: None,
            artist: None,
            attributes,
        }
    }

    pub fn artwork(zone: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            kind: ItemKind::Obra,
            zone: Some(zone.into()),
            artist: Some(artist.into()),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up a metadata key by its wire name
    pub fn get(&self, key: &str) -> Option<MetadataValue> {
        match key {
            "tipo" => Some(MetadataValue::from(self.kind.as_str())),
            "zona" => self.zone.clone().map(MetadataValue::Text),
            "artista" => self.artist.clone().map(MetadataValue::Text),
            other => self.attributes.get(other).cloned(),
        }
    }

    /// Artworks must name their zone and artist
    pub fn validate(&self) -> Result<(), String> {
        if self.kind == ItemKind::Obra {
            if self.zone.as_deref().map_or(true, |z| z.trim().is_empty()) {
                return Err("artwork metadata requires 'zona'".to_string());
            }
            if self.artist.as_deref().map_or(true, |a| a.trim().is_empty()) {
                return Err("artwork metadata requires 'artista'".to_string());
            }
        }
        Ok(())
    }
}

/// One indexed fact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub text: String,
    pub metadata: ItemMetadata,
}

impl KnowledgeItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, metadata: ItemMetadata) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata,
        }
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.id.trim().is_empty() {
            return Err(StoreError::InvalidItem {
                id: self.id.clone(),
                reason: "id cannot be empty".to_string(),
            });
        }
        self.metadata
            .validate()
            .map_err(|reason| StoreError::InvalidItem {
                id: self.id.clone(),
                reason,
            })
    }

    /// Text up to the first `|` delimiter, trimmed
    pub fn snippet(&self) -> &str {
        self.text.split('|').next().unwrap_or_default().trim()
    }
}

/// Equality constraint on one metadata key
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConstraint {
    pub key: String,
    pub value: MetadataValue,
}

/// Conjunctive equality filter over metadata
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetrievalFilter {
    constraints: Vec<FieldConstraint>,
}

impl RetrievalFilter {
    /// Matches everything
    pub fn any() -> Self {
        Self::default()
    }

    /// `tipo = "obra"`
    pub fn artworks() -> Self {
        Self::any().with("tipo", ItemKind::Obra.as_str())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        self.constraints.push(FieldConstraint {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Adds `zona = <zone>` when a zone is given
    pub fn with_zone(self, zone: Option<&str>) -> Self {
        match zone.map(str::trim).filter(|z| !z.is_empty()) {
            Some(zone) => self.with("zona", zone),
            None => self,
        }
    }

    pub fn constraints(&self) -> &[FieldConstraint] {
        &self.constraints
    }

    pub fn matches(&self, metadata: &ItemMetadata) -> bool {
        self.constraints
            .iter()
            .all(|c| metadata.get(&c.key).as_ref() == Some(&c.value))
    }
}
