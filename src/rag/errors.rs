// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the knowledge store
//!
//! Covers the store boundary: item validation when indexing, vector shape
//! checks, and knowledge snapshot loading.

use thiserror::Error;

/// Errors raised while building or querying the knowledge store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Item failed metadata or id validation
    #[error("Invalid knowledge item '{id}': {reason}")]
    InvalidItem { id: String, reason: String },

    /// Two items share one id
    #[error("Duplicate knowledge item id: {0}")]
    DuplicateId(String),

    /// Vector length differs from the store's fixed dimension
    #[error("Dimension mismatch: expected {expected}D, got {actual}D")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Vector contains NaN or infinite values
    #[error("Invalid vector for '{0}': contains NaN or Infinity")]
    NonFiniteVector(String),

    /// top-k must be at least 1
    #[error("Invalid top-k: {0} (must be at least 1)")]
    InvalidTopK(usize),

    /// Knowledge snapshot could not be parsed
    #[error("Failed to parse knowledge snapshot: {0}")]
    SnapshotParse(String),

    /// Encoder failed while indexing or querying
    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        StoreError::Encoding(err.to_string())
    }
}

impl StoreError {
    /// Get error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::InvalidItem { .. } => "INVALID_ITEM",
            StoreError::DuplicateId(_) => "DUPLICATE_ID",
            StoreError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            StoreError::NonFiniteVector(_) => "NON_FINITE_VECTOR",
            StoreError::InvalidTopK(_) => "INVALID_TOP_K",
            StoreError::SnapshotParse(_) => "SNAPSHOT_PARSE_ERROR",
            StoreError::Encoding(_) => "ENCODING_FAILED",
            StoreError::Io(_) => "IO_ERROR",
        }
    }
}
