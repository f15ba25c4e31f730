// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Failures of the outbound completion call

use thiserror::Error;

/// Detail used when an error body carries no `error.message`
pub const UNKNOWN_UPSTREAM_DETAIL: &str = "Error desconocido de la API";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// No credential configured; raised before any network activity
    #[error("API key not configured")]
    MissingCredential,

    /// Connection failure or timeout
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream answered with a non-success status
    #[error("Upstream error {status}: {detail}")]
    UpstreamError { status: u16, detail: String },

    /// Success status but the body lacks `choices[0].message.content`
    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Internal gateway error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::MissingCredential => "MISSING_CREDENTIAL",
            GatewayError::UpstreamUnavailable(_) => "UPSTREAM_UNAVAILABLE",
            GatewayError::UpstreamError { .. } => "UPSTREAM_ERROR",
            GatewayError::MalformedUpstreamResponse(_) => "MALFORMED_UPSTREAM_RESPONSE",
            GatewayError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Only transport failures are retried
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::UpstreamUnavailable(_))
    }
}
