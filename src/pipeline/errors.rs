// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error taxonomy of a chat request and its HTTP status mapping

use thiserror::Error;

use crate::llm::GatewayError;
use crate::rag::StoreError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Ocurrió un error interno. Por favor intenta nuevamente.";
pub const UPSTREAM_ERROR_MESSAGE: &str = "Error en el servicio de IA. Por favor intenta nuevamente.";
pub const UNAVAILABLE_MESSAGE: &str = "Error temporal del servicio. Por favor intenta nuevamente.";
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key no configurada";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChatError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Completion API key not configured")]
    MissingCredential,

    #[error("Completion service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Upstream status and detail; the detail is logged, never returned
    #[error("Completion service error {status}: {detail}")]
    UpstreamError { status: u16, detail: String },

    #[error("Malformed completion response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    /// HTTP status for the error body
    pub fn status_code(&self) -> u16 {
        match self {
            ChatError::InvalidRequest(_) => 400,
            ChatError::MissingCredential => 401,
            ChatError::UpstreamUnavailable(_) => 502,
            ChatError::UpstreamError { status, .. } if (400..=599).contains(status) => *status,
            ChatError::UpstreamError { .. } => 502,
            ChatError::MalformedUpstreamResponse(_) | ChatError::Internal(_) => 500,
        }
    }

    /// Message safe to show to visitors
    pub fn user_message(&self) -> String {
        match self {
            ChatError::InvalidRequest(msg) => msg.clone(),
            ChatError::MissingCredential => MISSING_CREDENTIAL_MESSAGE.to_string(),
            ChatError::UpstreamUnavailable(_) => UNAVAILABLE_MESSAGE.to_string(),
            ChatError::UpstreamError { .. } => UPSTREAM_ERROR_MESSAGE.to_string(),
            ChatError::MalformedUpstreamResponse(_) | ChatError::Internal(_) => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::InvalidRequest(_) => "invalid_request",
            ChatError::MissingCredential => "missing_credential",
            ChatError::UpstreamUnavailable(_) => "upstream_unavailable",
            ChatError::UpstreamError { .. } => "upstream_error",
            ChatError::MalformedUpstreamResponse(_) => "malformed_upstream_response",
            ChatError::Internal(_) => "internal_error",
        }
    }
}

impl From<GatewayError> for ChatError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::MissingCredential => ChatError::MissingCredential,
            GatewayError::UpstreamUnavailable(msg) => ChatError::UpstreamUnavailable(msg),
            GatewayError::UpstreamError { status, detail } => {
                ChatError::UpstreamError { status, detail }
            }
            GatewayError::MalformedUpstreamResponse(msg) => {
                ChatError::MalformedUpstreamResponse(msg)
            }
            GatewayError::Internal(msg) => ChatError::Internal(msg),
        }
    }
}

impl From<StoreError> for ChatError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidTopK(k) => {
                ChatError::InvalidRequest(format!("maxResults must be at least 1, got {}", k))
            }
            other => ChatError::Internal(other.to_string()),
        }
    }
}
