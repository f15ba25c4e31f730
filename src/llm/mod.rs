// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// LLM gateway module
// Outbound chat completion call with timeout, typed failures and optional retry

pub mod client;
pub mod errors;
pub mod retry;

pub use client::{ChatCompletionsGateway, CompletionGateway};
pub use errors::{GatewayError, UNKNOWN_UPSTREAM_DETAIL};
pub use retry::RetryPolicy;

#[cfg(test)]
pub use client::MockCompletionGateway;
