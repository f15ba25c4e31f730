// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API endpoint

pub mod handler;
pub mod request;

pub use handler::chat_handler;
pub use request::{ChatApiRequest, MAX_MESSAGE_CHARS};
