// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod chat;
pub mod errors;
pub mod handlers;
pub mod http_server;

pub use chat::{chat_handler, ChatApiRequest};
pub use errors::{ApiErrorResponse, ErrorResponse};
pub use handlers::{HealthResponse, ListingParams};
pub use http_server::{create_router, start_server, AppState};
