// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chat API endpoint handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{debug, error, warn};

use super::request::ChatApiRequest;
use crate::api::errors::ApiErrorResponse;
use crate::api::http_server::AppState;
use crate::pipeline::{ChatError, ChatReply};

/// POST /chat - Answer a visitor question about the collection
///
/// # Request
/// - `message`: Visitor question (required)
/// - `history`: Previous `{role, content}` turns (alias `message_history`)
/// - `zoneFilter`: Restrict retrieval to one zone (alias `zona_filter`)
/// - `maxResults`: Number of artworks to retrieve (alias `max_results`)
///
/// # Response
/// - `response`, `relevantItems`, `mediaReferences` on an answer
/// - `response`, `suggestions` when nothing relevant was found
///
/// # Errors
/// - 400 Bad Request: Invalid body or parameters
/// - 401 Unauthorized: Completion API key not configured
/// - 502 Bad Gateway: Completion service unreachable
/// - upstream status: Completion service rejected the request
/// - 500 Internal Server Error: Anything else
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: Result<Json<ChatApiRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiErrorResponse> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected chat body: {}", rejection.body_text());
        ApiErrorResponse(ChatError::InvalidRequest(rejection.body_text()))
    })?;

    if let Err(e) = request.validate() {
        warn!("Chat validation failed: {}", e);
        return Err(ApiErrorResponse(ChatError::InvalidRequest(e)));
    }

    debug!("Chat request: {:?}", request.message);

    state
        .pipeline
        .handle(request.into_query())
        .await
        .map(Json)
        .map_err(|e| {
            match &e {
                ChatError::UpstreamError { status, detail } => {
                    error!("Completion service error {}: {}", status, detail)
                }
                ChatError::MalformedUpstreamResponse(_) | ChatError::Internal(_) => {
                    error!("Chat request failed: {}", e)
                }
                _ => warn!("Chat request failed: {}", e),
            }
            ApiErrorResponse(e)
        })
}
