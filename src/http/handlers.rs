//! Axum HTTP handlers for the web server

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::mcp::context::{TransportContext, TransportKind};
use crate::mcp::rpc::{json_rpc_error, INVALID_REQUEST, PARSE_ERROR};
use crate::AppState;

pub const PROTOCOL_VERSION_HEADER: &str = "mcp-protocol-version";

/// Protocol revisions that dropped JSON-RPC batching.
const BATCHLESS_PROTOCOL_VERSIONS: [&str; 1] = ["2025-06-18"];

/// Each request gets its own transport context, opened before the body is read so that a
/// client hanging up mid-request still releases it. Responses are plain JSON bodies; no
/// session is issued and nothing is streamed.
pub async fn mcp_endpoint(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Response {
    let mut context = TransportContext::open(state, TransportKind::Http);

    let payload: Value = match to_bytes(body, usize::MAX)
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    {
        Some(value) => value,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json_rpc_error(None, PARSE_ERROR, "Parse error")),
            )
                .into_response()
        }
    };

    if let Some(batch) = payload.as_array() {
        if batch.is_empty() || batching_disabled(&headers) {
            debug!(size = batch.len(), "rejecting json-rpc batch");
            return (
                StatusCode::BAD_REQUEST,
                Json(json_rpc_error(None, INVALID_REQUEST, "Invalid Request")),
            )
                .into_response();
        }

        let mut responses = Vec::new();
        for item in batch {
            if let Some(response) = context.dispatch(item.clone()).await {
                responses.push(response);
            }
        }

        if responses.is_empty() {
            return StatusCode::ACCEPTED.into_response();
        }

        return (StatusCode::OK, Json(Value::Array(responses))).into_response();
    }

    match context.dispatch(payload).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn batching_disabled(headers: &HeaderMap) -> bool {
    headers
        .get(PROTOCOL_VERSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .is_some_and(|version| BATCHLESS_PROTOCOL_VERSIONS.contains(&version))
}
