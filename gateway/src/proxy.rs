//! Upstream forwarding.
//!
//! Routing tables live outside this component; every request that
//! clears the verification stage goes to the single configured upstream
//! with method, path, query, headers and body intact. The Authorization
//! header passes through so downstream services can read the caller's
//! identity themselves, and the upstream response is relayed back
//! unmodified.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::GatewayState;

/// Bodies are buffered before forwarding; larger payloads are refused.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Upstream call failed: {0}")]
    Upstream(String),
}

/// Forward the request to the configured upstream and relay the response.
pub async fn forward(State(state): State<GatewayState>, request: Request) -> Response {
    match relay(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!("Forwarding failed: {}", err);
            StatusCode::BAD_GATEWAY.into_response()
        }
    }
}

async fn relay(state: &GatewayState, request: Request) -> Result<Response, ProxyError> {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = format!(
        "{}{}",
        state.config.upstream_url.trim_end_matches('/'),
        path_and_query
    );

    let body = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| ProxyError::Body(e.to_string()))?;

    let mut upstream_request = state.client.request(parts.method, &url).body(body);
    for (name, value) in parts.headers.iter() {
        if !is_connection_scoped(name) {
            upstream_request = upstream_request.header(name, value);
        }
    }

    let upstream_response = upstream_request
        .send()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let status = upstream_response.status();
    let headers = upstream_response.headers().clone();
    let bytes = upstream_response
        .bytes()
        .await
        .map_err(|e| ProxyError::Upstream(e.to_string()))?;

    let mut response = Response::builder().status(status);
    for (name, value) in headers.iter() {
        if !is_connection_scoped(name) {
            response = response.header(name, value);
        }
    }
    response
        .body(Body::from(bytes))
        .map_err(|e| ProxyError::Upstream(e.to_string()))
}

/// Hop-by-hop headers must not be relayed. `Host` and `Content-Length`
/// are excluded too; the client derives them from the upstream URL and
/// the buffered body.
fn is_connection_scoped(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
            | "host"
            | "content-length"
    )
}
