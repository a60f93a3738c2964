//! Gateway library.
//!
//! The request pipeline is composed here as an explicitly ordered stack
//! of stages: token verification wraps everything else, so no request
//! reaches tracing or the forwarder without clearing it first.

pub mod config;
pub mod proxy;
pub mod verifier;

pub use config::{GatewayConfig, ValidationMode};
pub use verifier::TokenVerifier;

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use error::ErrorResponse;

/// Shared gateway state. Read-only after construction; request handlers
/// run concurrently without coordination.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub verifier: Arc<TokenVerifier>,
    /// Client used for forwarding to the upstream.
    pub client: reqwest::Client,
}

impl GatewayState {
    pub fn new(config: GatewayConfig) -> anyhow::Result<Self> {
        let verifier = TokenVerifier::new(&config)?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            config: Arc::new(config),
            verifier: Arc::new(verifier),
            client,
        })
    }
}

/// Build the gateway router.
///
/// Layers apply inside-out: the verification stage is added last, which
/// makes it the outermost stage and guarantees it runs before anything
/// else sees the request.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .fallback(proxy::forward)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
}

/// Token verification stage. Public paths pass untouched; everything
/// else needs a valid bearer token before it may reach the forwarder.
/// If the client disconnects mid-validation the whole stage is dropped,
/// cancelling the in-flight check.
pub async fn require_auth(
    State(state): State<GatewayState>,
    request: Request,
    next: Next,
) -> Response {
    if state.verifier.is_public(request.uri().path()) {
        return next.run(request).await;
    }

    match state.verifier.check(request.headers()).await {
        Ok(()) => next.run(request).await,
        Err(err) => {
            // Log the specific failure; the client only learns "unauthorized".
            tracing::warn!(path = %request.uri().path(), "Request rejected: {}", err);
            (StatusCode::UNAUTHORIZED, Json(ErrorResponse::unauthorized())).into_response()
        }
    }
}
