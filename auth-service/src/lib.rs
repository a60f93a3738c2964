//! Authentication service library.
//!
//! Exposes the issuer as a library so tests and in-process callers can
//! mount the router without a network listener.

pub mod config;
pub mod handlers;
pub mod store;

pub use config::AuthServiceConfig;
pub use store::{MemoryUserStore, UserRecord, UserStore};

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use auth::TokenConfig;

/// Shared issuer state: the user store seam and the token configuration.
/// Both are read-only after construction; handlers run concurrently
/// without coordination.
#[derive(Clone)]
pub struct AuthState {
    pub store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenConfig>,
}

impl AuthState {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenConfig) -> Self {
        Self {
            store,
            tokens: Arc::new(tokens),
        }
    }
}

/// Build the issuer router.
pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/auth/validate", get(handlers::validate))
        .route("/auth/me", get(handlers::me))
        .route("/auth/logout", post(handlers::logout))
        .with_state(state)
}
