//! Auth service entry point.
//!
//! Authenticates credentials against the user store and mints session
//! tokens. The gateway delegates token validation here when it does not
//! hold the shared secret itself.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth::Role;
use auth_service::{AuthServiceConfig, AuthState, MemoryUserStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AuthServiceConfig::from_env();
    tracing::info!("Starting auth-service v{}", config.version);
    tracing::info!("HTTP server listening on {}", config.http_addr);

    let mut store = MemoryUserStore::new();
    if let (Some(email), Some(password)) = (&config.seed_email, &config.seed_password) {
        let role = Role::parse(&config.seed_role).unwrap_or_default();
        store = store.with_seeded_user(email.clone(), password, role)?;
        tracing::info!("Seeded bootstrap user {}", email);
    } else {
        tracing::warn!("No bootstrap user configured; every login will fail until the store has users");
    }

    let state = AuthState::new(Arc::new(store), config.token_config());
    let app = auth_service::router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
