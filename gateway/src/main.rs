//! Gateway entry point.
//!
//! Verifies session tokens at the edge and forwards cleared requests to
//! the configured upstream service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gateway_lib::{GatewayConfig, GatewayState, ValidationMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway=info,gateway_lib=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = GatewayConfig::from_env();
    tracing::info!("Starting gateway v{}", config.version);
    tracing::info!("HTTP server listening on {}", config.http_addr);
    tracing::info!("Forwarding to upstream {}", config.upstream_url);
    match &config.validation {
        ValidationMode::Local { .. } => tracing::info!("Validating tokens locally"),
        ValidationMode::Remote { validate_url } => {
            tracing::info!("Delegating token validation to {}", validate_url)
        }
    }

    let state = GatewayState::new(config.clone())?;
    let app = gateway_lib::router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
