//! Service configuration.

use auth::TokenConfig;

/// Issuer configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// HTTP listen address
    pub http_addr: String,

    /// Shared token signing secret
    pub token_secret: String,

    /// Token lifetime in seconds
    pub token_lifetime_secs: i64,

    /// Bootstrap user email seeded into the in-memory store
    pub seed_email: Option<String>,

    /// Bootstrap user password (hashed at startup, never stored)
    pub seed_password: Option<String>,

    /// Bootstrap user role tag
    pub seed_role: String,

    /// Service version
    pub version: String,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:8081".to_string(),
            token_secret: "dev-secret-change-me".to_string(),
            token_lifetime_secs: 3600,
            seed_email: None,
            seed_password: None,
            seed_role: "ADMIN".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl AuthServiceConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("AUTH_HTTP_ADDR") {
            config.http_addr = addr;
        }

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.token_secret = secret;
        }

        if let Ok(lifetime) = std::env::var("TOKEN_LIFETIME_SECS") {
            if let Ok(n) = lifetime.parse() {
                config.token_lifetime_secs = n;
            }
        }

        config.seed_email = std::env::var("AUTH_SEED_EMAIL").ok();
        config.seed_password = std::env::var("AUTH_SEED_PASSWORD").ok();

        if let Ok(role) = std::env::var("AUTH_SEED_ROLE") {
            config.seed_role = role;
        }

        config
    }

    /// Token configuration for the codec.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(&self.token_secret, self.token_lifetime_secs)
    }
}
