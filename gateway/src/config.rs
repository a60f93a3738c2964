//! Gateway configuration.

use std::time::Duration;

/// How the gateway validates bearer tokens.
///
/// Both deployments are supported: holding the shared secret and
/// verifying in-process, or delegating to the issuer's validate
/// endpoint so the secret never leaves the issuer.
#[derive(Debug, Clone)]
pub enum ValidationMode {
    /// Verify in-process with the shared secret.
    Local { secret: String },
    /// Delegate to the issuer's validate endpoint.
    Remote { validate_url: String },
}

/// Gateway configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// HTTP listen address
    pub http_addr: String,

    /// Upstream base URL requests are forwarded to
    pub upstream_url: String,

    /// Paths that bypass the token check (exact or segment-prefix match)
    pub public_paths: Vec<String>,

    /// Token validation mode
    pub validation: ValidationMode,

    /// Timeout for remote validation calls in seconds
    pub validate_timeout_secs: u64,

    /// Service version
    pub version: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:8080".to_string(),
            upstream_url: "http://localhost:8082".to_string(),
            public_paths: vec![
                "/auth/login".to_string(),
                "/auth/logout".to_string(),
                "/auth/validate".to_string(),
            ],
            validation: ValidationMode::Local {
                secret: "dev-secret-change-me".to_string(),
            },
            validate_timeout_secs: 3,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables.
    ///
    /// `VALIDATE_URL` selects remote validation and takes precedence
    /// over `JWT_SECRET`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("GATEWAY_HTTP_ADDR") {
            config.http_addr = addr;
        }

        if let Ok(url) = std::env::var("UPSTREAM_URL") {
            config.upstream_url = url;
        }

        if let Ok(paths) = std::env::var("PUBLIC_PATHS") {
            config.public_paths = paths
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
        }

        if let Ok(url) = std::env::var("VALIDATE_URL") {
            config.validation = ValidationMode::Remote { validate_url: url };
        } else if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.validation = ValidationMode::Local { secret };
        }

        if let Ok(timeout) = std::env::var("VALIDATE_TIMEOUT_SECS") {
            if let Ok(n) = timeout.parse() {
                config.validate_timeout_secs = n;
            }
        }

        config
    }

    /// Get the remote validation timeout as Duration.
    pub fn validate_timeout(&self) -> Duration {
        Duration::from_secs(self.validate_timeout_secs)
    }
}
