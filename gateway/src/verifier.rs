//! Token verification stage.
//!
//! Runs once per inbound request, ahead of forwarding. Requests on the
//! public allow-list pass untouched; everything else needs a bearer
//! token that verifies either in-process against the shared secret or
//! remotely at the issuer. Remote verification fails closed: a timeout
//! or transport error is the same outcome as an invalid token, and
//! nothing is retried.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::Utc;

use auth::{decode_token, extract_bearer};
use error::AuthError;

use crate::config::{GatewayConfig, ValidationMode};

enum Validator {
    Local {
        secret: String,
    },
    Remote {
        client: reqwest::Client,
        validate_url: String,
    },
}

/// Verifies bearer tokens ahead of request forwarding.
pub struct TokenVerifier {
    public_paths: Vec<String>,
    validator: Validator,
}

impl TokenVerifier {
    pub fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let validator = match &config.validation {
            ValidationMode::Local { secret } => Validator::Local {
                secret: secret.clone(),
            },
            ValidationMode::Remote { validate_url } => Validator::Remote {
                // The timeout bounds the whole call; a slow validation
                // is a failed one.
                client: reqwest::Client::builder()
                    .timeout(config.validate_timeout())
                    .build()?,
                validate_url: validate_url.clone(),
            },
        };

        Ok(Self {
            public_paths: config.public_paths.clone(),
            validator,
        })
    }

    /// Exact or path-segment-prefix match against the allow-list, so
    /// `/auth` covers `/auth/login` but not `/authx`.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| {
            path == p
                || path
                    .strip_prefix(p.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Check the Authorization header of a protected request.
    pub async fn check(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        let token = extract_bearer(header)?;

        match &self.validator {
            Validator::Local { secret } => {
                decode_token(token, secret, Utc::now().timestamp()).map(|_| ())
            }
            Validator::Remote {
                client,
                validate_url,
            } => {
                let response = client
                    .get(validate_url)
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .send()
                    .await
                    .map_err(|e| AuthError::ValidationTransport(e.to_string()))?;

                if response.status().is_success() {
                    Ok(())
                } else {
                    Err(AuthError::Unauthorized)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::{Role, TokenConfig};

    use super::*;

    const SECRET: &str = "verifier-secret";

    fn local_verifier(public_paths: &[&str]) -> TokenVerifier {
        let config = GatewayConfig {
            public_paths: public_paths.iter().map(|p| p.to_string()).collect(),
            validation: ValidationMode::Local {
                secret: SECRET.to_string(),
            },
            ..GatewayConfig::default()
        };
        TokenVerifier::new(&config).unwrap()
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        headers
    }

    #[test]
    fn public_paths_match_exact_and_segment_prefix() {
        let verifier = local_verifier(&["/auth/login", "/auth/logout", "/auth/validate"]);

        assert!(verifier.is_public("/auth/login"));
        assert!(verifier.is_public("/auth/login/"));
        assert!(!verifier.is_public("/auth/loginx"));
        assert!(!verifier.is_public("/auth/me"));
        assert!(!verifier.is_public("/api/properties"));

        let subtree = local_verifier(&["/auth"]);
        assert!(subtree.is_public("/auth"));
        assert!(subtree.is_public("/auth/anything/below"));
        assert!(!subtree.is_public("/authx"));
    }

    #[tokio::test]
    async fn local_mode_accepts_a_valid_token() {
        let verifier = local_verifier(&[]);
        let token = TokenConfig::new(SECRET, 3600)
            .mint("a@x.com", Role::User, Utc::now().timestamp())
            .unwrap();

        assert!(verifier.check(&bearer_headers(&token)).await.is_ok());
    }

    #[tokio::test]
    async fn local_mode_rejects_a_foreign_token() {
        let verifier = local_verifier(&[]);
        let token = TokenConfig::new("other-secret", 3600)
            .mint("a@x.com", Role::User, Utc::now().timestamp())
            .unwrap();

        assert!(matches!(
            verifier.check(&bearer_headers(&token)).await,
            Err(AuthError::SignatureMismatch)
        ));
    }

    #[tokio::test]
    async fn missing_header_is_rejected_before_any_validation() {
        let verifier = local_verifier(&[]);
        assert!(matches!(
            verifier.check(&HeaderMap::new()).await,
            Err(AuthError::MissingOrMalformedHeader)
        ));
    }
}
