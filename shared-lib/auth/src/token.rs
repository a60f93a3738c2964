//! Token encoding and verification.

use std::collections::BTreeMap;

use error::AuthError;
use hmac::{Hmac, Mac};
use jwt::{SignWithKey, VerifyWithKey};
use sha2::Sha256;

use crate::claims::{Claims, Role};

type HmacSha256 = Hmac<Sha256>;

/// Token configuration: the shared signing secret and token lifetime.
///
/// Injected into the issuer and (in local-validation deployments) the
/// gateway at construction time, never read from ambient state, so each
/// instance can carry its own secret.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token validity duration in seconds
    pub lifetime_secs: i64,
}

impl TokenConfig {
    /// Create a new token configuration.
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Mint a token for `subject` as of `now`.
    pub fn mint(&self, subject: &str, role: Role, now: i64) -> Result<String, AuthError> {
        let claims = Claims::new(subject, role, now, self.lifetime_secs);
        encode_token(&claims, &self.secret)
    }

    /// Verify a token as of `now`.
    pub fn verify(&self, token: &str, now: i64) -> Result<Claims, AuthError> {
        decode_token(token, &self.secret, now)
    }
}

/// Encode claims into a signed, URL-safe token string.
///
/// Claims are serialized through a `BTreeMap`, so the payload encoding
/// is canonical and minting is deterministic for a fixed clock.
pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    let key = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
        tracing::error!("Failed to create HMAC key: {}", e);
        AuthError::TokenCreationFailed
    })?;

    let mut token_claims: BTreeMap<String, serde_json::Value> = BTreeMap::new();
    token_claims.insert("sub".to_string(), serde_json::json!(claims.sub));
    token_claims.insert("role".to_string(), serde_json::json!(claims.role.as_str()));
    token_claims.insert("iat".to_string(), serde_json::json!(claims.iat));
    token_claims.insert("exp".to_string(), serde_json::json!(claims.exp));

    token_claims.sign_with_key(&key).map_err(|e| {
        tracing::error!("Failed to sign token: {}", e);
        AuthError::TokenCreationFailed
    })
}

/// Decode a token and check its signature and expiry as of `now`.
///
/// The signature is recomputed over the transmitted header and payload
/// and compared in constant time (`Mac::verify_slice`), so a mismatch
/// reveals nothing about where the bytes diverged. Verification never
/// mutates anything; callers may run it from any number of tasks.
pub fn decode_token(token: &str, secret: &str, now: i64) -> Result<Claims, AuthError> {
    let key = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
        tracing::error!("Failed to create HMAC key: {}", e);
        AuthError::MalformedToken
    })?;

    let verified: BTreeMap<String, serde_json::Value> =
        token.verify_with_key(&key).map_err(|e| {
            tracing::warn!("Token verification failed: {}", e);
            match e {
                jwt::Error::InvalidSignature | jwt::Error::RustCryptoMac(_) => {
                    AuthError::SignatureMismatch
                }
                _ => AuthError::MalformedToken,
            }
        })?;

    // Extract claims
    let sub = verified
        .get("sub")
        .and_then(|v| v.as_str())
        .ok_or(AuthError::MalformedToken)?
        .to_string();

    let role: Role = verified
        .get("role")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .ok_or(AuthError::MalformedToken)?;

    let iat = verified
        .get("iat")
        .and_then(|v| v.as_i64())
        .ok_or(AuthError::MalformedToken)?;

    let exp = verified
        .get("exp")
        .and_then(|v| v.as_i64())
        .ok_or(AuthError::MalformedToken)?;

    let claims = Claims { sub, role, iat, exp };

    if claims.is_expired_at(now) {
        return Err(AuthError::Expired);
    }

    Ok(claims)
}
