//! Common error types for the issuer and the gateway.
//!
//! This crate provides unified error handling across both services.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("User store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Authentication and token verification errors.
///
/// The variants only matter internally, for logging. Every one of them
/// collapses to the same unauthorized response at the HTTP boundary.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Role mismatch")]
    RoleMismatch,

    #[error("Missing or malformed Authorization header")]
    MissingOrMalformedHeader,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token signature mismatch")]
    SignatureMismatch,

    #[error("Token expired")]
    Expired,

    #[error("Token creation failed")]
    TokenCreationFailed,

    #[error("Validation transport failure: {0}")]
    ValidationTransport(String),

    #[error("Unauthorized")]
    Unauthorized,
}

/// User-store errors. The store itself belongs to an external
/// user-management system; these cover the seams the issuer consults.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("User lookup failed: {0}")]
    LookupFailed(String),

    #[error("Password verification failed: {0}")]
    VerifyFailed(String),
}

/// Error response body for API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The one body every authentication failure collapses to. Unknown
    /// user, wrong password, bad signature and expired token must be
    /// indistinguishable to a client.
    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Unauthorized")
    }

    /// Response for structurally invalid requests (missing fields, bad
    /// JSON). Input-shape problems, not authentication failures.
    pub fn bad_request() -> Self {
        Self::new("BAD_REQUEST", "Malformed request")
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
