//! User store seam.
//!
//! User accounts are owned by an external user-management system; the
//! issuer only ever looks a user up and checks a password against the
//! stored hash. `MemoryUserStore` is the shipped stand-in, seeded at
//! startup; the trait is the contract a real backend implements.

use std::collections::HashMap;

use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use auth::Role;
use error::StoreError;

/// A user record as read from the store. Read-only to this service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub email: String,
    /// bcrypt hash, never serialized or logged
    pub password_hash: String,
    pub role: Role,
}

/// The two collaborator operations the issuer consults.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Check a plaintext password against a stored hash. The comparison
    /// runs in constant time inside the hashing backend.
    async fn verify_password(&self, password: &str, password_hash: &str)
        -> Result<bool, StoreError>;
}

/// In-memory user store with bcrypt password verification.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: HashMap<String, UserRecord>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user with an already-computed bcrypt hash.
    pub fn with_user(mut self, record: UserRecord) -> Self {
        self.users.insert(record.email.clone(), record);
        self
    }

    /// Hash `password` and insert the user. Intended for startup seeding.
    pub fn with_seeded_user(
        self,
        email: impl Into<String>,
        password: &str,
        role: Role,
    ) -> Result<Self, StoreError> {
        let password_hash =
            hash(password, DEFAULT_COST).map_err(|e| StoreError::VerifyFailed(e.to_string()))?;
        Ok(self.with_user(UserRecord {
            email: email.into(),
            password_hash,
            role,
        }))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.get(email).cloned())
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, StoreError> {
        verify(password, password_hash).map_err(|e| StoreError::VerifyFailed(e.to_string()))
    }
}
