//! Token claims and role definitions.

use serde::{Deserialize, Serialize};

/// User roles in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Administrator with full access
    Admin,
    /// Regular user
    User,
}

impl Default for Role {
    fn default() -> Self {
        Self::User
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Parse a raw role tag, case-insensitively.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }

    /// Case-insensitive comparison against a raw role tag.
    pub fn matches(&self, tag: &str) -> bool {
        tag.eq_ignore_ascii_case(self.as_str())
    }
}

/// Claims carried by a session token.
///
/// The role is a snapshot taken at mint time; a role change in the user
/// store only takes effect on the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the user's email)
    pub sub: String,
    /// User's role at mint time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject, expiring `lifetime_secs` after `now`.
    pub fn new(subject: impl Into<String>, role: Role, now: i64, lifetime_secs: i64) -> Self {
        Self {
            sub: subject.into(),
            role,
            iat: now,
            exp: now + lifetime_secs,
        }
    }

    /// A token is expired from the exact expiry instant onwards.
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// Check if the subject holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
