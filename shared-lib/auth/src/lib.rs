//! Session token library.
//!
//! This crate provides the signed-token codec shared by the issuer and
//! the gateway: claim construction, HMAC-SHA256 encoding/verification
//! and bearer-header parsing. Everything here is pure; callers supply
//! the clock.

mod bearer;
mod claims;
mod token;

pub use bearer::extract_bearer;
pub use claims::{Claims, Role};
pub use token::{decode_token, encode_token, TokenConfig};
