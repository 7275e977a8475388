//! JWT claims structure for admin session tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID (unique per token).
    pub jti: String,
    /// Subject (admin row id).
    pub sub: String,
    /// Admin username.
    pub username: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiration (unix timestamp).
    pub exp: i64,
}
