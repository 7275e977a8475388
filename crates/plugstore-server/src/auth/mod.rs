//! Authentication module for the Plugstore admin panel.
//!
//! Provides JWT session-token management and password hashing. Every admin
//! mutation passes through one compare-and-allow gate (`server::middleware`)
//! that validates the session token issued here.

pub mod claims;
pub mod jwt;
pub mod password;

pub use claims::Claims;
pub use jwt::JwtManager;
