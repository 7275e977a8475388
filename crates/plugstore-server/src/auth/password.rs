//! Password hashing and verification for admin accounts using bcrypt.
//!
//! The `admins` table stores bcrypt hashes; operators seed rows by hand with
//! `hash_password` output (there is no self-service registration).

use bcrypt::{DEFAULT_COST, hash, verify};

/// Hash a password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

/// Verify a password against a stored bcrypt hash.
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password, hashed)
}
