//! Plugstore Core Library
//!
//! Shared functionality for Plugstore components:
//! - Typed configuration for the SMTP transport
//! - PostgreSQL pool helpers and the shared database error type
//! - Tracing initialisation

pub mod config;
pub mod db;
pub mod tracing_init;

pub use config::SmtpConfig;
pub use db::DatabaseError;
