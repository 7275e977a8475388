//! Plugstore Storefront API Library
//!
//! Core functionality for the Plugstore server:
//! - PostgreSQL storage for products, their dependent collections, admins,
//!   and the email audit log
//! - The product relations synchronizer (delete-all/insert-all reconciliation)
//! - Admin authentication (bcrypt passwords, JWT session tokens)
//! - SMTP delivery for trial-download emails
//! - The axum HTTP surface

pub mod auth;
pub mod mailer;
pub mod server;
pub mod storage;
