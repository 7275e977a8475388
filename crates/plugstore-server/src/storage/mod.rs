//! PostgreSQL storage for the Plugstore storefront.
//!
//! Provides persistence for products, their four dependent collections
//! (pricing plans, feature bullets, testimonials, FAQs), admin accounts, and
//! the email audit log, plus the relations synchronizer that reconciles a
//! product's collections with caller-supplied data.

mod db;
mod models;
mod queries_admins;
mod queries_email_logs;
mod queries_products;
mod sync;

#[cfg(test)]
mod tests;

pub use db::StoreDatabase;
pub use models::*;
