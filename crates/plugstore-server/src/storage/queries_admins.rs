//! Admin account queries.

use plugstore_core::db::{DatabaseError, unix_timestamp};

use super::db::StoreDatabase;
use super::models::Admin;

impl StoreDatabase {
    /// Create an admin account with an already-hashed password. Used by the
    /// test suite and by operator seed scripts; there is no HTTP endpoint.
    pub async fn create_admin(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Admin, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query("INSERT INTO admins (username, password_hash, created_at) VALUES ($1, $2, $3)")
            .bind(username)
            .bind(password_hash)
            .bind(now)
            .execute(self.pool())
            .await?;

        self.get_admin_by_username(username).await
    }

    /// Get an admin by username.
    pub async fn get_admin_by_username(&self, username: &str) -> Result<Admin, DatabaseError> {
        sqlx::query_as::<_, Admin>("SELECT * FROM admins WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Admin {username}")))
    }
}
