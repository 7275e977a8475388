//! PostgreSQL database handle for the Plugstore server.

use plugstore_core::db::{DatabaseError, connect_pool};
use sqlx::{Pool, Postgres};
use tracing::info;

#[derive(Clone)]
pub struct StoreDatabase {
    pool: Pool<Postgres>,
}

impl StoreDatabase {
    pub async fn open(url: &str, ssl_required: bool) -> Result<Self, DatabaseError> {
        let pool = connect_pool(url, ssl_required).await?;

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        info!("Storefront database migrations complete");
        Ok(())
    }

    pub const fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}
