//! Email audit log queries.

use plugstore_core::db::{DatabaseError, unix_timestamp};

use super::db::StoreDatabase;
use super::models::{EmailLog, NewEmailLog};

impl StoreDatabase {
    /// Append one audit row for a send attempt, success or failure.
    pub async fn insert_email_log(&self, log: &NewEmailLog) -> Result<(), DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO email_logs (recipient, subject, product_name, download_url, status, error, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&log.recipient)
        .bind(&log.subject)
        .bind(log.product_name.as_deref())
        .bind(log.download_url.as_deref())
        .bind(&log.status)
        .bind(log.error.as_deref())
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Most recent log rows, newest first. The HTTP layer caps `limit` at 200.
    pub async fn list_email_logs(&self, limit: i64) -> Result<Vec<EmailLog>, DatabaseError> {
        let logs =
            sqlx::query_as::<_, EmailLog>("SELECT * FROM email_logs ORDER BY id DESC LIMIT $1")
                .bind(limit)
                .fetch_all(self.pool())
                .await?;

        Ok(logs)
    }
}
