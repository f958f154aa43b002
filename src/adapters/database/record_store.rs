use crate::adapters::database::DbPool;
use crate::domain::record::ContactRecord;
use crate::services::submission::store::{RecordStore, StoreError};
use async_trait::async_trait;

const MAX_IDENTIFIER_LEN: usize = 63;

#[derive(Clone, Debug)]
pub struct PgRecordStore {
    pool: DbPool,
}

impl PgRecordStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Creates the contact table if it does not exist yet.
    ///
    /// # Errors
    /// Returns `StoreError::InvalidTarget` if `target` is not a plain identifier.
    /// Returns `StoreError::Database` if the statement fails.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn ensure_table(&self, target: &str) -> Result<(), StoreError> {
        let table = quote_identifier(target)?;
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {table} (
                message_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    #[tracing::instrument(level = "debug", skip(self, record), fields(message_id = %record.message_id))]
    async fn put(&self, target: &str, record: &ContactRecord) -> Result<(), StoreError> {
        let table = quote_identifier(target)?;
        let sql = format!(
            r#"
            INSERT INTO {table} (message_id, name, email, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#
        );

        let result = sqlx::query(&sql)
            .bind(&record.message_id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.message)
            .bind(record.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some("23505") => {
                // Unique violation on message_id
                Err(StoreError::Conflict(record.message_id.clone()))
            }
            Err(e) => Err(StoreError::Database(e)),
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Table names are interpolated into SQL, so only plain identifiers are accepted.
fn quote_identifier(target: &str) -> Result<String, StoreError> {
    let mut chars = target.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid_start || !valid_rest || target.len() > MAX_IDENTIFIER_LEN {
        return Err(StoreError::InvalidTarget(target.to_string()));
    }
    Ok(format!("\"{target}\""))
}
