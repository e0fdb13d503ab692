//! PostgreSQL implementation of mapping repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::sync::Arc;
use tracing::{debug, error};

use crate::domain::entities::{NewMapping, StoredUrl, UserId};
use crate::domain::repositories::{MappingRepository, StoreError};

const INSERT_MAPPING: &str = r#"
    INSERT INTO short_urls (short_url, long_url, user_id)
    VALUES ($1, $2, $3)
    ON CONFLICT DO NOTHING
"#;

/// PostgreSQL repository for short URL mappings.
///
/// One row per short code. Uniqueness of `short_url` comes from the primary
/// key and uniqueness of active `long_url` values from a partial unique index;
/// inserts use `ON CONFLICT DO NOTHING`, so a conflict surfaces as zero
/// affected rows rather than as a database error.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::Database(e.into()))
    }

    async fn insert_in(
        tx: &mut Transaction<'_, Postgres>,
        short: &str,
        long: &str,
        owner: UserId,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(INSERT_MAPPING)
            .bind(short)
            .bind(long)
            .bind(i64::from(owner))
            .execute(&mut **tx)
            .await
            .map_err(log_fatal("put_batch"))?;

        Ok(result.rows_affected() == 1)
    }
}

fn log_fatal(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |e| {
        error!(operation, "Database error: {}", e);
        StoreError::Database(e)
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn put(&self, short: &str, long: &str, owner: UserId) -> Result<(), StoreError> {
        let result = sqlx::query(INSERT_MAPPING)
            .bind(short)
            .bind(long)
            .bind(i64::from(owner))
            .execute(self.pool.as_ref())
            .await
            .map_err(log_fatal("put"))?;

        if result.rows_affected() == 0 {
            debug!(short, long, "Duplicate mapping rejected");
            return Err(StoreError::Duplicate);
        }

        Ok(())
    }

    async fn get(&self, short: &str) -> Result<Option<StoredUrl>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT long_url, is_deleted
            FROM short_urls
            WHERE short_url = $1
            "#,
        )
        .bind(short)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(log_fatal("get"))?;

        row.map(|r| -> Result<StoredUrl, StoreError> {
            Ok(StoredUrl {
                long_url: r.try_get("long_url")?,
                deleted: r.try_get("is_deleted")?,
            })
        })
        .transpose()
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<String>, StoreError> {
        let shorts = sqlx::query_scalar::<_, String>(
            r#"
            SELECT short_url
            FROM short_urls
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(i64::from(owner))
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(log_fatal("list_by_owner"))?;

        Ok(shorts)
    }

    async fn put_batch(&self, items: &[NewMapping], owner: UserId) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(log_fatal("put_batch"))?;

        let mut skipped = 0usize;
        for item in items {
            if !Self::insert_in(&mut tx, &item.short, &item.long, owner).await? {
                skipped += 1;
            }
        }

        tx.commit().await.map_err(log_fatal("put_batch"))?;

        if skipped > 0 {
            debug!(skipped, total = items.len(), "Batch contained duplicates");
            return Err(StoreError::Duplicate);
        }

        Ok(())
    }

    async fn mark_deleted(&self, owner: UserId, shorts: &[String]) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE short_urls
            SET is_deleted = TRUE
            WHERE user_id = $1
              AND short_url = ANY($2)
              AND NOT is_deleted
            "#,
        )
        .bind(i64::from(owner))
        .bind(shorts)
        .execute(self.pool.as_ref())
        .await
        .map_err(log_fatal("mark_deleted"))?;

        debug!(
            owner,
            changed = result.rows_affected(),
            requested = shorts.len(),
            "Marked mappings deleted"
        );

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map_err(log_fatal("ping"))?;
        Ok(())
    }
}
