//! # PostgreSQL Call Log Store
//!
//! PostgreSQL implementation of [`CallLogStore`] using sqlx.
//!
//! Each write scope is a database transaction. A batch is written with
//! a single multi-row `INSERT`, and `id`, `seq` and `created_at` are
//! column defaults. The table is append-only.

use crate::domain::entities::call_log::{CallLogEntry, CallLogRecord};
use crate::domain::entities::call_result::OutcomeKind;
use crate::domain::value_objects::{LogId, ParseEnumError, ProviderName, Timestamp};
use crate::infrastructure::persistence::traits::{
    CallLogStore, CallLogTransaction, PersistenceError, PersistenceResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};

/// PostgreSQL implementation of [`CallLogStore`].
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use api_fanout::infrastructure::persistence::postgres::PostgresCallLogStore;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let store = PostgresCallLogStore::new(pool);
/// ```
#[derive(Debug, Clone)]
pub struct PostgresCallLogStore {
    pool: PgPool,
}

impl PostgresCallLogStore {
    /// Creates a new PostgreSQL call log store.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool to `url` and wraps it in a store.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Connection` if the database is unreachable.
    pub async fn connect(url: &str, max_connections: u32) -> PersistenceResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| PersistenceError::connection(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns the number of stored records.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the query fails.
    pub async fn count(&self) -> PersistenceResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM external_api_logs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        u64::try_from(count).map_err(|e| PersistenceError::serialization(e.to_string()))
    }

    /// Returns the most recent records, newest first.
    ///
    /// Records of one batch share `created_at` and come back in reverse
    /// insertion order.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the query fails or a row cannot be
    /// decoded.
    pub async fn recent(&self, limit: u32) -> PersistenceResult<Vec<CallLogRecord>> {
        let rows: Vec<CallLogRow> = sqlx::query_as(
            r#"
            SELECT id, provider, outcome, is_validation_error,
                   response_time_ms, data, error_message, created_at
            FROM external_api_logs
            ORDER BY seq DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(CallLogRow::try_into_record).collect()
    }
}

#[async_trait]
impl CallLogStore for PostgresCallLogStore {
    async fn begin(&self) -> PersistenceResult<Box<dyn CallLogTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(PostgresCallLogTransaction { tx }))
    }
}

/// Database transaction scoped to one batch.
struct PostgresCallLogTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CallLogTransaction for PostgresCallLogTransaction {
    async fn append_batch(&mut self, entries: &[CallLogEntry]) -> PersistenceResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO external_api_logs (provider, outcome, is_validation_error, \
             response_time_ms, data, error_message) ",
        );
        builder.push_values(entries, |mut row, entry| {
            row.push_bind(entry.provider.as_str())
                .push_bind(entry.outcome.as_str())
                .push_bind(entry.is_validation_error)
                .push_bind(entry.response_time_ms)
                .push_bind(entry.data.clone())
                .push_bind(entry.error_message.clone());
        });

        let result = builder
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() != entries.len() as u64 {
            return Err(PersistenceError::query(format!(
                "expected {} rows inserted, got {}",
                entries.len(),
                result.rows_affected()
            )));
        }
        Ok(())
    }

    async fn commit(self: Box<Self>) -> PersistenceResult<()> {
        let Self { tx } = *self;
        tx.commit()
            .await
            .map_err(|e| PersistenceError::transaction(e.to_string()))
    }

    async fn rollback(self: Box<Self>) -> PersistenceResult<()> {
        let Self { tx } = *self;
        tx.rollback()
            .await
            .map_err(|e| PersistenceError::transaction(e.to_string()))
    }
}

/// Row type for call log queries.
#[derive(Debug, sqlx::FromRow)]
struct CallLogRow {
    id: uuid::Uuid,
    provider: String,
    outcome: String,
    is_validation_error: bool,
    response_time_ms: f64,
    data: Option<serde_json::Value>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl CallLogRow {
    fn try_into_record(self) -> PersistenceResult<CallLogRecord> {
        let provider: ProviderName = self
            .provider
            .parse()
            .map_err(|e: ParseEnumError| {
                PersistenceError::serialization(e.to_string())
            })?;

        let outcome: OutcomeKind = serde_json::from_str(&format!("\"{}\"", self.outcome))
            .map_err(|e| PersistenceError::serialization(e.to_string()))?;

        let entry = CallLogEntry {
            provider,
            outcome,
            is_validation_error: self.is_validation_error,
            response_time_ms: self.response_time_ms,
            data: self.data,
            error_message: self.error_message,
        };

        Ok(CallLogRecord::new(
            LogId::new(self.id),
            entry,
            Timestamp::from(self.created_at),
        ))
    }
}

fn map_sqlx_error(error: sqlx::Error) -> PersistenceError {
    match error {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => PersistenceError::connection(error.to_string()),
        sqlx::Error::Database(_) => PersistenceError::query(error.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::Encode(_) => {
            PersistenceError::serialization(error.to_string())
        }
        other => PersistenceError::internal(other.to_string()),
    }
}
