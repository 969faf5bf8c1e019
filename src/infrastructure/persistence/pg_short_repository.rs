//! PostgreSQL implementation of the short record repository.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::Config;
use crate::domain::entities::ShortRecord;
use crate::domain::repositories::{ShortRepository, StoreError};

const MAX_CONNECT_DELAY: Duration = Duration::from_secs(5);

const INSERT_SHORT_QUERY: &str = r#"
    INSERT INTO urls (redirect_path, scheme, host, path, query, fragment)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

const GET_SHORT_QUERY: &str = r#"
    SELECT redirect_path, scheme, host, path, query, fragment
    FROM urls
    WHERE redirect_path = $1
"#;

#[derive(sqlx::FromRow)]
struct ShortRow {
    redirect_path: String,
    scheme: String,
    host: String,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

impl From<ShortRow> for ShortRecord {
    fn from(row: ShortRow) -> Self {
        ShortRecord::new(
            row.redirect_path,
            row.scheme,
            row.host,
            row.path,
            row.query,
            row.fragment,
        )
    }
}

/// PostgreSQL repository for short records.
///
/// Absent optional components are written as `NULL`; rows holding an empty
/// string are read back as absent as well.
pub struct PgShortRepository {
    pool: Arc<PgPool>,
}

impl PgShortRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Opens a connection pool using the database settings from `config`.
    ///
    /// The first connection is retried with exponential backoff, up to
    /// `db_connect_retries` attempts, so the service can start while the
    /// database is still coming up.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if no database URL is configured or
    /// every connection attempt fails.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let database_url = config
            .database_url
            .as_deref()
            .ok_or_else(|| StoreError::Unavailable("database URL is not configured".to_string()))?;

        let options = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(config.db_connect_timeout));

        let pool = Retry::start(connect_backoff(config.db_connect_retries), || {
            let options = options.clone();
            async move {
                options.connect(database_url).await.inspect_err(|e| {
                    tracing::warn!(error = %e, "Database connection attempt failed");
                })
            }
        })
        .await
        .map_err(map_sqlx_error)?;

        tracing::info!("Connected to database");

        Ok(Self::new(Arc::new(pool)))
    }

    /// Applies pending migrations from `./migrations`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(|e| StoreError::Unavailable(format!("migration failed: {e}")))
    }

    /// Round-trips a trivial query to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be reached.
    pub async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ShortRepository for PgShortRepository {
    async fn insert(&self, record: ShortRecord) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = sqlx::query(INSERT_SHORT_QUERY)
            .bind(&record.redirect_path)
            .bind(&record.scheme)
            .bind(&record.host)
            .bind(record.path.as_deref())
            .bind(record.query.as_deref())
            .bind(record.fragment.as_deref())
            .execute(&mut *tx)
            .await;

        // Dropping `tx` on the error path rolls the transaction back.
        if let Err(e) = result {
            return Err(match map_sqlx_error(e) {
                StoreError::Conflict(_) => StoreError::Conflict(record.redirect_path),
                other => other,
            });
        }

        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn get(&self, redirect_path: &str) -> Result<ShortRecord, StoreError> {
        sqlx::query_as::<_, ShortRow>(GET_SHORT_QUERY)
            .bind(redirect_path)
            .fetch_optional(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?
            .map(ShortRecord::from)
            .ok_or_else(|| StoreError::NotFound(redirect_path.to_string()))
    }
}

/// Delays between connection attempts: exponential from 500ms, capped at 5s
/// and jittered. `attempts` includes the first try, so one fewer delay is
/// produced.
fn connect_backoff(attempts: usize) -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(MAX_CONNECT_DELAY)
        .map(jitter)
        .take(attempts.saturating_sub(1))
}

/// Maps SQLx failures onto store error kinds.
///
/// Unique violations become [`StoreError::Conflict`] and missing rows
/// [`StoreError::NotFound`]; anything else is [`StoreError::Unavailable`].
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return StoreError::Conflict(db.constraint().unwrap_or("urls_pkey").to_string());
    }

    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound(String::new()),
        other => StoreError::Unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_row_not_found() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn test_map_pool_timeout_is_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_connect_backoff_schedule() {
        let delays: Vec<Duration> = connect_backoff(5).collect();

        assert_eq!(delays.len(), 4);
        assert!(delays.iter().all(|d| *d <= MAX_CONNECT_DELAY));

        assert_eq!(connect_backoff(1).count(), 0);
        assert_eq!(connect_backoff(0).count(), 0);
    }

    #[test]
    fn test_row_with_empty_strings_reads_as_absent() {
        let record = ShortRecord::from(ShortRow {
            redirect_path: "abc1234".to_string(),
            scheme: "http".to_string(),
            host: "github.com".to_string(),
            path: Some(String::new()),
            query: None,
            fragment: Some(String::new()),
        });

        assert!(record.path.is_none());
        assert!(record.fragment.is_none());
        assert_eq!(record.raw_url(), "http://github.com");
    }
}
