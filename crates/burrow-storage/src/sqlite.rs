use async_trait::async_trait;
use burrow_core::store::{LinkStore, ReadLinkStore, Result};
use burrow_core::{Link, ShortCode, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use typed_builder::TypedBuilder;

/// Connection settings for [`SqliteLinkStore::connect_with`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteSettings {
    /// Upper bound on pooled connections.
    #[builder(default = 5)]
    pub max_connections: u32,
    /// How long to wait for a free pooled connection.
    #[builder(default = Duration::from_secs(5))]
    pub acquire_timeout: Duration,
    /// How long a statement waits on a locked database before failing.
    #[builder(default = Duration::from_secs(5))]
    pub busy_timeout: Duration,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// SQLite implementation of the link store contract.
///
/// Links live in a single `links` table keyed by `short_code`, with a unique
/// index on `original_url`. Every write is a single statement, so the
/// constraints decide races between concurrent shortens: the loser gets
/// `DuplicateKey` or `DuplicateUrl` back.
#[derive(Debug, Clone)]
pub struct SqliteLinkStore {
    pool: SqlitePool,
}

impl SqliteLinkStore {
    /// Creates a store from an existing pool. The schema is not touched;
    /// call [`migrate`](Self::migrate) if needed.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (creating if missing) the database at `database_url` with
    /// default settings and applies the schema.
    pub async fn connect(database_url: &str) -> Result<Self> {
        Self::connect_with(database_url, SqliteSettings::default()).await
    }

    /// Opens the database at `database_url` and applies the schema.
    pub async fn connect_with(database_url: &str, settings: SqliteSettings) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true)
            .busy_timeout(settings.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        info!(
            database_url,
            max_connections = settings.max_connections,
            "connected to sqlite"
        );

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Opens a private in-memory database.
    ///
    /// Each SQLite in-memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Applies the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StorageError::Unavailable(format!("schema migration failed: {e}")))?;
        debug!("links schema is up to date");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn link_from_row(row: &SqliteRow) -> Result<Link> {
    let short_code: String = row.try_get("short_code").map_err(map_sqlx_error)?;
    let original_url: String = row.try_get("original_url").map_err(map_sqlx_error)?;
    let short_code = ShortCode::new(short_code)
        .map_err(|e| StorageError::InvalidData(format!("stored short code is invalid: {e}")))?;

    Ok(Link::new(short_code, original_url))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

/// Tells which uniqueness constraint an insert tripped over.
///
/// SQLite names the offending column in the message, e.g.
/// `UNIQUE constraint failed: links.original_url`.
fn classify_unique_violation(err: &sqlx::Error, link: &Link) -> StorageError {
    let on_url = err
        .as_database_error()
        .is_some_and(|db| db.message().contains("original_url"));

    if on_url {
        StorageError::DuplicateUrl(link.original_url.clone())
    } else {
        StorageError::DuplicateKey(link.short_code.to_string())
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Configuration(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

#[async_trait]
impl ReadLinkStore for SqliteLinkStore {
    async fn get_by_short_code(&self, code: &ShortCode) -> Result<Option<Link>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, original_url
            FROM links
            WHERE short_code = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>> {
        let row = sqlx::query(
            r#"
            SELECT short_code, original_url
            FROM links
            WHERE original_url = ?
            LIMIT 1
            "#,
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(link_from_row).transpose()
    }

    async fn get_all(&self) -> Result<Vec<Link>> {
        let rows = sqlx::query(
            r#"
            SELECT short_code, original_url
            FROM links
            ORDER BY rowid
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(link_from_row).collect()
    }
}

#[async_trait]
impl LinkStore for SqliteLinkStore {
    async fn save(&self, link: &Link) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO links (short_code, original_url)
            VALUES (?, ?)
            "#,
        )
        .bind(link.short_code.as_str())
        .bind(link.original_url.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(classify_unique_violation(&err, link)),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn clear_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM links")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
