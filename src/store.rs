//! SQLite pool setup and `cars` table DDL.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub const CARS_TABLE: &str = "cars";

/// How long a connection waits on a locked database before failing with SQLITE_BUSY.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CARS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS cars (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand VARCHAR(50) NOT NULL,
        color VARCHAR(30) NOT NULL,
        model VARCHAR(50) NOT NULL,
        model_year INTEGER NOT NULL,
        factory_year INTEGER NOT NULL,
        description TEXT
    )
"#;

/// Open the pool described by `config`, creating the database file if missing.
/// In-memory databases get a single connection that is never recycled, so the data
/// lives as long as the pool.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(ConfigError::DatabaseUrl)?
        .create_if_missing(true)
        .busy_timeout(BUSY_TIMEOUT);
    let (opts, pool_opts) = if config.is_in_memory() {
        let pool_opts = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
        (opts, pool_opts)
    } else {
        // WAL lets readers proceed while a patch holds the write lock.
        let opts = opts.journal_mode(SqliteJournalMode::Wal);
        let pool_opts = SqlitePoolOptions::new().max_connections(config.max_connections.max(1));
        (opts, pool_opts)
    };
    let pool = pool_opts.connect_with(opts).await?;
    tracing::info!(url = %config.database_url, "database pool ready");
    Ok(pool)
}

/// Pool over a fresh private in-memory database with the `cars` table in place.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        ..AppConfig::default()
    };
    let pool = connect(&config).await?;
    ensure_tables(&pool).await?;
    Ok(pool)
}

/// Create the `cars` table if it does not exist. `AUTOINCREMENT` keeps ids from being
/// reused after deletes.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CARS_DDL).execute(pool).await?;
    tracing::debug!(table = CARS_TABLE, "table ensured");
    Ok(())
}

/// Number of stored cars, or `None` when the `cars` table has not been created.
pub async fn stored_car_count(pool: &SqlitePool) -> Result<Option<i64>, sqlx::Error> {
    let table: Option<(String,)> =
        sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(CARS_TABLE)
            .fetch_optional(pool)
            .await?;
    if table.is_none() {
        return Ok(None);
    }
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM cars")
        .fetch_one(pool)
        .await?;
    Ok(Some(count))
}
