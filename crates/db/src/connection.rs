use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub type DbPool = sqlx::SqlitePool;

/// Opens the pool, creating the database file on first use.
pub async fn connect_with_settings(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    open(database_url, max_connections, timeout_secs, true).await
}

/// Opens the pool only if the database already exists. Used by read-only
/// diagnostics, which must not leave a new file behind.
pub async fn connect_existing(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
) -> Result<DbPool, sqlx::Error> {
    open(database_url, max_connections, timeout_secs, false).await
}

async fn open(
    database_url: &str,
    max_connections: u32,
    timeout_secs: u64,
    create_if_missing: bool,
) -> Result<DbPool, sqlx::Error> {
    let options =
        SqliteConnectOptions::from_str(database_url)?.create_if_missing(create_if_missing);

    let mut pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(Duration::from_secs(timeout_secs.max(1)));

    // An in-memory database lives exactly as long as its one connection.
    if is_in_memory(database_url) {
        pool = pool.max_connections(1).min_connections(1).idle_timeout(None).max_lifetime(None);
    }

    pool.after_connect(|conn, _meta| {
        Box::pin(async move {
            sqlx::query("PRAGMA foreign_keys = ON").execute(&mut *conn).await?;
            sqlx::query("PRAGMA journal_mode = WAL").execute(&mut *conn).await?;
            sqlx::query("PRAGMA busy_timeout = 5000").execute(&mut *conn).await?;
            Ok(())
        })
    })
    .connect_with(options)
    .await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}
