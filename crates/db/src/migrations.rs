use sqlx::migrate::{MigrateError, Migrator};

use crate::DbPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

pub async fn run_pending(pool: &DbPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}

pub const MANAGED_TABLES: &[&str] = &["agricultural_product", "transport_vehicle"];

/// Names from [`MANAGED_TABLES`] that do not exist in the connected database.
pub async fn missing_tables(pool: &DbPool) -> Result<Vec<&'static str>, sqlx::Error> {
    let mut missing = Vec::new();
    for table in MANAGED_TABLES {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(*table)
        .fetch_one(pool)
        .await?;
        if count == 0 {
            missing.push(*table);
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::{missing_tables, run_pending, MIGRATOR};
    use crate::connect_with_settings;

    #[tokio::test]
    async fn migrations_create_record_tables() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");

        let before = missing_tables(&pool).await.expect("inspect schema");
        assert_eq!(before, vec!["agricultural_product", "transport_vehicle"]);

        run_pending(&pool).await.expect("run migrations");

        let after = missing_tables(&pool).await.expect("inspect schema");
        assert!(after.is_empty(), "all tables should exist after migrating: {after:?}");
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");

        run_pending(&pool).await.expect("first run");
        run_pending(&pool).await.expect("second run");

        let (applied,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _sqlx_migrations")
            .fetch_one(&pool)
            .await
            .expect("count applied migrations");
        assert_eq!(applied as usize, MIGRATOR.iter().count());
    }

    #[tokio::test]
    async fn schema_rejects_unknown_flag_literals() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        run_pending(&pool).await.expect("run migrations");

        let result = sqlx::query(
            "INSERT INTO transport_vehicle (capacity, temperature, ventilation, sun_protection)
             VALUES (10, 4.0, 'YES', 'NAO')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err(), "CHECK constraint should reject non SIM/NAO literals");
    }
}
