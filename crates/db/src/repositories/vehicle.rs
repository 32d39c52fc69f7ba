use sqlx::Row;
use tracing::debug;

use agrotrack_core::domain::vehicle::{NewVehicle, Vehicle, VehicleId};

use super::flag::{flag_as_str, parse_flag};
use super::{decode_count, RepositoryError, VehicleRepository};
use crate::DbPool;

pub struct SqlVehicleRepository {
    pool: DbPool,
}

impl SqlVehicleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_vehicle(row: &sqlx::sqlite::SqliteRow) -> Result<Vehicle, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let capacity: i64 =
        row.try_get("capacity").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let temperature: f64 =
        row.try_get("temperature").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let ventilation: String =
        row.try_get("ventilation").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let sun_protection: String =
        row.try_get("sun_protection").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(Vehicle {
        id: VehicleId(id),
        capacity: decode_count("capacity", capacity)?,
        temperature,
        has_ventilation: parse_flag("ventilation", &ventilation)?,
        has_sun_protection: parse_flag("sun_protection", &sun_protection)?,
    })
}

#[async_trait::async_trait]
impl VehicleRepository for SqlVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<VehicleId, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO transport_vehicle (capacity, temperature, ventilation, sun_protection)
             VALUES (?, ?, ?, ?)",
        )
        .bind(i64::from(vehicle.capacity))
        .bind(vehicle.temperature)
        .bind(flag_as_str(vehicle.has_ventilation))
        .bind(flag_as_str(vehicle.has_sun_protection))
        .execute(&self.pool)
        .await?;

        let id = VehicleId(result.last_insert_rowid());
        debug!(event_name = "store.vehicle.inserted", vehicle_id = id.0, "vehicle row inserted");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, capacity, temperature, ventilation, sun_protection
             FROM transport_vehicle ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_vehicle).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, capacity, temperature, ventilation, sun_protection
             FROM transport_vehicle WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_vehicle(r)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use agrotrack_core::domain::vehicle::{NewVehicle, VehicleId};

    use super::SqlVehicleRepository;
    use crate::repositories::{RepositoryError, VehicleRepository};
    use crate::{connect_with_settings, migrations};

    async fn setup() -> sqlx::SqlitePool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    fn truck(capacity: u32, temperature: f64) -> NewVehicle {
        NewVehicle { capacity, temperature, has_ventilation: false, has_sun_protection: true }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = SqlVehicleRepository::new(setup().await);

        let id = repo.create(truck(150, -4.5)).await.expect("insert");
        let found = repo.find_by_id(id).await.expect("query").expect("vehicle exists");

        assert_eq!(found.id, id);
        assert_eq!(found.capacity, 150);
        assert_eq!(found.temperature, -4.5);
        assert!(!found.has_ventilation);
        assert!(found.has_sun_protection);
    }

    #[tokio::test]
    async fn list_all_is_ordered_by_id() {
        let repo = SqlVehicleRepository::new(setup().await);
        let a = repo.create(truck(10, 1.0)).await.expect("insert a");
        let b = repo.create(truck(20, 2.0)).await.expect("insert b");
        let c = repo.create(truck(30, 3.0)).await.expect("insert c");

        let ids: Vec<VehicleId> =
            repo.list_all().await.expect("list").into_iter().map(|v| v.id).collect();

        assert_eq!(ids, vec![a, b, c]);
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let repo = SqlVehicleRepository::new(setup().await);
        assert!(repo.list_all().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn non_positive_capacity_is_rejected_by_schema() {
        let pool = setup().await;
        let result = sqlx::query(
            "INSERT INTO transport_vehicle (capacity, temperature, ventilation, sun_protection)
             VALUES (0, 4.0, 'SIM', 'SIM')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn duplicate_primary_key_maps_to_duplicate_error() {
        let pool = setup().await;
        let repo = SqlVehicleRepository::new(pool.clone());
        let id = repo.create(truck(10, 1.0)).await.expect("insert");

        let error = sqlx::query(
            "INSERT INTO transport_vehicle (id, capacity, temperature, ventilation, sun_protection)
             VALUES (?, 5, 4.0, 'SIM', 'SIM')",
        )
        .bind(id.0)
        .execute(&pool)
        .await
        .map_err(RepositoryError::from)
        .expect_err("primary key collision");

        assert!(matches!(error, RepositoryError::Duplicate(_)));
    }
}
