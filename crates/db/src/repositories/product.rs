use sqlx::Row;
use tracing::debug;

use agrotrack_core::domain::product::{NewProduct, Product, ProductId};

use super::flag::{flag_as_str, parse_flag};
use super::{decode_count, ProductRepository, RepositoryError};
use crate::DbPool;

pub struct SqlProductRepository {
    pool: DbPool,
}

impl SqlProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_product(row: &sqlx::sqlite::SqliteRow) -> Result<Product, RepositoryError> {
    let id: i64 = row.try_get("id").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let name: String = row.try_get("name").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let quantity: i64 =
        row.try_get("quantity").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let origin: String =
        row.try_get("origin").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let destination: String =
        row.try_get("destination").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let min_temperature: f64 =
        row.try_get("min_temperature").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let max_temperature: f64 =
        row.try_get("max_temperature").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let ventilation: String =
        row.try_get("ventilation").map_err(|e| RepositoryError::Decode(e.to_string()))?;
    let sun_protection: String =
        row.try_get("sun_protection").map_err(|e| RepositoryError::Decode(e.to_string()))?;

    Ok(Product {
        id: ProductId(id),
        name,
        quantity: decode_count("quantity", quantity)?,
        origin,
        destination,
        min_temperature,
        max_temperature,
        requires_ventilation: parse_flag("ventilation", &ventilation)?,
        requires_sun_protection: parse_flag("sun_protection", &sun_protection)?,
    })
}

#[async_trait::async_trait]
impl ProductRepository for SqlProductRepository {
    async fn create(&self, product: NewProduct) -> Result<ProductId, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO agricultural_product (name, quantity, origin, destination,
                                               min_temperature, max_temperature,
                                               ventilation, sun_protection)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(i64::from(product.quantity))
        .bind(&product.origin)
        .bind(&product.destination)
        .bind(product.min_temperature)
        .bind(product.max_temperature)
        .bind(flag_as_str(product.requires_ventilation))
        .bind(flag_as_str(product.requires_sun_protection))
        .execute(&self.pool)
        .await?;

        let id = ProductId(result.last_insert_rowid());
        debug!(event_name = "store.product.inserted", product_id = id.0, "product row inserted");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<sqlx::sqlite::SqliteRow> = sqlx::query(
            "SELECT id, name, quantity, origin, destination, min_temperature, max_temperature,
                    ventilation, sun_protection
             FROM agricultural_product ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect::<Result<Vec<_>, _>>()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, quantity, origin, destination, min_temperature, max_temperature,
                    ventilation, sun_protection
             FROM agricultural_product WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(ref r) => Ok(Some(row_to_product(r)?)),
            None => Ok(None),
        }
    }
}
