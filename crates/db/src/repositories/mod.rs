use async_trait::async_trait;
use thiserror::Error;

use agrotrack_core::domain::product::{NewProduct, Product, ProductId};
use agrotrack_core::domain::vehicle::{NewVehicle, Vehicle, VehicleId};
use agrotrack_core::errors::ApplicationError;

pub mod flag;
pub mod memory;
pub mod product;
pub mod vehicle;

pub use memory::{InMemoryProductRepository, InMemoryVehicleRepository};
pub use product::SqlProductRepository;
pub use vehicle::SqlVehicleRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(sqlx::Error),
    #[error("duplicate record: {0}")]
    Duplicate(String),
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::Duplicate(db.message().to_string())
            }
            other => Self::Database(other),
        }
    }
}

/// `ApplicationError::Store` already reads as a database failure, so the
/// connection/query case passes the driver message through unprefixed.
impl From<RepositoryError> for ApplicationError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Database(source) => ApplicationError::Store(source.to_string()),
            other => ApplicationError::Store(other.to_string()),
        }
    }
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: NewProduct) -> Result<ProductId, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: NewVehicle) -> Result<VehicleId, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Vehicle>, RepositoryError>;
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError>;
}

pub(crate) fn decode_count(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::Decode(format!("{column} value {value} is out of range")))
}
