use std::collections::BTreeMap;

use tokio::sync::RwLock;

use agrotrack_core::domain::product::{NewProduct, Product, ProductId};
use agrotrack_core::domain::vehicle::{NewVehicle, Vehicle, VehicleId};

use super::{ProductRepository, RepositoryError, VehicleRepository};

/// Rows keyed by id, plus the last id handed out. Ids are never reused.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self { rows: BTreeMap::new(), last_id: 0 }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Table<Product>>,
}

#[async_trait::async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: NewProduct) -> Result<ProductId, RepositoryError> {
        let mut table = self.products.write().await;
        let id = ProductId(table.next_id());
        table.rows.insert(id.0, Product::from_new(id, product));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let table = self.products.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let table = self.products.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<Table<Vehicle>>,
}

#[async_trait::async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, vehicle: NewVehicle) -> Result<VehicleId, RepositoryError> {
        let mut table = self.vehicles.write().await;
        let id = VehicleId(table.next_id());
        table.rows.insert(id.0, Vehicle::from_new(id, vehicle));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        let table = self.vehicles.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        let table = self.vehicles.read().await;
        Ok(table.rows.get(&id.0).cloned())
    }
}
