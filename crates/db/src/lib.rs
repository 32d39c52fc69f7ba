pub mod connection;
pub mod migrations;
pub mod repositories;

pub use connection::{connect_existing, connect_with_settings, DbPool};
pub use repositories::{
    InMemoryProductRepository, InMemoryVehicleRepository, ProductRepository, RepositoryError,
    SqlProductRepository, SqlVehicleRepository, VehicleRepository,
};
