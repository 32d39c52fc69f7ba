pub mod config;
pub mod domain;
pub mod errors;
pub mod matching;

pub use domain::product::{NewProduct, Product, ProductId};
pub use domain::vehicle::{NewVehicle, Vehicle, VehicleId};
pub use domain::RecordKind;
pub use errors::{ApplicationError, ValidationError};
pub use matching::{
    assess, check_compatibility, find_compatible_vehicle, find_product, CompatibilityReport,
    MatchOutcome,
};
