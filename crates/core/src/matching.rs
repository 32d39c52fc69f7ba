//! Product/vehicle compatibility.
//!
//! A vehicle can carry a product when it has room for the whole quantity, runs
//! at a temperature inside the product's inclusive range, and matches the
//! product's ventilation and sun protection flags exactly.

use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::domain::vehicle::Vehicle;
use crate::domain::RecordKind;
use crate::errors::ApplicationError;

/// Outcome of each individual check for one product/vehicle pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub capacity_ok: bool,
    pub temperature_ok: bool,
    pub ventilation_ok: bool,
    pub sun_protection_ok: bool,
}

impl CompatibilityReport {
    pub fn is_compatible(&self) -> bool {
        self.capacity_ok && self.temperature_ok && self.ventilation_ok && self.sun_protection_ok
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatchOutcome<'a> {
    Compatible(&'a Vehicle),
    NoMatch,
    NoVehicles,
}

pub fn assess(product: &Product, vehicle: &Vehicle) -> CompatibilityReport {
    CompatibilityReport {
        capacity_ok: vehicle.capacity >= product.quantity,
        temperature_ok: product.temperature_range().contains(&vehicle.temperature),
        ventilation_ok: vehicle.has_ventilation == product.requires_ventilation,
        sun_protection_ok: vehicle.has_sun_protection == product.requires_sun_protection,
    }
}

/// Returns the first vehicle, in the given order, that satisfies every check.
pub fn find_compatible_vehicle<'a>(product: &Product, vehicles: &'a [Vehicle]) -> MatchOutcome<'a> {
    if vehicles.is_empty() {
        return MatchOutcome::NoVehicles;
    }

    vehicles
        .iter()
        .find(|vehicle| assess(product, vehicle).is_compatible())
        .map_or(MatchOutcome::NoMatch, MatchOutcome::Compatible)
}

pub fn find_product(products: &[Product], id: ProductId) -> Result<&Product, ApplicationError> {
    products
        .iter()
        .find(|product| product.id == id)
        .ok_or_else(|| ApplicationError::not_found(RecordKind::Product, id))
}

/// Looks the product up by id and then runs the matcher. An unknown id is an
/// error, never a `NoMatch`.
pub fn check_compatibility<'p, 'v>(
    products: &'p [Product],
    vehicles: &'v [Vehicle],
    product_id: ProductId,
) -> Result<(&'p Product, MatchOutcome<'v>), ApplicationError> {
    let product = find_product(products, product_id)?;
    Ok((product, find_compatible_vehicle(product, vehicles)))
}
