use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered agricultural product together with its transport requirements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub origin: String,
    pub destination: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub requires_ventilation: bool,
    pub requires_sun_protection: bool,
}

impl Product {
    pub fn from_new(id: ProductId, new: NewProduct) -> Self {
        Self {
            id,
            name: new.name,
            quantity: new.quantity,
            origin: new.origin,
            destination: new.destination,
            min_temperature: new.min_temperature,
            max_temperature: new.max_temperature,
            requires_ventilation: new.requires_ventilation,
            requires_sun_protection: new.requires_sun_protection,
        }
    }

    /// Inclusive band of operating temperatures the product tolerates.
    pub fn temperature_range(&self) -> RangeInclusive<f64> {
        self.min_temperature..=self.max_temperature
    }
}

/// Product data collected at registration, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub quantity: u32,
    pub origin: String,
    pub destination: String,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub requires_ventilation: bool,
    pub requires_sun_protection: bool,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("origin", &self.origin)?;
        require_text("destination", &self.destination)?;

        if self.quantity == 0 {
            return Err(ValidationError::NonPositive { field: "quantity" });
        }
        if !self.min_temperature.is_finite() {
            return Err(ValidationError::InvalidNumber {
                field: "min_temperature",
                input: self.min_temperature.to_string(),
            });
        }
        if !self.max_temperature.is_finite() {
            return Err(ValidationError::InvalidNumber {
                field: "max_temperature",
                input: self.max_temperature.to_string(),
            });
        }
        if self.max_temperature < self.min_temperature {
            return Err(ValidationError::InvertedTemperatureRange {
                min: self.min_temperature,
                max: self.max_temperature,
            });
        }

        Ok(())
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}
