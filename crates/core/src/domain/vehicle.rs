use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub i64);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered transport vehicle. `temperature` is the single temperature the
/// cargo area operates at, not a range.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub capacity: u32,
    pub temperature: f64,
    pub has_ventilation: bool,
    pub has_sun_protection: bool,
}

impl Vehicle {
    pub fn from_new(id: VehicleId, new: NewVehicle) -> Self {
        Self {
            id,
            capacity: new.capacity,
            temperature: new.temperature,
            has_ventilation: new.has_ventilation,
            has_sun_protection: new.has_sun_protection,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub capacity: u32,
    pub temperature: f64,
    pub has_ventilation: bool,
    pub has_sun_protection: bool,
}

impl NewVehicle {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 {
            return Err(ValidationError::NonPositive { field: "capacity" });
        }
        if !self.temperature.is_finite() {
            return Err(ValidationError::InvalidNumber {
                field: "temperature",
                input: self.temperature.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NewVehicle;
    use crate::errors::ValidationError;

    #[test]
    fn rejects_zero_capacity() {
        let vehicle = NewVehicle {
            capacity: 0,
            temperature: 5.0,
            has_ventilation: true,
            has_sun_protection: true,
        };
        assert_eq!(vehicle.validate(), Err(ValidationError::NonPositive { field: "capacity" }));
    }

    #[test]
    fn rejects_nan_temperature() {
        let vehicle = NewVehicle {
            capacity: 10,
            temperature: f64::NAN,
            has_ventilation: false,
            has_sun_protection: false,
        };
        assert!(matches!(
            vehicle.validate(),
            Err(ValidationError::InvalidNumber { field: "temperature", .. })
        ));
    }
}
