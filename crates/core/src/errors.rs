use thiserror::Error;

use crate::domain::RecordKind;

/// Rejected user input. Always recoverable by asking again.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("{field} must be a positive number")]
    NonPositive { field: &'static str },
    #[error("`{input}` is not a valid number for {field}")]
    InvalidNumber { field: &'static str, input: String },
    #[error("maximum temperature {max} is below minimum temperature {min}")]
    InvertedTemperatureRange { min: f64, max: f64 },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApplicationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{kind} with id {id} was not found")]
    NotFound { kind: RecordKind, id: String },
    #[error("store failure: {0}")]
    Store(String),
}

impl ApplicationError {
    pub fn not_found(kind: RecordKind, id: impl ToString) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(error) => format!("Invalid input: {error}."),
            Self::NotFound { kind: RecordKind::Product, id } => {
                format!("Product with id {id} not found.")
            }
            Self::NotFound { kind: RecordKind::Vehicle, id } => {
                format!("Vehicle with id {id} not found.")
            }
            Self::Store(message) => format!("Database error: {message}"),
        }
    }
}
