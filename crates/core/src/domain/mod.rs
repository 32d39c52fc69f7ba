pub mod product;
pub mod vehicle;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two record types held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Product,
    Vehicle,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
