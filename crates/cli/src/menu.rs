use std::str::FromStr;

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    RegisterProduct,
    RegisterVehicle,
    ListProducts,
    ListVehicles,
    CheckCompatibility,
    Export,
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    Products,
    Vehicles,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid choice `{0}`")]
pub struct InvalidChoice(pub String);

impl MenuAction {
    pub const ALL: [MenuAction; 7] = [
        MenuAction::RegisterProduct,
        MenuAction::RegisterVehicle,
        MenuAction::ListProducts,
        MenuAction::ListVehicles,
        MenuAction::CheckCompatibility,
        MenuAction::Export,
        MenuAction::Exit,
    ];

    pub fn number(self) -> u8 {
        match self {
            Self::RegisterProduct => 1,
            Self::RegisterVehicle => 2,
            Self::ListProducts => 3,
            Self::ListVehicles => 4,
            Self::CheckCompatibility => 5,
            Self::Export => 6,
            Self::Exit => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::RegisterProduct => "Register product",
            Self::RegisterVehicle => "Register vehicle",
            Self::ListProducts => "List products",
            Self::ListVehicles => "List vehicles",
            Self::CheckCompatibility => "Check delivery compatibility",
            Self::Export => "Save to JSON",
            Self::Exit => "Exit",
        }
    }
}

impl FromStr for MenuAction {
    type Err = InvalidChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        trimmed
            .parse::<u8>()
            .ok()
            .and_then(|number| Self::ALL.into_iter().find(|action| action.number() == number))
            .ok_or_else(|| InvalidChoice(trimmed.to_string()))
    }
}

impl FromStr for ExportTarget {
    type Err = InvalidChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" => Ok(Self::Products),
            "2" => Ok(Self::Vehicles),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

const MARGIN: &str = "            ";

pub fn render_main_menu() -> String {
    let mut lines = vec![String::new()];
    for action in MenuAction::ALL {
        lines.push(format!("{MARGIN}[{}] - {}", action.number(), action.label()));
    }
    lines.push(String::new());
    lines.join("\n")
}

pub fn choice_prompt() -> String {
    format!("{MARGIN}Choice: ")
}

pub fn render_export_menu() -> String {
    ["", "        Choose:", "        [1] - Save products", "        [2] - Save vehicles", ""].join("\n")
}
