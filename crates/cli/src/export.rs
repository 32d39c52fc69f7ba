use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use agrotrack_core::domain::product::Product;
use agrotrack_core::domain::vehicle::Vehicle;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write `{path}`: {source}")]
    Write { path: PathBuf, source: io::Error },
}

pub fn product_file_name(product: &Product) -> String {
    let name: String =
        product.name.chars().map(|c| if matches!(c, '/' | '\\') { '_' } else { c }).collect();
    format!("product_{name}.json")
}

pub fn vehicle_file_name(vehicle: &Vehicle) -> String {
    format!("vehicle_{}.json", vehicle.id)
}

pub fn export_product(directory: &Path, product: &Product) -> Result<PathBuf, ExportError> {
    write_json(directory.join(product_file_name(product)), product)
}

pub fn export_vehicle(directory: &Path, vehicle: &Vehicle) -> Result<PathBuf, ExportError> {
    write_json(directory.join(vehicle_file_name(vehicle)), vehicle)
}

fn write_json<T: Serialize>(path: PathBuf, record: &T) -> Result<PathBuf, ExportError> {
    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
    record.serialize(&mut serializer)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|source| ExportError::Write { path: path.clone(), source })?;
    }
    fs::write(&path, buffer).map_err(|source| ExportError::Write { path: path.clone(), source })?;

    tracing::info!(event_name = "export.written", path = %path.display(), "record exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use agrotrack_core::domain::product::{Product, ProductId};
    use agrotrack_core::domain::vehicle::{Vehicle, VehicleId};

    use super::{export_product, export_vehicle, product_file_name, ExportError};

    fn product(name: &str) -> Product {
        Product {
            id: ProductId(1),
            name: name.to_string(),
            quantity: 100,
            origin: "Sorriso".to_string(),
            destination: "Paranaguá".to_string(),
            min_temperature: 2.0,
            max_temperature: 8.0,
            requires_ventilation: true,
            requires_sun_protection: false,
        }
    }

    #[test]
    fn product_export_round_trips_with_native_booleans() {
        let dir = tempfile::tempdir().expect("tempdir");
        let original = product("Corn");

        let path = export_product(dir.path(), &original).expect("export");
        assert_eq!(path, dir.path().join("product_Corn.json"));

        let text = fs::read_to_string(&path).expect("read back");
        assert!(text.contains("\n    \"requires_ventilation\": true"));
        let restored: Product = serde_json::from_str(&text).expect("parse back");
        assert_eq!(restored, original);
    }

    #[test]
    fn vehicle_export_is_named_by_id() {
        let dir = tempfile::tempdir().expect("tempdir");
        let vehicle = Vehicle {
            id: VehicleId(9),
            capacity: 300,
            temperature: -18.0,
            has_ventilation: false,
            has_sun_protection: true,
        };

        let path = export_vehicle(dir.path(), &vehicle).expect("export");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("vehicle_9.json"));

        let restored: Vehicle =
            serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("parse");
        assert_eq!(restored, vehicle);
    }

    #[test]
    fn path_separators_in_names_stay_inside_the_directory() {
        assert_eq!(product_file_name(&product("beans/black")), "product_beans_black.json");
        assert_eq!(product_file_name(&product("..\\up")), "product_.._up.json");
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("exports").join("today");

        let path = export_product(&nested, &product("Rice")).expect("export");
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn unwritable_target_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("taken");
        fs::write(&blocker, b"not a directory").expect("write blocker");

        let error = export_product(&blocker, &product("Wheat")).expect_err("must fail");
        assert!(matches!(error, ExportError::Write { .. }));
        assert!(error.to_string().contains("product_Wheat.json"));
    }
}
