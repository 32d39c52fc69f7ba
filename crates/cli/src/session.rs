//! The interactive menu loop.
//!
//! A [`Session`] owns the console and the repositories and borrows a runtime
//! that drives every store call to completion before the next prompt.

use std::future::Future;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use agrotrack_core::domain::product::{NewProduct, Product, ProductId};
use agrotrack_core::domain::vehicle::{NewVehicle, Vehicle, VehicleId};
use agrotrack_core::domain::RecordKind;
use agrotrack_core::errors::{ApplicationError, ValidationError};
use agrotrack_core::matching::{check_compatibility, find_product, MatchOutcome};
use agrotrack_db::{ProductRepository, RepositoryError, VehicleRepository};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::console::{Console, ConsoleError};
use crate::export;
use crate::menu::{choice_prompt, render_export_menu, render_main_menu, ExportTarget, MenuAction};
use crate::render::{compatibility_summary, products_table, vehicles_table};

enum Flow {
    Continue,
    Stop,
}

pub struct Session<'rt, P, V, R, W> {
    runtime: &'rt Runtime,
    products: P,
    vehicles: V,
    console: Console<R, W>,
    export_dir: PathBuf,
}

impl<'rt, P, V, R, W> Session<'rt, P, V, R, W>
where
    P: ProductRepository,
    V: VehicleRepository,
    R: BufRead,
    W: Write,
{
    pub fn new(
        runtime: &'rt Runtime,
        products: P,
        vehicles: V,
        console: Console<R, W>,
        export_dir: PathBuf,
    ) -> Self {
        Self { runtime, products, vehicles, console, export_dir }
    }

    /// Runs the menu until the user exits or the input is closed.
    pub fn run(&mut self) -> Result<(), ConsoleError> {
        loop {
            let step = self.choose_action().and_then(|action| self.dispatch(action));
            match step {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => return Ok(()),
                Err(ConsoleError::InputClosed) => {
                    info!(event_name = "session.input_closed", "input closed, leaving menu");
                    return Ok(());
                }
                Err(error) => return Err(error),
            }
        }
    }

    fn choose_action(&mut self) -> Result<MenuAction, ConsoleError> {
        loop {
            self.console.say(render_main_menu())?;
            let answer = self.console.read_line(&choice_prompt())?;
            match answer.parse::<MenuAction>() {
                Ok(action) => return Ok(action),
                Err(_) => {
                    self.console.clear_screen()?;
                    self.console.say("Invalid choice. Try again.")?;
                }
            }
        }
    }

    fn dispatch(&mut self, action: MenuAction) -> Result<Flow, ConsoleError> {
        match action {
            MenuAction::RegisterProduct => self.register_product()?,
            MenuAction::RegisterVehicle => self.register_vehicle()?,
            MenuAction::ListProducts => self.list_products()?,
            MenuAction::ListVehicles => self.list_vehicles()?,
            MenuAction::CheckCompatibility => self.check_compatibility()?,
            MenuAction::Export => self.export()?,
            MenuAction::Exit => {
                self.console.say("Exiting...")?;
                return Ok(Flow::Stop);
            }
        }

        self.console.pause()?;
        self.console.clear_screen()?;
        Ok(Flow::Continue)
    }

    fn register_product(&mut self) -> Result<(), ConsoleError> {
        self.console.say("Register product")?;
        let name = self.console.prompt_text("Product name: ", "name")?;
        let origin = self.console.prompt_text("Origin: ", "origin")?;
        let destination = self.console.prompt_text("Destination: ", "destination")?;
        let quantity = self.console.prompt_positive("Quantity: ", "quantity")?;
        let min_temperature =
            self.console.prompt_number("Minimum temperature: ", "minimum temperature")?;
        let max_temperature = loop {
            let max = self.console.prompt_number("Maximum temperature: ", "maximum temperature")?;
            if max >= min_temperature {
                break max;
            }
            let error = ValidationError::InvertedTemperatureRange { min: min_temperature, max };
            self.console.say(format!("{error}. Try again."))?;
        };
        let requires_ventilation =
            self.console.prompt_yes_no("Requires ventilation? (yes/no): ")?;
        let requires_sun_protection =
            self.console.prompt_yes_no("Requires sun protection? (yes/no): ")?;

        let draft = NewProduct {
            name,
            quantity,
            origin,
            destination,
            min_temperature,
            max_temperature,
            requires_ventilation,
            requires_sun_protection,
        };
        let name = draft.name.clone();

        let created = match draft.validate() {
            Ok(()) => self.store(self.products.create(draft)),
            Err(error) => Err(error.into()),
        };
        match created {
            Ok(id) => {
                info!(event_name = "record.created", kind = %RecordKind::Product, id = id.0);
                self.console.say(format!("Product {name} registered with id {id}."))
            }
            Err(error) => self.report("register_product", &error),
        }
    }

    fn register_vehicle(&mut self) -> Result<(), ConsoleError> {
        self.console.say("Register vehicle")?;
        let capacity = self.console.prompt_positive("Capacity: ", "capacity")?;
        let temperature = self.console.prompt_number("Temperature: ", "temperature")?;
        let has_ventilation = self.console.prompt_yes_no("Has ventilation? (yes/no): ")?;
        let has_sun_protection = self.console.prompt_yes_no("Has sun protection? (yes/no): ")?;

        let draft = NewVehicle { capacity, temperature, has_ventilation, has_sun_protection };
        let created = match draft.validate() {
            Ok(()) => self.store(self.vehicles.create(draft)),
            Err(error) => Err(error.into()),
        };
        match created {
            Ok(id) => {
                info!(event_name = "record.created", kind = %RecordKind::Vehicle, id = id.0);
                self.console.say(format!("Vehicle registered with id {id}."))
            }
            Err(error) => self.report("register_vehicle", &error),
        }
    }

    fn list_products(&mut self) -> Result<(), ConsoleError> {
        let Some(products) = self.load_products()? else {
            return Ok(());
        };
        if products.is_empty() {
            return self.console.say("No products registered.");
        }
        self.console.say("Registered products:")?;
        self.console.say(products_table(&products))
    }

    fn list_vehicles(&mut self) -> Result<(), ConsoleError> {
        let Some(vehicles) = self.load_vehicles()? else {
            return Ok(());
        };
        if vehicles.is_empty() {
            return self.console.say("No vehicles registered.");
        }
        self.console.say("Registered vehicles:")?;
        self.console.say(vehicles_table(&vehicles))
    }

    fn check_compatibility(&mut self) -> Result<(), ConsoleError> {
        let Some(vehicles) = self.load_vehicles()? else {
            return Ok(());
        };
        if vehicles.is_empty() {
            return self.console.say("No vehicles registered, nothing to compare.");
        }

        loop {
            let Some(products) = self.load_products()? else {
                return Ok(());
            };
            if products.is_empty() {
                return self.console.say("No products registered.");
            }
            self.console.say("Registered products:")?;
            self.console.say(products_table(&products))?;

            let answer = self.console.read_line("Product id to check: ")?;
            let checked = match parse_id(&answer) {
                Some(id) => check_compatibility(&products, &vehicles, ProductId(id)),
                None => Err(ApplicationError::not_found(RecordKind::Product, answer.trim())),
            };
            let (product, outcome) = match checked {
                Ok(checked) => checked,
                Err(error) => {
                    self.console.clear_screen()?;
                    self.console.say(error.user_message())?;
                    continue;
                }
            };

            return match outcome {
                MatchOutcome::Compatible(vehicle) => {
                    info!(
                        event_name = "match.found",
                        product_id = product.id.0,
                        vehicle_id = vehicle.id.0,
                        "compatible vehicle found"
                    );
                    self.console.say(compatibility_summary(product, vehicle))
                }
                MatchOutcome::NoMatch => {
                    info!(
                        event_name = "match.none",
                        product_id = product.id.0,
                        vehicles = vehicles.len(),
                        "no compatible vehicle"
                    );
                    self.console.say(format!(
                        "No available vehicle meets every condition for product {}.",
                        product.name
                    ))?;
                    self.console.say(vehicles_table(&vehicles))
                }
                MatchOutcome::NoVehicles => {
                    self.console.say("No vehicles registered, nothing to compare.")
                }
            };
        }
    }

    fn export(&mut self) -> Result<(), ConsoleError> {
        self.console.say(render_export_menu())?;
        let answer = self.console.read_line(&choice_prompt())?;
        match answer.parse::<ExportTarget>() {
            Ok(ExportTarget::Products) => self.export_product(),
            Ok(ExportTarget::Vehicles) => self.export_vehicle(),
            Err(_) => self.console.say("Invalid choice."),
        }
    }

    fn export_product(&mut self) -> Result<(), ConsoleError> {
        let Some(products) = self.load_products()? else {
            return Ok(());
        };
        if products.is_empty() {
            return self.console.say("No products registered, nothing to export.");
        }
        self.console.say(products_table(&products))?;

        let answer = self.console.read_line("Product id to save: ")?;
        let Some(product) =
            parse_id(&answer).and_then(|id| find_product(&products, ProductId(id)).ok())
        else {
            return self.console.say("Invalid product id.");
        };

        match export::export_product(&self.export_dir, product) {
            Ok(path) => self.console.say(format!("Product saved to {}.", path.display())),
            Err(error) => {
                warn!(event_name = "export.failed", error = %error, "product export failed");
                self.console.say(format!("Could not save product: {error}"))
            }
        }
    }

    fn export_vehicle(&mut self) -> Result<(), ConsoleError> {
        let Some(vehicles) = self.load_vehicles()? else {
            return Ok(());
        };
        if vehicles.is_empty() {
            return self.console.say("No vehicles registered, nothing to export.");
        }
        self.console.say(vehicles_table(&vehicles))?;

        let answer = self.console.read_line("Vehicle id to save: ")?;
        let Some(vehicle) = parse_id(&answer)
            .and_then(|id| vehicles.iter().find(|vehicle| vehicle.id == VehicleId(id)))
        else {
            return self.console.say("Invalid vehicle id.");
        };

        match export::export_vehicle(&self.export_dir, vehicle) {
            Ok(path) => self.console.say(format!("Vehicle saved to {}.", path.display())),
            Err(error) => {
                warn!(event_name = "export.failed", error = %error, "vehicle export failed");
                self.console.say(format!("Could not save vehicle: {error}"))
            }
        }
    }

    /// `None` means the store failed and the user has already been told.
    fn load_products(&mut self) -> Result<Option<Vec<Product>>, ConsoleError> {
        match self.store(self.products.list_all()) {
            Ok(products) => Ok(Some(products)),
            Err(error) => self.report("list_products", &error).map(|()| None),
        }
    }

    fn load_vehicles(&mut self) -> Result<Option<Vec<Vehicle>>, ConsoleError> {
        match self.store(self.vehicles.list_all()) {
            Ok(vehicles) => Ok(Some(vehicles)),
            Err(error) => self.report("list_vehicles", &error).map(|()| None),
        }
    }

    fn store<T>(
        &self,
        operation: impl Future<Output = Result<T, RepositoryError>>,
    ) -> Result<T, ApplicationError> {
        self.runtime.block_on(operation).map_err(ApplicationError::from)
    }

    fn report(&mut self, operation: &'static str, error: &ApplicationError) -> Result<(), ConsoleError> {
        warn!(event_name = "session.operation_failed", operation, error = %error, "operation failed");
        self.console.say(error.user_message())
    }
}

fn parse_id(answer: &str) -> Option<i64> {
    answer.trim().parse().ok()
}
