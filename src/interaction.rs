use crate::config::{RenterRegistration, Settings};
use crate::fleet::Renter;
use crate::io_adapters::LineSource;
use crate::menu::{self, MenuChoice};
use crate::registry::FleetRegistry;
use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};

/// Where the menu is between two operator inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    MainMenu,
    RentFlow,
    ReturnFlow,
    Terminated,
}

/// The text-menu driver: reads operator choices, runs them against a
/// [`FleetRegistry`] and prints the outcome.
///
/// Input and output are passed to [`InteractionLoop::run`], so the same loop
/// serves a terminal session or a scripted one.
///
/// Example
/// ```
/// use car_rental::InteractionLoop;
/// use car_rental::io_adapters::ReaderInput;
/// use std::io::Cursor;
///
/// let mut session = InteractionLoop::default();
/// let mut input = ReaderInput::new(Cursor::new("1\nAda\nC001\n3\ny\n3\n"));
/// let mut out = Vec::new();
/// session.run(&mut input, &mut out).unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("Total Price: $180.00"));
/// assert!(session.registry().find_rented_vehicle("C001").is_some());
/// ```
pub struct InteractionLoop {
    registry: FleetRegistry,
    settings: Settings,
}

impl InteractionLoop {
    pub fn new(registry: FleetRegistry, settings: Settings) -> Self {
        Self { registry, settings }
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> FleetRegistry {
        self.registry
    }

    /// Serve the menu until the operator picks "Exit" or input runs out.
    ///
    /// Operator mistakes never end the loop; only I/O errors on `input` or `out`
    /// are returned.
    pub fn run(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<()> {
        let mut state = State::MainMenu;
        while state != State::Terminated {
            state = match state {
                State::MainMenu => self.main_menu(input, out)?,
                State::RentFlow => self.rent_flow(input, out)?,
                State::ReturnFlow => self.return_flow(input, out)?,
                State::Terminated => State::Terminated,
            };
        }
        writeln!(out, "\nThank you for using the Car Rental System!")?;
        out.flush()?;
        Ok(())
    }

    fn main_menu(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<State> {
        writeln!(out, "----- Car Rental System -----")?;
        writeln!(out, "1. Rent a Car")?;
        writeln!(out, "2. Return a Car")?;
        writeln!(out, "3. Exit")?;
        let Some(line) = ask(input, out, "Enter your Choice:")? else {
            return Ok(end_of_input());
        };

        match line.parse::<MenuChoice>() {
            Ok(MenuChoice::Rent) => Ok(State::RentFlow),
            Ok(MenuChoice::Return) => Ok(State::ReturnFlow),
            Ok(MenuChoice::Exit) => Ok(State::Terminated),
            Err(err) => {
                debug!(%err, "menu choice rejected");
                writeln!(out, "Invalid choice. Please enter a valid option.")?;
                Ok(State::MainMenu)
            }
        }
    }

    fn rent_flow(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<State> {
        writeln!(out, "\n--- Rent a Car ---\n")?;
        let Some(name) = ask(input, out, "Enter your name:")? else {
            return Ok(end_of_input());
        };

        writeln!(out, "\nAvailable Cars:")?;
        for vehicle in self.registry.available_vehicles() {
            writeln!(out, "{} - {} - {}", vehicle.id(), vehicle.brand(), vehicle.model())?;
        }

        let Some(vehicle_id) = ask(input, out, "\nEnter the car ID you want to rent:")? else {
            return Ok(end_of_input());
        };
        let Some(days) = ask(input, out, "Enter the number of days for rental:")? else {
            return Ok(end_of_input());
        };
        let days = match menu::parse_days(&days) {
            Ok(days) => days,
            Err(err) => {
                debug!(%err, "day count rejected");
                writeln!(out, "Invalid number of days. Please enter a whole number greater than zero.")?;
                return Ok(State::MainMenu);
            }
        };

        // Renter registration happens before the vehicle is even looked up,
        // unless configured to wait for a confirmed rental.
        let renter = match self.settings.renter_registration {
            RenterRegistration::EveryAttempt => self.registry.register_renter(name).clone(),
            RenterRegistration::OnConfirmedRental => Renter::new(self.registry.next_renter_id(), name),
        };

        let Some(vehicle) = self.registry.find_available_vehicle(&vehicle_id) else {
            debug!(vehicle = %vehicle_id, "requested vehicle is not available");
            writeln!(out, "Invalid car selection or car not available for rent.")?;
            return Ok(State::MainMenu);
        };
        let price = vehicle.calculate_price(days);
        let car = format!("{} {}", vehicle.brand(), vehicle.model());

        writeln!(out, "\n--- Rental Information ---\n")?;
        writeln!(out, "Customer ID: {}", renter.id())?;
        writeln!(out, "Customer Name: {}", renter.name())?;
        writeln!(out, "Car: {}", car)?;
        writeln!(out, "Rental Days: {}", days)?;
        writeln!(out, "Total Price: ${:.2}", price)?;

        let Some(confirm) = ask(input, out, "\nConfirm rental (Y/N):")? else {
            return Ok(end_of_input());
        };
        if !confirm.eq_ignore_ascii_case("y") {
            writeln!(out, "\nRental canceled.")?;
            return Ok(State::MainMenu);
        }

        if self.settings.renter_registration == RenterRegistration::OnConfirmedRental {
            self.registry.add_renter(renter.clone());
        }
        match self.registry.rent_vehicle(&vehicle_id, renter.id(), days) {
            Ok(_) => writeln!(out, "\nCar rented successfully.")?,
            Err(err) => {
                warn!(%err, vehicle = %vehicle_id, "confirmed rental failed");
                writeln!(out, "\nRental failed: {}", err)?;
            }
        }
        Ok(State::MainMenu)
    }

    fn return_flow(&mut self, input: &mut dyn LineSource, out: &mut dyn Write) -> Result<State> {
        writeln!(out, "\n--- Return a Car ---\n")?;
        let Some(vehicle_id) = ask(input, out, "Enter the car ID you want to return:")? else {
            return Ok(end_of_input());
        };

        if self.registry.find_rented_vehicle(&vehicle_id).is_none() {
            writeln!(out, "Invalid car ID or car is not rented.")?;
            return Ok(State::MainMenu);
        }

        match self.registry.return_vehicle(&vehicle_id) {
            Ok(renter) => writeln!(out, "Car returned successfully by {}", renter.name())?,
            Err(err) => {
                debug!(%err, vehicle = %vehicle_id, "return rejected");
                writeln!(out, "Car was not rented or rental information is missing.")?;
            }
        }
        Ok(State::MainMenu)
    }
}

impl Default for InteractionLoop {
    /// A session over the demo fleet with default settings.
    fn default() -> Self {
        Self::new(FleetRegistry::with_demo_fleet(), Settings::default())
    }
}

/// Print `prompt` on its own line and read the operator's answer, trimmed.
fn ask(input: &mut dyn LineSource, out: &mut dyn Write, prompt: &str) -> Result<Option<String>> {
    writeln!(out, "{}", prompt)?;
    out.flush()?;
    Ok(input.next_line()?.map(|line| line.trim().to_string()))
}

fn end_of_input() -> State {
    debug!("operator input closed");
    State::Terminated
}
