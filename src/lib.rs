//! A small console car rental desk.
//!
//! The crate keeps a fleet of vehicles in memory, prices rentals at a flat daily
//! rate, and records which renter has which car. [`FleetRegistry`] owns all of
//! that state and enforces the one rule that matters: a vehicle is unavailable
//! exactly when one rental record points at it.
//!
//! [`InteractionLoop`] is the text menu on top. It reads lines from any
//! [`io_adapters::LineSource`] (the `rustyline` editor in a terminal, a plain
//! reader when piped) and writes to any `Write`, which keeps it testable.

pub mod config;
pub mod error;
pub mod fleet;
mod interaction;
pub mod io_adapters;
pub mod logging;
pub mod menu;
mod registry;

pub use error::RentalError;
pub use fleet::{RentalRecord, Renter, Vehicle};
pub use interaction::InteractionLoop;
pub use registry::FleetRegistry;
