use thiserror::Error;

/// Everything that can go wrong while renting or returning a vehicle.
///
/// None of these are fatal: the interaction loop reports them and goes back to
/// the main menu.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    /// Operator typed something the menu cannot use (bad choice, bad number).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("vehicle '{id}' is not available for rent")]
    VehicleUnavailable { id: String },

    #[error("vehicle '{id}' is not rented")]
    VehicleNotRented { id: String },

    /// The availability flag and the rental records disagree about this vehicle.
    #[error("vehicle '{id}' availability does not match its rental records")]
    RentalRecordMissing { id: String },

    #[error("renter '{id}' is not registered")]
    UnknownRenter { id: String },
}

pub type Result<T> = std::result::Result<T, RentalError>;
