use rust_decimal::Decimal;

/// A car that can be rented out.
///
/// Identity and descriptive fields never change after construction; only the
/// availability flag moves, and only through [`crate::FleetRegistry`].
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id: String,
    brand: String,
    model: String,
    daily_rate: Decimal,
    available: bool,
}

impl Vehicle {
    /// Create a vehicle that is available for rent.
    pub fn new(
        id: impl Into<String>,
        brand: impl Into<String>,
        model: impl Into<String>,
        daily_rate: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
            model: model.into(),
            daily_rate,
            available: true,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Total price of renting this vehicle for `days` days at the flat daily rate.
    pub fn calculate_price(&self, days: u32) -> Decimal {
        self.daily_rate * Decimal::from(days)
    }

    // No guard here: the registry never rents an unavailable vehicle.
    pub(crate) fn rent(&mut self) {
        self.available = false;
    }

    pub(crate) fn return_vehicle(&mut self) {
        self.available = true;
    }
}

/// A party asking for a vehicle. One is created per rental attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renter {
    id: String,
    name: String,
}

impl Renter {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An active rental: which vehicle went to which renter, and for how long.
///
/// Holds the ids of a [`Vehicle`] and a [`Renter`] owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalRecord {
    vehicle_id: String,
    renter_id: String,
    days: u32,
}

impl RentalRecord {
    pub(crate) fn new(vehicle_id: impl Into<String>, renter_id: impl Into<String>, days: u32) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            renter_id: renter_id.into(),
            days,
        }
    }

    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    pub fn renter_id(&self) -> &str {
        &self.renter_id
    }

    pub fn days(&self) -> u32 {
        self.days
    }
}
