use crate::error::{RentalError, Result};
use crate::fleet::{RentalRecord, Renter, Vehicle};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Owner of the whole fleet: vehicles, renters and active rentals.
///
/// Every availability change goes through [`FleetRegistry::rent_vehicle`] and
/// [`FleetRegistry::return_vehicle`], which keep the rule that a vehicle is
/// unavailable exactly when one rental record points at it.
///
/// Example
/// ```
/// use car_rental::FleetRegistry;
/// let mut fleet = FleetRegistry::with_demo_fleet();
/// let renter = fleet.register_renter("Ada").id().to_string();
/// fleet.rent_vehicle("C001", &renter, 2).unwrap();
/// assert!(fleet.find_rented_vehicle("C001").is_some());
/// assert_eq!(fleet.return_vehicle("C001").unwrap().name(), "Ada");
/// ```
#[derive(Debug, Default)]
pub struct FleetRegistry {
    vehicles: Vec<Vehicle>,
    renters: Vec<Renter>,
    rentals: Vec<RentalRecord>,
}

impl FleetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry stocked with the three demo cars the console starts with.
    pub fn with_demo_fleet() -> Self {
        let mut registry = Self::new();
        registry.add_vehicle(Vehicle::new("C001", "Toyota", "Camry", Decimal::new(60, 0)));
        registry.add_vehicle(Vehicle::new("C002", "Honda", "Accord", Decimal::new(70, 0)));
        registry.add_vehicle(Vehicle::new("C003", "Mahindra", "Thar", Decimal::new(150, 0)));
        registry
    }

    /// Ids are not checked for duplicates.
    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        debug!(vehicle = vehicle.id(), "vehicle added to fleet");
        self.vehicles.push(vehicle);
    }

    pub fn add_renter(&mut self, renter: Renter) {
        debug!(renter = renter.id(), "renter added");
        self.renters.push(renter);
    }

    /// Id the next registered renter will get: `CUS` followed by the renter count plus one.
    pub fn next_renter_id(&self) -> String {
        format!("CUS{}", self.renters.len() + 1)
    }

    /// Create a renter with the next sequential id and register it.
    pub fn register_renter(&mut self, name: impl Into<String>) -> &Renter {
        let renter = Renter::new(self.next_renter_id(), name);
        self.add_renter(renter);
        &self.renters[self.renters.len() - 1]
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn available_vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter().filter(|v| v.is_available())
    }

    pub fn renters(&self) -> &[Renter] {
        &self.renters
    }

    pub fn renter(&self, id: &str) -> Option<&Renter> {
        self.renters.iter().find(|r| r.id() == id)
    }

    pub fn rentals(&self) -> &[RentalRecord] {
        &self.rentals
    }

    /// The first rental record, in insertion order, for the given vehicle.
    pub fn active_rental(&self, vehicle_id: &str) -> Option<&RentalRecord> {
        self.rentals.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    pub fn find_available_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id && v.is_available())
    }

    pub fn find_rented_vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id && !v.is_available())
    }

    /// Check `vehicle_id` out to a registered renter for `days` days.
    ///
    /// Fails without touching any state when the vehicle is unknown or already
    /// rented, when the renter is not registered, or when `days` is zero.
    pub fn rent_vehicle(&mut self, vehicle_id: &str, renter_id: &str, days: u32) -> Result<&RentalRecord> {
        if days == 0 {
            return Err(RentalError::InvalidInput(
                "a rental must last at least one day".to_string(),
            ));
        }
        if self.renter(renter_id).is_none() {
            return Err(RentalError::UnknownRenter {
                id: renter_id.to_string(),
            });
        }
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|v| v.id() == vehicle_id && v.is_available())
            .ok_or_else(|| RentalError::VehicleUnavailable {
                id: vehicle_id.to_string(),
            })?;

        vehicle.rent();
        self.rentals.push(RentalRecord::new(vehicle_id, renter_id, days));
        info!(vehicle = vehicle_id, renter = renter_id, days, "vehicle rented");
        Ok(&self.rentals[self.rentals.len() - 1])
    }

    /// Bring a rented vehicle back and close its rental record.
    ///
    /// Returns the renter the vehicle was checked out to. The record list is the
    /// source of truth: a vehicle flagged as rented with no record is reported as
    /// [`RentalError::RentalRecordMissing`] and left as is.
    pub fn return_vehicle(&mut self, vehicle_id: &str) -> Result<Renter> {
        let not_rented = || RentalError::VehicleNotRented {
            id: vehicle_id.to_string(),
        };
        let vehicle_index = self
            .vehicles
            .iter()
            .position(|v| v.id() == vehicle_id && !v.is_available())
            .ok_or_else(not_rented)?;

        let matching = self
            .rentals
            .iter()
            .filter(|r| r.vehicle_id() == vehicle_id)
            .count();
        let Some(record_index) = self.rentals.iter().position(|r| r.vehicle_id() == vehicle_id) else {
            warn!(vehicle = vehicle_id, "vehicle is flagged as rented but has no rental record");
            return Err(RentalError::RentalRecordMissing {
                id: vehicle_id.to_string(),
            });
        };
        if matching > 1 {
            warn!(vehicle = vehicle_id, records = matching, "vehicle has more than one rental record, closing the oldest");
        }

        let renter_id = self.rentals[record_index].renter_id().to_string();
        let renter = self
            .renter(&renter_id)
            .cloned()
            .ok_or(RentalError::UnknownRenter { id: renter_id })?;

        self.vehicles[vehicle_index].return_vehicle();
        self.rentals.remove(record_index);
        info!(vehicle = vehicle_id, renter = renter.id(), "vehicle returned");
        Ok(renter)
    }

    /// Verify that every vehicle is unavailable exactly when one rental record refers to it.
    pub fn check_consistency(&self) -> Result<()> {
        for vehicle in &self.vehicles {
            let records = self
                .rentals
                .iter()
                .filter(|r| r.vehicle_id() == vehicle.id())
                .count();
            let expected = if vehicle.is_available() { 0 } else { 1 };
            if records != expected {
                return Err(RentalError::RentalRecordMissing {
                    id: vehicle.id().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Flip a vehicle to rented without recording a rental, breaking the invariant on purpose.
    #[cfg(test)]
    pub(crate) fn mark_rented_without_record(&mut self, vehicle_id: &str) {
        if let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id() == vehicle_id) {
            vehicle.rent();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fleet_with_renter(name: &str) -> (FleetRegistry, String) {
        let mut fleet = FleetRegistry::with_demo_fleet();
        let id = fleet.register_renter(name).id().to_string();
        (fleet, id)
    }

    #[test]
    fn test_demo_fleet_is_fully_available() {
        let fleet = FleetRegistry::with_demo_fleet();
        let ids: Vec<&str> = fleet.available_vehicles().map(|v| v.id()).collect();
        assert_eq!(ids, vec!["C001", "C002", "C003"]);
        assert_eq!(fleet.vehicles()[2].daily_rate(), Decimal::new(150, 0));
        assert!(fleet.rentals().is_empty());
        assert!(fleet.check_consistency().is_ok());
    }

    #[test]
    fn test_renter_ids_are_sequential() {
        let mut fleet = FleetRegistry::new();
        assert_eq!(fleet.next_renter_id(), "CUS1");
        assert_eq!(fleet.register_renter("Ada").id(), "CUS1");
        assert_eq!(fleet.register_renter("Ada").id(), "CUS2");
        assert_eq!(fleet.next_renter_id(), "CUS3");
        assert_eq!(fleet.renters().len(), 2);
    }

    #[test]
    fn test_rent_then_return_round_trip() {
        let (mut fleet, renter) = fleet_with_renter("Ada");

        let record = fleet.rent_vehicle("C001", &renter, 2).unwrap();
        assert_eq!(record.vehicle_id(), "C001");
        assert_eq!(record.days(), 2);
        assert_eq!(fleet.rentals().len(), 1);
        assert!(fleet.find_available_vehicle("C001").is_none());
        assert!(fleet.find_rented_vehicle("C001").is_some());
        fleet.check_consistency().unwrap();

        let returned_by = fleet.return_vehicle("C001").unwrap();
        assert_eq!(returned_by.name(), "Ada");
        assert!(fleet.active_rental("C001").is_none());
        assert!(fleet.find_available_vehicle("C001").is_some());
        fleet.check_consistency().unwrap();
    }

    #[test]
    fn test_rent_unavailable_vehicle_leaves_state_unchanged() {
        let (mut fleet, first) = fleet_with_renter("Ada");
        fleet.rent_vehicle("C002", &first, 5).unwrap();
        let second = fleet.register_renter("Bob").id().to_string();

        let err = fleet.rent_vehicle("C002", &second, 1).unwrap_err();
        assert_eq!(err, RentalError::VehicleUnavailable { id: "C002".into() });
        assert_eq!(fleet.rentals().len(), 1);
        assert_eq!(fleet.active_rental("C002").unwrap().renter_id(), first);
        assert_eq!(fleet.renters().len(), 2);
        fleet.check_consistency().unwrap();
    }

    #[test]
    fn test_rent_unknown_vehicle_fails() {
        let (mut fleet, renter) = fleet_with_renter("Ada");
        let err = fleet.rent_vehicle("C999", &renter, 1).unwrap_err();
        assert_eq!(err, RentalError::VehicleUnavailable { id: "C999".into() });
        assert!(fleet.rentals().is_empty());
        assert_eq!(fleet.available_vehicles().count(), 3);
    }

    #[test]
    fn test_rent_requires_registered_renter_and_positive_days() {
        let (mut fleet, renter) = fleet_with_renter("Ada");

        let err = fleet.rent_vehicle("C001", "CUS42", 1).unwrap_err();
        assert_eq!(err, RentalError::UnknownRenter { id: "CUS42".into() });

        let err = fleet.rent_vehicle("C001", &renter, 0).unwrap_err();
        assert!(matches!(err, RentalError::InvalidInput(_)));

        assert!(fleet.rentals().is_empty());
        assert!(fleet.find_available_vehicle("C001").is_some());
    }

    #[test]
    fn test_return_available_vehicle_is_not_rented() {
        let mut fleet = FleetRegistry::with_demo_fleet();
        let err = fleet.return_vehicle("C003").unwrap_err();
        assert_eq!(err, RentalError::VehicleNotRented { id: "C003".into() });
        let err = fleet.return_vehicle("nope").unwrap_err();
        assert_eq!(err, RentalError::VehicleNotRented { id: "nope".into() });
        assert!(fleet.vehicles().iter().all(|v| v.is_available()));
        fleet.check_consistency().unwrap();
    }

    #[test]
    fn test_return_without_record_reports_missing_record() {
        let mut fleet = FleetRegistry::with_demo_fleet();
        fleet.mark_rented_without_record("C001");
        assert!(fleet.check_consistency().is_err());

        let err = fleet.return_vehicle("C001").unwrap_err();
        assert_eq!(err, RentalError::RentalRecordMissing { id: "C001".into() });
        // flag untouched
        assert!(fleet.find_rented_vehicle("C001").is_some());
    }

    #[test]
    fn test_record_for_available_vehicle_is_inconsistent() {
        let (mut fleet, renter) = fleet_with_renter("Ada");
        fleet.rentals.push(RentalRecord::new("C003", renter, 1));
        assert_eq!(
            fleet.check_consistency(),
            Err(RentalError::RentalRecordMissing { id: "C003".into() })
        );
        // available vehicles are never "returned", records or not
        assert_eq!(
            fleet.return_vehicle("C003"),
            Err(RentalError::VehicleNotRented { id: "C003".into() })
        );
        assert_eq!(fleet.rentals().len(), 1);
    }

    #[test]
    fn test_vehicle_can_be_rented_again_after_return() {
        let (mut fleet, ada) = fleet_with_renter("Ada");
        fleet.rent_vehicle("C002", &ada, 5).unwrap();
        fleet.return_vehicle("C002").unwrap();

        let bob = fleet.register_renter("Bob").id().to_string();
        fleet.rent_vehicle("C002", &bob, 1).unwrap();
        assert_eq!(fleet.active_rental("C002").unwrap().renter_id(), "CUS2");
        fleet.check_consistency().unwrap();
    }
}
