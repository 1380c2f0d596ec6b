//! Vehicle type with capacity, speed, and cost parameters.

use serde::{Deserialize, Serialize};

/// The kind of a vehicle. Determines which overtime rate applies to the
/// worker driving it; routing is otherwise kind-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleKind {
    /// Cargo bike.
    Bike,
    /// Delivery car.
    Car,
}

/// A delivery vehicle.
///
/// Vehicles are immutable for the duration of a run and are referenced by
/// their position in the fleet sequence. That order is significant: the
/// load operators assume vehicles of equal capacity are contiguous.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{Vehicle, VehicleKind};
///
/// let v = Vehicle::new(4, 25.0, 1.5, VehicleKind::Car);
/// assert_eq!(v.capacity(), 4);
/// assert_eq!(v.kind(), VehicleKind::Car);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    capacity: usize,
    speed: f64,
    cost_per_distance: f64,
    kind: VehicleKind,
}

impl Vehicle {
    /// Creates a new vehicle.
    ///
    /// # Arguments
    ///
    /// * `capacity` — Maximum number of destinations carried
    /// * `speed` — Average speed in distance units per hour
    /// * `cost_per_distance` — Operating cost per distance unit
    /// * `kind` — Vehicle kind (selects the overtime rate)
    pub fn new(capacity: usize, speed: f64, cost_per_distance: f64, kind: VehicleKind) -> Self {
        Self {
            capacity,
            speed,
            cost_per_distance,
            kind,
        }
    }

    /// Maximum number of destinations this vehicle can carry.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Average speed in distance units per hour.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Operating cost per distance unit traveled.
    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    /// Vehicle kind.
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }
}
