//! Problem instance: the validated input to the solver.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Destination, TimeRange, Timestamp, Vehicle, VehicleKind, Worker};

/// Cost rates applied when pricing a route.
///
/// Overtime rates are per fractional hour past the shift end, chosen by the
/// vehicle kind; the late-delivery penalty is charged per whole-or-partial
/// hour of lateness, per late stop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostRates {
    overtime_bike: f64,
    overtime_car: f64,
    late_delivery: f64,
}

impl CostRates {
    /// Creates a new rate set.
    pub fn new(overtime_bike: f64, overtime_car: f64, late_delivery: f64) -> Self {
        Self {
            overtime_bike,
            overtime_car,
            late_delivery,
        }
    }

    /// Overtime rate for bike routes, per hour past shift end.
    pub fn overtime_bike(&self) -> f64 {
        self.overtime_bike
    }

    /// Overtime rate for car routes, per hour past shift end.
    pub fn overtime_car(&self) -> f64 {
        self.overtime_car
    }

    /// Late-delivery penalty per whole-or-partial hour, per late stop.
    pub fn late_delivery(&self) -> f64 {
        self.late_delivery
    }
}

/// A precondition violation detected while assembling a [`Problem`].
///
/// These are caller errors reported before the solver starts, never
/// conditions the solver recovers from mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    /// No destinations to deliver.
    EmptyDestinations,
    /// No vehicles in the fleet.
    EmptyFleet,
    /// The fleet cannot carry all destinations.
    InsufficientCapacity {
        /// Number of destinations to carry.
        required: usize,
        /// Total fleet capacity.
        available: usize,
    },
    /// Not every vehicle can be assigned a distinct driver.
    NotEnoughWorkers {
        /// Workers in the pool.
        workers: usize,
        /// Vehicles in the fleet.
        vehicles: usize,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::EmptyDestinations => write!(f, "destination set is empty"),
            ProblemError::EmptyFleet => write!(f, "fleet is empty"),
            ProblemError::InsufficientCapacity {
                required,
                available,
            } => write!(
                f,
                "fleet capacity {available} cannot carry {required} destinations"
            ),
            ProblemError::NotEnoughWorkers { workers, vehicles } => {
                write!(f, "{workers} workers cannot drive {vehicles} vehicles")
            }
        }
    }
}

impl Error for ProblemError {}

/// A validated delivery-routing problem instance.
///
/// Bundles the destinations, fleet, worker pool, depot, shift and break
/// windows, reference start time, and cost rates. Construction fails fast
/// on inputs no valid chromosome can exist for; everything downstream may
/// rely on those preconditions.
///
/// Defaults: shift 09:00–17:00, break 13:00–14:00, start at shift start,
/// all rates zero.
///
/// # Examples
///
/// ```
/// use fleet_routing::models::{
///     CostRates, Destination, Problem, TimeRange, Timestamp, Vehicle, VehicleKind, Worker,
/// };
///
/// let destinations = vec![
///     Destination::new(0, 1, 0, Timestamp::from_hm(12, 0)),
///     Destination::new(1, 1, 1, Timestamp::from_hm(12, 0)),
/// ];
/// let fleet = vec![Vehicle::new(2, 10.0, 1.0, VehicleKind::Car)];
/// let workers = vec![Worker::new(0, false)];
///
/// let problem = Problem::new(destinations, fleet, workers, Destination::depot(0, 0))
///     .unwrap()
///     .with_rates(CostRates::new(5.0, 8.0, 20.0));
/// assert_eq!(problem.num_destinations(), 2);
/// assert_eq!(problem.num_vehicles(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    destinations: Vec<Destination>,
    fleet: Vec<Vehicle>,
    workers: Vec<Worker>,
    depot: Destination,
    shift: TimeRange,
    break_window: TimeRange,
    start_time: Timestamp,
    rates: CostRates,
}

impl Problem {
    /// Assembles a problem instance, validating solver preconditions.
    ///
    /// # Errors
    ///
    /// Returns a [`ProblemError`] if the destination set or fleet is empty,
    /// total fleet capacity is below the destination count, or there are
    /// fewer workers than vehicles.
    pub fn new(
        destinations: Vec<Destination>,
        fleet: Vec<Vehicle>,
        workers: Vec<Worker>,
        depot: Destination,
    ) -> Result<Self, ProblemError> {
        if destinations.is_empty() {
            return Err(ProblemError::EmptyDestinations);
        }
        if fleet.is_empty() {
            return Err(ProblemError::EmptyFleet);
        }
        let available: usize = fleet.iter().map(|v| v.capacity()).sum();
        if available < destinations.len() {
            return Err(ProblemError::InsufficientCapacity {
                required: destinations.len(),
                available,
            });
        }
        if workers.len() < fleet.len() {
            return Err(ProblemError::NotEnoughWorkers {
                workers: workers.len(),
                vehicles: fleet.len(),
            });
        }

        let shift = TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0))
            .expect("default shift is valid");
        let break_window = TimeRange::new(Timestamp::from_hm(13, 0), Timestamp::from_hm(14, 0))
            .expect("default break is valid");

        Ok(Self {
            destinations,
            fleet,
            workers,
            depot,
            start_time: shift.start(),
            shift,
            break_window,
            rates: CostRates::default(),
        })
    }

    /// Sets the shift window.
    pub fn with_shift(mut self, shift: TimeRange) -> Self {
        self.shift = shift;
        self
    }

    /// Sets the break window.
    pub fn with_break_window(mut self, break_window: TimeRange) -> Self {
        self.break_window = break_window;
        self
    }

    /// Sets the reference start time routes depart from.
    pub fn with_start_time(mut self, start_time: Timestamp) -> Self {
        self.start_time = start_time;
        self
    }

    /// Sets the cost rates.
    pub fn with_rates(mut self, rates: CostRates) -> Self {
        self.rates = rates;
        self
    }

    /// The destinations, in chromosome index order.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    /// The fleet, in chromosome segment order.
    pub fn fleet(&self) -> &[Vehicle] {
        &self.fleet
    }

    /// The worker pool.
    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// The depot every route departs from.
    pub fn depot(&self) -> &Destination {
        &self.depot
    }

    /// The shift window.
    pub fn shift(&self) -> TimeRange {
        self.shift
    }

    /// The break window.
    pub fn break_window(&self) -> TimeRange {
        self.break_window
    }

    /// The reference start time.
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// The cost rates.
    pub fn rates(&self) -> CostRates {
        self.rates
    }

    /// Number of destinations (`n`).
    pub fn num_destinations(&self) -> usize {
        self.destinations.len()
    }

    /// Number of vehicles (`m`).
    pub fn num_vehicles(&self) -> usize {
        self.fleet.len()
    }

    /// The overtime rate applying to a vehicle kind.
    pub fn overtime_rate(&self, kind: VehicleKind) -> f64 {
        match kind {
            VehicleKind::Bike => self.rates.overtime_bike,
            VehicleKind::Car => self.rates.overtime_car,
        }
    }
}
