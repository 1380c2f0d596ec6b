//! Single-vehicle route decoding and pricing.

use std::fmt;

use crate::models::{Destination, Problem, Timestamp, Vehicle, Worker};

/// One vehicle's decoded stop sequence, priced against the problem's
/// shift, break, and deadline rules.
///
/// All metrics are computed once at construction and cached; the getters
/// are idempotent reads.
///
/// # Cost model
///
/// For a non-empty route:
///
/// - distance — Manhattan depot→first stop plus consecutive hops (no
///   return-to-depot leg);
/// - duration — `distance / speed` in fractional hours, converted to an end
///   timestamp as whole hours plus rounded minutes;
/// - break — a driver who has not had their break and would start before
///   the break's must-start-by boundary (break end minus one hour) instead
///   departs at the break window's end;
/// - overtime — `overtime_rate * hours_past_shift_end`, fractional;
/// - lateness — each stop arriving after its deadline adds
///   `ceil(minutes_late / 60) * late_penalty`, independently per stop.
///
/// # Examples
///
/// ```
/// use fleet_routing::evaluation::Route;
/// use fleet_routing::models::{
///     Destination, Problem, TimeRange, Timestamp, Vehicle, VehicleKind, Worker,
/// };
///
/// let destinations = vec![
///     Destination::new(0, 1, 0, Timestamp::MAX),
///     Destination::new(1, 1, 1, Timestamp::MAX),
/// ];
/// let problem = Problem::new(
///     destinations,
///     vec![Vehicle::new(2, 10.0, 1.0, VehicleKind::Car)],
///     vec![Worker::new(0, true)],
///     Destination::depot(0, 0),
/// )
/// .unwrap();
///
/// let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0, 1]);
/// assert!((route.distance() - 2.0).abs() < 1e-10);
/// assert!((route.cost() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Route {
    stops: Vec<Destination>,
    hop_distances: Vec<f64>,
    vehicle: Vehicle,
    worker: Worker,
    start_time: Timestamp,
    end_time: Timestamp,
    distance: f64,
    time: f64,
    cost: f64,
}

impl Route {
    /// Decodes and prices the route visiting `stop_indices` in order.
    ///
    /// An empty index slice yields a zero-cost route ending at the
    /// problem's start time. Zero vehicle speed yields zero duration.
    pub fn new(
        problem: &Problem,
        vehicle: &Vehicle,
        worker: &Worker,
        stop_indices: &[usize],
    ) -> Self {
        let stops: Vec<Destination> = stop_indices
            .iter()
            .map(|&i| problem.destinations()[i].clone())
            .collect();

        if stops.is_empty() {
            return Self {
                stops,
                hop_distances: Vec::new(),
                vehicle: vehicle.clone(),
                worker: worker.clone(),
                start_time: problem.start_time(),
                end_time: problem.start_time(),
                distance: 0.0,
                time: 0.0,
                cost: 0.0,
            };
        }

        let mut hop_distances = Vec::with_capacity(stops.len());
        hop_distances.push(problem.depot().distance_to(&stops[0]));
        for pair in stops.windows(2) {
            hop_distances.push(pair[0].distance_to(&pair[1]));
        }
        let distance: f64 = hop_distances.iter().sum();

        let time = if vehicle.speed() > 0.0 {
            distance / vehicle.speed()
        } else {
            0.0
        };

        // A driver still owed their break takes it before departing if the
        // route would otherwise start before the must-start-by boundary.
        let break_window = problem.break_window();
        let mut start_time = problem.start_time();
        if !worker.had_break() && start_time < break_window.end().plus_minutes(-60) {
            start_time = break_window.end();
        }
        let end_time = add_hours(start_time, time);

        let mut cost = distance * vehicle.cost_per_distance();

        let shift = problem.shift();
        if !shift.contains(end_time) {
            cost += problem.overtime_rate(vehicle.kind()) * shift.hours_past_end(end_time);
        }

        let late_penalty = problem.rates().late_delivery();
        let mut arrival = start_time;
        for (stop, hop) in stops.iter().zip(&hop_distances) {
            let hop_time = if vehicle.speed() > 0.0 {
                hop / vehicle.speed()
            } else {
                0.0
            };
            arrival = add_hours(arrival, hop_time);
            if arrival > stop.deadline() {
                let minutes_late = arrival.minutes_since(stop.deadline());
                cost += (minutes_late as u64).div_ceil(60) as f64 * late_penalty;
            }
        }

        Self {
            stops,
            hop_distances,
            vehicle: vehicle.clone(),
            worker: worker.clone(),
            start_time,
            end_time,
            distance,
            time,
            cost,
        }
    }

    /// The stops visited, in order.
    pub fn stops(&self) -> &[Destination] {
        &self.stops
    }

    /// Distance of each hop; index 0 is depot→first stop.
    pub fn hop_distances(&self) -> &[f64] {
        &self.hop_distances
    }

    /// The vehicle driving this route.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// The worker assigned to this route.
    pub fn worker(&self) -> &Worker {
        &self.worker
    }

    /// Effective (possibly break-adjusted) departure time.
    pub fn start_time(&self) -> Timestamp {
        self.start_time
    }

    /// Estimated arrival at the final stop.
    pub fn end_time(&self) -> Timestamp {
        self.end_time
    }

    /// Total route distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Total driving time in fractional hours.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total route cost: distance cost + overtime + late penalties.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if no destinations are assigned to this route.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stops.is_empty() {
            return write!(f, "no destinations");
        }
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "({},{})", stop.x(), stop.y())?;
        }
        Ok(())
    }
}

/// Adds a fractional-hour duration to a timestamp as whole hours plus
/// rounded minutes.
fn add_hours(t: Timestamp, hours: f64) -> Timestamp {
    let whole = hours.trunc() as i64;
    let minutes = (hours.fract() * 60.0).round() as i64;
    t.plus_hours(whole).plus_minutes(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRates, TimeRange, VehicleKind};

    fn base_problem(destinations: Vec<Destination>, vehicle: Vehicle, worker: Worker) -> Problem {
        Problem::new(destinations, vec![vehicle], vec![worker], Destination::depot(0, 0))
            .expect("valid")
            .with_shift(all_day())
            .with_break_window(irrelevant_break())
            .with_start_time(Timestamp::from_hm(8, 0))
            .with_rates(CostRates::new(5.0, 8.0, 20.0))
    }

    fn all_day() -> TimeRange {
        TimeRange::new(Timestamp::from_hm(0, 0), Timestamp::from_hm(24, 0)).expect("valid")
    }

    fn irrelevant_break() -> TimeRange {
        // Ends at 01:00, so the 08:00 start is never pushed.
        TimeRange::new(Timestamp::from_hm(0, 0), Timestamp::from_hm(1, 0)).expect("valid")
    }

    #[test]
    fn test_empty_route_is_free() {
        let problem = base_problem(
            vec![Destination::new(0, 1, 0, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, false),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[]);
        assert!(route.is_empty());
        assert_eq!(route.distance(), 0.0);
        assert_eq!(route.time(), 0.0);
        assert_eq!(route.cost(), 0.0);
        assert_eq!(route.end_time(), problem.start_time());
    }

    #[test]
    fn test_distance_and_cost_no_penalties() {
        let problem = base_problem(
            vec![
                Destination::new(0, 1, 0, Timestamp::MAX),
                Destination::new(1, 1, 1, Timestamp::MAX),
            ],
            Vehicle::new(2, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0, 1]);
        // depot→(1,0) = 1, (1,0)→(1,1) = 1
        assert!((route.distance() - 2.0).abs() < 1e-10);
        assert_eq!(route.hop_distances(), &[1.0, 1.0]);
        assert!((route.time() - 0.2).abs() < 1e-10);
        assert!((route.cost() - 2.0).abs() < 1e-10);
        // 0.2 h = 12 min
        assert_eq!(route.end_time(), Timestamp::from_hm(8, 12));
    }

    #[test]
    fn test_getters_idempotent() {
        let problem = base_problem(
            vec![Destination::new(0, 5, 5, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert_eq!(route.distance(), route.distance());
        assert_eq!(route.time(), route.time());
        assert_eq!(route.cost(), route.cost());
        assert_eq!(route.end_time(), route.end_time());
    }

    #[test]
    fn test_break_pushes_start() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, false),
        )
        .with_break_window(
            TimeRange::new(Timestamp::from_hm(13, 0), Timestamp::from_hm(14, 0)).expect("valid"),
        );
        // Start 08:00 is before 13:00 (must-start-by boundary), no break taken
        // yet: departure moves to 14:00.
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert_eq!(route.start_time(), Timestamp::from_hm(14, 0));
        assert_eq!(route.end_time(), Timestamp::from_hm(15, 0));
    }

    #[test]
    fn test_break_already_taken_keeps_start() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        )
        .with_break_window(
            TimeRange::new(Timestamp::from_hm(13, 0), Timestamp::from_hm(14, 0)).expect("valid"),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert_eq!(route.start_time(), Timestamp::from_hm(8, 0));
        assert_eq!(route.end_time(), Timestamp::from_hm(9, 0));
    }

    #[test]
    fn test_late_start_keeps_start() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, false),
        )
        .with_break_window(
            TimeRange::new(Timestamp::from_hm(8, 0), Timestamp::from_hm(9, 0)).expect("valid"),
        );
        // Must-start-by boundary is 08:00; an 08:00 start is not before it.
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert_eq!(route.start_time(), Timestamp::from_hm(8, 0));
    }

    #[test]
    fn test_overtime_fractional_hours() {
        let problem = base_problem(
            vec![Destination::new(0, 30, 0, Timestamp::MAX)],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        )
        .with_shift(
            TimeRange::new(Timestamp::from_hm(8, 0), Timestamp::from_hm(10, 30)).expect("valid"),
        );
        // 3 h drive ends 11:00, 0.5 h past shift end at the car rate 8.0.
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert!((route.cost() - (30.0 + 8.0 * 0.5)).abs() < 1e-10);
    }

    #[test]
    fn test_overtime_rate_depends_on_kind() {
        let make = |kind| {
            let problem = base_problem(
                vec![Destination::new(0, 30, 0, Timestamp::MAX)],
                Vehicle::new(1, 10.0, 1.0, kind),
                Worker::new(0, true),
            )
            .with_shift(
                TimeRange::new(Timestamp::from_hm(8, 0), Timestamp::from_hm(10, 0))
                    .expect("valid"),
            );
            Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]).cost()
        };
        // 1 h past shift end: bike rate 5.0 vs car rate 8.0.
        assert!((make(VehicleKind::Bike) - 35.0).abs() < 1e-10);
        assert!((make(VehicleKind::Car) - 38.0).abs() < 1e-10);
    }

    #[test]
    fn test_late_delivery_whole_or_partial_hours() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::from_hm(8, 30))],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        // Arrival 09:00, deadline 08:30: 30 min late rounds up to 1 h.
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert!((route.cost() - (10.0 + 20.0)).abs() < 1e-10);
    }

    #[test]
    fn test_late_delivery_charged_per_stop() {
        let problem = base_problem(
            vec![
                Destination::new(0, 10, 0, Timestamp::from_hm(8, 0)),
                Destination::new(1, 20, 0, Timestamp::from_hm(8, 0)),
            ],
            Vehicle::new(2, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        // Arrivals 09:00 (60 min late → 1 h) and 10:00 (120 min late → 2 h).
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0, 1]);
        assert!((route.cost() - (20.0 + 20.0 * 1.0 + 20.0 * 2.0)).abs() < 1e-10);
    }

    #[test]
    fn test_arrival_on_deadline_is_not_late() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::from_hm(9, 0))],
            Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert!((route.cost() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_speed_yields_zero_time() {
        let problem = base_problem(
            vec![Destination::new(0, 10, 0, Timestamp::MAX)],
            Vehicle::new(1, 0.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]);
        assert_eq!(route.time(), 0.0);
        assert_eq!(route.end_time(), Timestamp::from_hm(8, 0));
        assert!((route.cost() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_monotone_in_late_penalty() {
        let run = |late_rate| {
            let problem = base_problem(
                vec![Destination::new(0, 10, 0, Timestamp::from_hm(8, 0))],
                Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
                Worker::new(0, true),
            )
            .with_rates(CostRates::new(5.0, 8.0, late_rate));
            Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]).cost()
        };
        assert!(run(0.0) <= run(10.0));
        assert!(run(10.0) <= run(25.0));
    }

    #[test]
    fn test_cost_monotone_in_overtime_rate() {
        let run = |car_rate| {
            let problem = base_problem(
                vec![Destination::new(0, 30, 0, Timestamp::MAX)],
                Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
                Worker::new(0, true),
            )
            .with_shift(
                TimeRange::new(Timestamp::from_hm(8, 0), Timestamp::from_hm(10, 0))
                    .expect("valid"),
            )
            .with_rates(CostRates::new(5.0, car_rate, 20.0));
            Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0]).cost()
        };
        assert!(run(0.0) <= run(4.0));
        assert!(run(4.0) <= run(16.0));
    }

    #[test]
    fn test_display() {
        let problem = base_problem(
            vec![
                Destination::new(0, 1, 0, Timestamp::MAX),
                Destination::new(1, 1, 1, Timestamp::MAX),
            ],
            Vehicle::new(2, 10.0, 1.0, VehicleKind::Car),
            Worker::new(0, true),
        );
        let route = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[0, 1]);
        assert_eq!(route.to_string(), "(1,0) -> (1,1)");
        let empty = Route::new(&problem, &problem.fleet()[0], &problem.workers()[0], &[]);
        assert_eq!(empty.to_string(), "no destinations");
    }
}
