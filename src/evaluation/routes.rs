//! Full-chromosome decoding into per-vehicle routes.

use std::fmt;

use crate::ga::Chromosome;
use crate::models::Problem;

use super::Route;

/// The complete decoding of one chromosome: one [`Route`] per vehicle in
/// fleet order, plus aggregate metrics.
///
/// Vehicle `j` consumes the next `loads[j]` destinations from the tour (a
/// contiguous, non-overlapping partition of the permutation) and is driven
/// by worker `drivers[j]`.
///
/// # Examples
///
/// ```
/// use fleet_routing::evaluation::Routes;
/// use fleet_routing::ga::Chromosome;
/// use fleet_routing::models::{Destination, Problem, Timestamp, Vehicle, VehicleKind, Worker};
///
/// let problem = Problem::new(
///     vec![
///         Destination::new(0, 1, 0, Timestamp::MAX),
///         Destination::new(1, 1, 1, Timestamp::MAX),
///     ],
///     vec![Vehicle::new(2, 10.0, 1.0, VehicleKind::Car)],
///     vec![Worker::new(0, true)],
///     Destination::depot(0, 0),
/// )
/// .unwrap();
///
/// let routes = Routes::decode(&Chromosome::from_parts(vec![0, 1], vec![2], vec![0]), &problem);
/// assert_eq!(routes.routes().len(), 1);
/// assert!((routes.total_cost() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Routes {
    routes: Vec<Route>,
    total_distance: f64,
    total_time: f64,
    total_cost: f64,
}

impl Routes {
    /// Decodes a chromosome into priced per-vehicle routes.
    pub fn decode(chromosome: &Chromosome, problem: &Problem) -> Self {
        let mut routes = Vec::with_capacity(problem.num_vehicles());
        let mut cursor = 0;

        for (j, vehicle) in problem.fleet().iter().enumerate() {
            let count = chromosome.loads()[j];
            let worker = &problem.workers()[chromosome.drivers()[j]];
            let stops = &chromosome.tour()[cursor..cursor + count];
            cursor += count;
            routes.push(Route::new(problem, vehicle, worker, stops));
        }

        let total_distance = routes.iter().map(Route::distance).sum();
        let total_time = routes.iter().map(Route::time).sum();
        let total_cost = routes.iter().map(Route::cost).sum();

        Self {
            routes,
            total_distance,
            total_time,
            total_cost,
        }
    }

    /// The per-vehicle routes, in fleet order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Total driving time across all routes, in fractional hours.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Total operating cost across all routes.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

impl fmt::Display for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (j, route) in self.routes.iter().enumerate() {
            writeln!(f, "vehicle {j} ({:?})", route.vehicle().kind())?;
            writeln!(f, "worker {}", route.worker().id())?;
            writeln!(f, "{route}")?;
            writeln!(f, "ETA: {}", route.end_time())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostRates, Destination, TimeRange, Timestamp, Vehicle, VehicleKind, Worker};

    fn setup() -> Problem {
        Problem::new(
            vec![
                Destination::new(0, 1, 0, Timestamp::MAX),
                Destination::new(1, 2, 0, Timestamp::MAX),
                Destination::new(2, 3, 0, Timestamp::MAX),
                Destination::new(3, 0, 4, Timestamp::MAX),
            ],
            vec![
                Vehicle::new(3, 10.0, 1.0, VehicleKind::Car),
                Vehicle::new(2, 18.0, 0.5, VehicleKind::Bike),
            ],
            vec![Worker::new(0, true), Worker::new(1, true), Worker::new(2, true)],
            Destination::depot(0, 0),
        )
        .expect("valid")
        .with_shift(TimeRange::new(Timestamp::from_hm(0, 0), Timestamp::from_hm(24, 0)).expect("valid"))
        .with_start_time(Timestamp::from_hm(8, 0))
        .with_rates(CostRates::new(5.0, 8.0, 20.0))
    }

    #[test]
    fn test_decode_partitions_tour_in_order() {
        let problem = setup();
        let chromosome = Chromosome::from_parts(vec![2, 0, 1, 3], vec![3, 1], vec![1, 2]);
        let routes = Routes::decode(&chromosome, &problem);

        let first: Vec<usize> = routes.routes()[0].stops().iter().map(|d| d.id()).collect();
        let second: Vec<usize> = routes.routes()[1].stops().iter().map(|d| d.id()).collect();
        assert_eq!(first, vec![2, 0, 1]);
        assert_eq!(second, vec![3]);
        assert_eq!(routes.routes()[0].worker().id(), 1);
        assert_eq!(routes.routes()[1].worker().id(), 2);
    }

    #[test]
    fn test_decode_split_between_vehicles() {
        let problem = setup();
        let chromosome = Chromosome::from_parts(vec![0, 1, 2, 3], vec![2, 2], vec![0, 1]);
        let routes = Routes::decode(&chromosome, &problem);
        assert_eq!(routes.routes()[0].len(), 2);
        assert_eq!(routes.routes()[1].len(), 2);
        // Stops 2 and 3 go to the bike, continuing where the car's slice ended.
        let second: Vec<usize> = routes.routes()[1].stops().iter().map(|d| d.id()).collect();
        assert_eq!(second, vec![2, 3]);
    }

    #[test]
    fn test_totals_are_sums() {
        let problem = setup();
        let chromosome = Chromosome::from_parts(vec![0, 1, 2, 3], vec![3, 1], vec![0, 1]);
        let routes = Routes::decode(&chromosome, &problem);

        let distance: f64 = routes.routes().iter().map(Route::distance).sum();
        let time: f64 = routes.routes().iter().map(Route::time).sum();
        let cost: f64 = routes.routes().iter().map(Route::cost).sum();
        assert!((routes.total_distance() - distance).abs() < 1e-10);
        assert!((routes.total_time() - time).abs() < 1e-10);
        assert!((routes.total_cost() - cost).abs() < 1e-10);
        // Route 0: depot→(1,0)→(2,0)→(3,0) = 3; route 1: depot→(0,4) = 4.
        assert!((routes.total_distance() - 7.0).abs() < 1e-10);
        assert!((routes.total_cost() - (3.0 * 1.0 + 4.0 * 0.5)).abs() < 1e-10);
    }

    #[test]
    fn test_empty_routes_contribute_zero() {
        let problem = Problem::new(
            vec![Destination::new(0, 1, 0, Timestamp::MAX)],
            vec![
                Vehicle::new(1, 10.0, 1.0, VehicleKind::Car),
                Vehicle::new(2, 18.0, 0.5, VehicleKind::Bike),
            ],
            vec![Worker::new(0, true), Worker::new(1, true)],
            Destination::depot(0, 0),
        )
        .expect("valid");
        let chromosome = Chromosome::from_parts(vec![0], vec![1, 0], vec![0, 1]);
        let routes = Routes::decode(&chromosome, &problem);
        assert!(routes.routes()[1].is_empty());
        assert!((routes.total_cost() - routes.routes()[0].cost()).abs() < 1e-10);
    }

    #[test]
    fn test_display_renders_itinerary() {
        let problem = setup();
        let chromosome = Chromosome::from_parts(vec![0, 1, 2, 3], vec![3, 1], vec![0, 1]);
        let rendered = Routes::decode(&chromosome, &problem).to_string();
        assert!(rendered.contains("vehicle 0 (Car)"));
        assert!(rendered.contains("worker 1"));
        assert!(rendered.contains("(1,0) -> (2,0) -> (3,0)"));
        assert!(rendered.contains("ETA:"));
    }
}
