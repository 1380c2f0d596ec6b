//! # fleet-routing
//!
//! Multi-vehicle delivery route optimization with a genetic algorithm.
//!
//! Assigns a fixed set of destinations with delivery deadlines to a fleet of
//! heterogeneous vehicles, each driven by one worker from a pool, minimizing
//! total operating cost: distance cost plus overtime plus late-delivery
//! penalties, under capacity, shift-window, and worker-break rules.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Destination, Vehicle, Worker, TimeRange, Problem)
//! - [`evaluation`] — Chromosome decoding and route cost evaluation
//! - [`ga`] — Genetic algorithm (chromosome, population, operators, engine)
//!
//! ## Example
//!
//! ```
//! use fleet_routing::ga::{GaConfig, GeneticAlgorithm};
//! use fleet_routing::models::{
//!     CostRates, Destination, Problem, TimeRange, Timestamp, Vehicle, VehicleKind, Worker,
//! };
//!
//! let destinations = vec![
//!     Destination::new(0, 5, 12, Timestamp::from_hm(11, 0)),
//!     Destination::new(1, 18, 3, Timestamp::from_hm(12, 30)),
//!     Destination::new(2, 9, 9, Timestamp::from_hm(14, 0)),
//! ];
//! let fleet = vec![
//!     Vehicle::new(2, 18.0, 0.8, VehicleKind::Bike),
//!     Vehicle::new(3, 25.0, 1.5, VehicleKind::Car),
//! ];
//! let workers = vec![Worker::new(0, false), Worker::new(1, true)];
//!
//! let problem = Problem::new(destinations, fleet, workers, Destination::depot(20, 30))
//!     .expect("solvable instance")
//!     .with_shift(TimeRange::new(Timestamp::from_hm(9, 0), Timestamp::from_hm(17, 0)).unwrap())
//!     .with_break_window(TimeRange::new(Timestamp::from_hm(13, 0), Timestamp::from_hm(14, 0)).unwrap())
//!     .with_start_time(Timestamp::from_hm(9, 0))
//!     .with_rates(CostRates::new(5.0, 8.0, 20.0));
//!
//! let engine = GeneticAlgorithm::new(
//!     GaConfig::default()
//!         .with_population_size(30)
//!         .with_max_generations(80)
//!         .with_seed(7),
//! );
//! let result = engine.run(&problem);
//! assert!(result.best_cost.is_finite());
//! println!("{}", result.routes);
//! ```

pub mod evaluation;
pub mod ga;
pub mod models;
