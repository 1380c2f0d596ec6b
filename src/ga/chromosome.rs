//! Three-segment chromosome encoding and the individual wrapper.

use rand::Rng;

use crate::models::Problem;

/// A candidate assignment of destinations to vehicles and workers.
///
/// The encoding has three segments, kept as typed sub-sequences rather than
/// one flat gene buffer:
///
/// 1. `tour` — a permutation of destination indices `0..n-1`: the global
///    visiting order per-vehicle sub-routes are carved from;
/// 2. `loads` — for each vehicle in fleet order, how many consecutive tour
///    destinations it carries; entries sum to `n` and never exceed the
///    owning vehicle's capacity;
/// 3. `drivers` — for each vehicle in fleet order, the index of the worker
///    driving it; entries are pairwise distinct.
///
/// Every constructor and operator in this crate preserves all three
/// invariants; [`is_valid`](Chromosome::is_valid) exists for tests and
/// debug assertions, not for runtime repair.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::Chromosome;
/// use fleet_routing::models::{Destination, Problem, Timestamp, Vehicle, VehicleKind, Worker};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let problem = Problem::new(
///     (0..5).map(|i| Destination::new(i, i as i32, 0, Timestamp::MAX)).collect(),
///     vec![
///         Vehicle::new(3, 18.0, 0.8, VehicleKind::Bike),
///         Vehicle::new(4, 25.0, 1.5, VehicleKind::Car),
///     ],
///     vec![Worker::new(0, false), Worker::new(1, true), Worker::new(2, false)],
///     Destination::depot(0, 0),
/// )
/// .unwrap();
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let chromosome = Chromosome::random(&problem, &mut rng);
/// assert!(chromosome.is_valid(&problem));
/// assert_eq!(chromosome.loads().iter().sum::<usize>(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chromosome {
    tour: Vec<usize>,
    loads: Vec<usize>,
    drivers: Vec<usize>,
}

impl Chromosome {
    /// Generates a uniformly random valid chromosome.
    ///
    /// The tour is a shuffled permutation; loads are built by repeatedly
    /// picking a random vehicle and advancing circularly past full ones, so
    /// the sum and capacity invariants hold by construction; drivers are a
    /// shuffled prefix of the worker indices. Relies on the preconditions
    /// [`Problem::new`](crate::models::Problem::new) enforces (total
    /// capacity ≥ `n`, workers ≥ vehicles).
    pub fn random<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        let n = problem.num_destinations();
        let m = problem.num_vehicles();
        let fleet = problem.fleet();

        let mut tour: Vec<usize> = (0..n).collect();
        // Fisher-Yates shuffle
        for i in (1..tour.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            tour.swap(i, j);
        }

        let mut loads = vec![0usize; m];
        for _ in 0..n {
            let mut vehicle = rng.random_range(0..m as u64) as usize;
            while loads[vehicle] == fleet[vehicle].capacity() {
                vehicle = (vehicle + 1) % m;
            }
            loads[vehicle] += 1;
        }

        let mut drivers: Vec<usize> = (0..problem.workers().len()).collect();
        // Fisher-Yates shuffle
        for i in (1..drivers.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            drivers.swap(i, j);
        }
        drivers.truncate(m);

        Self {
            tour,
            loads,
            drivers,
        }
    }

    /// Assembles a chromosome from its three segments.
    ///
    /// Used by the crossover operator; the caller is responsible for
    /// segment validity.
    pub fn from_parts(tour: Vec<usize>, loads: Vec<usize>, drivers: Vec<usize>) -> Self {
        Self {
            tour,
            loads,
            drivers,
        }
    }

    /// The destination-visiting order (permutation of `0..n-1`).
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    /// Mutable view of the tour, for the swap-mutation operator.
    pub fn tour_mut(&mut self) -> &mut [usize] {
        &mut self.tour
    }

    /// Per-vehicle consecutive-destination counts.
    pub fn loads(&self) -> &[usize] {
        &self.loads
    }

    /// Mutable view of the loads, for the load-swap operator.
    pub fn loads_mut(&mut self) -> &mut [usize] {
        &mut self.loads
    }

    /// Per-vehicle driver assignment (pairwise-distinct worker indices).
    pub fn drivers(&self) -> &[usize] {
        &self.drivers
    }

    /// Total gene count: `n + m + m`.
    pub fn len(&self) -> usize {
        self.tour.len() + self.loads.len() + self.drivers.len()
    }

    /// Returns `true` if the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks all three segment invariants against the problem instance.
    pub fn is_valid(&self, problem: &Problem) -> bool {
        let n = problem.num_destinations();
        let m = problem.num_vehicles();

        if self.tour.len() != n || self.loads.len() != m || self.drivers.len() != m {
            return false;
        }

        let mut seen = vec![false; n];
        for &d in &self.tour {
            if d >= n || seen[d] {
                return false;
            }
            seen[d] = true;
        }

        let mut total = 0usize;
        for (load, vehicle) in self.loads.iter().zip(problem.fleet()) {
            if *load > vehicle.capacity() {
                return false;
            }
            total += load;
        }
        if total != n {
            return false;
        }

        let workers = problem.workers().len();
        let mut assigned = vec![false; workers];
        for &w in &self.drivers {
            if w >= workers || assigned[w] {
                return false;
            }
            assigned[w] = true;
        }

        true
    }
}

/// A chromosome paired with its cached fitness.
///
/// Fitness is `1 / total_cost` (higher is better) and is set by the
/// evaluation pass; a freshly constructed individual carries
/// `f64::NEG_INFINITY` until evaluated.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::{Chromosome, Individual};
///
/// let mut individual =
///     Individual::new(Chromosome::from_parts(vec![0, 1], vec![2], vec![0]));
/// assert_eq!(individual.fitness(), f64::NEG_INFINITY);
/// individual.set_fitness(0.5);
/// assert_eq!(individual.fitness(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Individual {
    chromosome: Chromosome,
    fitness: f64,
}

impl Individual {
    /// Wraps a chromosome with unevaluated fitness.
    pub fn new(chromosome: Chromosome) -> Self {
        Self {
            chromosome,
            fitness: f64::NEG_INFINITY,
        }
    }

    /// Generates an individual with a random valid chromosome.
    pub fn random<R: Rng>(problem: &Problem, rng: &mut R) -> Self {
        Self::new(Chromosome::random(problem, rng))
    }

    /// The underlying chromosome.
    pub fn chromosome(&self) -> &Chromosome {
        &self.chromosome
    }

    /// Mutable access to the chromosome, for the mutation pass.
    pub fn chromosome_mut(&mut self) -> &mut Chromosome {
        &mut self.chromosome
    }

    /// Cached fitness (`1 / total_cost`; `NEG_INFINITY` if unevaluated).
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Stores the fitness computed by the evaluator.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
