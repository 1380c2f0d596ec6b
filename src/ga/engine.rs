//! Genetic-algorithm engine: configuration, evolution loop, and result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::evaluation::Routes;
use crate::models::Problem;

use super::chromosome::{Chromosome, Individual};
use super::operators::{load_swap_mutation, order_crossover, swap_mutation};
use super::population::Population;

/// Engine hyperparameters.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(30)
///     .with_max_generations(100)
///     .with_seed(42);
/// assert_eq!(config.population_size(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaConfig {
    population_size: usize,
    mutation_rate: f64,
    crossover_rate: f64,
    elitism_count: usize,
    tournament_size: usize,
    max_generations: usize,
    mutate_loads: bool,
    seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            mutation_rate: 0.01,
            crossover_rate: 0.9,
            elitism_count: 2,
            tournament_size: 5,
            max_generations: 200,
            mutate_loads: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the per-gene mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the per-individual crossover probability.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets how many top-ranked individuals survive each generation
    /// unmodified.
    pub fn with_elitism_count(mut self, count: usize) -> Self {
        self.elitism_count = count;
        self
    }

    /// Sets the tournament size for parent selection.
    pub fn with_tournament_size(mut self, size: usize) -> Self {
        self.tournament_size = size;
        self
    }

    /// Sets the number of generations to run.
    pub fn with_max_generations(mut self, generations: usize) -> Self {
        self.max_generations = generations;
        self
    }

    /// Enables load-segment mutation (off by default; swaps stay within one
    /// capacity run, see
    /// [`load_swap_mutation`](super::operators::load_swap_mutation)).
    pub fn with_mutate_loads(mut self, enabled: bool) -> Self {
        self.mutate_loads = enabled;
        self
    }

    /// Seeds the run's random generator for deterministic reproduction.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Population size.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Per-gene mutation probability.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Per-individual crossover probability.
    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    /// Number of elite individuals.
    pub fn elitism_count(&self) -> usize {
        self.elitism_count
    }

    /// Tournament size.
    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Number of generations to run.
    pub fn max_generations(&self) -> usize {
        self.max_generations
    }

    /// Whether load-segment mutation is enabled.
    pub fn mutate_loads(&self) -> bool {
        self.mutate_loads
    }

    /// The configured random seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The fittest individual of the final generation.
    pub best: Individual,
    /// Its decoded per-vehicle routes.
    pub routes: Routes,
    /// Total operating cost of the best routes.
    pub best_cost: f64,
    /// Generations completed.
    pub generations: usize,
    /// Best cost after the initial evaluation and after each generation.
    pub history: Vec<f64>,
}

/// The genetic-algorithm engine.
///
/// Evolves a population of three-segment chromosomes: tournament selection,
/// ordered crossover on the tour and driver segments, parent-inherited
/// loads, and swap mutation, with elitism. Fitness is `1 / total_cost` of
/// the decoded routes; the per-generation evaluation pass runs in parallel.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::{GaConfig, GeneticAlgorithm};
/// use fleet_routing::models::{
///     Destination, Problem, TimeRange, Timestamp, Vehicle, VehicleKind, Worker,
/// };
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
/// .unwrap()
/// .with_shift(TimeRange::new(Timestamp::from_hm(0, 0), Timestamp::from_hm(24, 0)).unwrap());
///
/// let engine = GeneticAlgorithm::new(
///     GaConfig::default()
///         .with_population_size(20)
///         .with_max_generations(40)
///         .with_seed(42),
/// );
/// let result = engine.run(&problem);
/// // Optimal visiting order: depot→(1,0)→(1,1), distance 2.
/// assert!(result.best_cost <= 3.0 + 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticAlgorithm {
    config: GaConfig,
}

impl GeneticAlgorithm {
    /// Creates an engine with the given configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Runs the full evolution loop and returns the best solution found.
    ///
    /// The problem's preconditions are guaranteed by
    /// [`Problem::new`](crate::models::Problem::new).
    ///
    /// # Panics
    ///
    /// Panics if the configuration is inconsistent: zero population size,
    /// tournament size zero or larger than the population, or elitism count
    /// larger than the population.
    pub fn run(&self, problem: &Problem) -> GaResult {
        let config = &self.config;
        assert!(config.population_size > 0, "population size must be positive");
        assert!(
            config.tournament_size > 0 && config.tournament_size <= config.population_size,
            "tournament size must be in 1..=population size"
        );
        assert!(
            config.elitism_count <= config.population_size,
            "elitism count cannot exceed population size"
        );

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut population = self.init_population(problem, &mut rng);
        self.evaluate(&mut population, problem);

        let mut history = vec![best_cost(&population)];
        let mut generation = 1;
        while !self.is_termination_met(generation) {
            population = self.crossover_population(&population, problem, &mut rng);
            self.mutate_population(&mut population, problem, &mut rng);
            self.evaluate(&mut population, problem);
            history.push(best_cost(&population));
            generation += 1;
        }

        let best = population.fittest(0).clone();
        let routes = Routes::decode(best.chromosome(), problem);
        let best_cost = routes.total_cost();
        GaResult {
            best,
            routes,
            best_cost,
            generations: generation - 1,
            history,
        }
    }

    /// Seeds generation zero with random valid individuals.
    pub fn init_population<R: Rng>(&self, problem: &Problem, rng: &mut R) -> Population {
        Population::random(self.config.population_size, problem, rng)
    }

    /// Decodes one individual, stores `1 / total_cost` as its fitness, and
    /// returns it.
    pub fn calc_fitness(individual: &mut Individual, problem: &Problem) -> f64 {
        let routes = Routes::decode(individual.chromosome(), problem);
        let cost = routes.total_cost();
        let fitness = if cost > 0.0 { 1.0 / cost } else { f64::INFINITY };
        individual.set_fitness(fitness);
        fitness
    }

    /// Evaluates every individual, caches the population's average fitness,
    /// and refreshes the ranking.
    ///
    /// The pass is data-parallel: each individual reads its own chromosome
    /// plus shared read-only problem data and writes only its own fitness.
    pub fn evaluate(&self, population: &mut Population, problem: &Problem) {
        let total: f64 = population
            .individuals_mut()
            .par_iter_mut()
            .map(|individual| Self::calc_fitness(individual, problem))
            .sum();
        let avg = total / population.size() as f64;
        population.set_avg_fitness(avg);
        population.rank();
    }

    /// Selects a parent by tournament.
    ///
    /// Shuffles an index pool (leaving the population and its ranking
    /// untouched), takes the first `tournament_size` entrants, and returns
    /// a copy of the fittest among them; ties go to the first maximum
    /// encountered.
    pub fn select_parent<R: Rng>(&self, population: &Population, rng: &mut R) -> Individual {
        let mut entrants: Vec<usize> = (0..population.size()).collect();
        // Fisher-Yates shuffle
        for i in (1..entrants.len()).rev() {
            let j = rng.random_range(0..=i as u64) as usize;
            entrants.swap(i, j);
        }

        let mut best = population.individual(entrants[0]);
        for &index in &entrants[1..self.config.tournament_size] {
            let candidate = population.individual(index);
            if candidate.fitness() > best.fitness() {
                best = candidate;
            }
        }
        best.clone()
    }

    /// Builds the next generation by crossover.
    ///
    /// Walks the current population in rank order. Elite positions and
    /// positions losing the `crossover_rate` draw pass through as copies at
    /// the same rank position; the rest are crossed with a
    /// tournament-selected second parent.
    pub fn crossover_population<R: Rng>(
        &self,
        population: &Population,
        problem: &Problem,
        rng: &mut R,
    ) -> Population {
        let mut next = Vec::with_capacity(population.size());
        for rank_position in 0..population.size() {
            let parent1 = population.fittest(rank_position);
            if rank_position >= self.config.elitism_count
                && rng.random::<f64>() < self.config.crossover_rate
            {
                let parent2 = self.select_parent(population, rng);
                let offspring = Self::crossover(parent1.chromosome(), parent2.chromosome(), rng);
                debug_assert!(offspring.is_valid(problem));
                next.push(Individual::new(offspring));
            } else {
                next.push(parent1.clone());
            }
        }
        Population::from_individuals(next)
    }

    /// Crosses two chromosomes segment by segment.
    fn crossover<R: Rng>(parent1: &Chromosome, parent2: &Chromosome, rng: &mut R) -> Chromosome {
        let tour = order_crossover(parent1.tour(), parent2.tour(), rng);
        // Load crossover is asexual: every capacity block is sourced from
        // parent 1. Taking any block from parent 2 can break the
        // counts-sum-to-n invariant, even between vehicles of equal
        // capacity.
        let loads = parent1.loads().to_vec();
        let drivers = order_crossover(parent1.drivers(), parent2.drivers(), rng);
        Chromosome::from_parts(tour, loads, drivers)
    }

    /// Mutates every non-elite individual in place.
    ///
    /// Tour genes are swap-mutated per position with probability
    /// `mutation_rate`; load genes only when `mutate_loads` is enabled.
    /// Elite rank positions (per the last ranking) are exempt.
    pub fn mutate_population<R: Rng>(
        &self,
        population: &mut Population,
        problem: &Problem,
        rng: &mut R,
    ) {
        for rank_position in self.config.elitism_count..population.size() {
            let index = population.ranked_index(rank_position);
            let chromosome = population.individual_mut(index).chromosome_mut();
            swap_mutation(chromosome.tour_mut(), self.config.mutation_rate, rng);
            if self.config.mutate_loads {
                load_swap_mutation(
                    chromosome.loads_mut(),
                    problem.fleet(),
                    self.config.mutation_rate,
                    rng,
                );
            }
            debug_assert!(population.individual(index).chromosome().is_valid(problem));
        }
    }

    /// Returns `true` once the allowed number of generations has completed.
    pub fn is_termination_met(&self, generation: usize) -> bool {
        generation > self.config.max_generations
    }
}

/// Cost of the current fittest individual, recovered from its fitness.
fn best_cost(population: &Population) -> f64 {
    let fitness = population.fittest(0).fitness();
    if fitness.is_infinite() {
        0.0
    } else {
        1.0 / fitness
    }
}
