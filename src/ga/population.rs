//! Population container with cached fitness ranking.

use rand::Rng;

use crate::models::Problem;

use super::chromosome::Individual;

/// A fixed-size ordered sequence of individuals.
///
/// Carries a cached average fitness and a cached fitness ranking. The
/// ranking is computed once per generation by [`rank`](Population::rank)
/// (after the evaluation pass) and then read by elitism and selection,
/// instead of re-sorting the population on every fittest-lookup.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::{Chromosome, Individual, Population};
///
/// let mut a = Individual::new(Chromosome::from_parts(vec![0, 1], vec![2], vec![0]));
/// a.set_fitness(0.1);
/// let mut b = Individual::new(Chromosome::from_parts(vec![1, 0], vec![2], vec![0]));
/// b.set_fitness(0.4);
///
/// let mut population = Population::from_individuals(vec![a, b]);
/// population.rank();
/// assert_eq!(population.fittest(0).fitness(), 0.4);
/// assert_eq!(population.fittest(1).fitness(), 0.1);
/// ```
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    ranking: Vec<usize>,
    avg_fitness: f64,
}

impl Population {
    /// Seeds a population of random valid individuals (generation zero).
    pub fn random<R: Rng>(size: usize, problem: &Problem, rng: &mut R) -> Self {
        let individuals = (0..size).map(|_| Individual::random(problem, rng)).collect();
        Self::from_individuals(individuals)
    }

    /// Wraps an individual sequence produced by the variation operators.
    ///
    /// The ranking starts as the identity order; call
    /// [`rank`](Population::rank) after evaluating fitness.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        let ranking = (0..individuals.len()).collect();
        Self {
            individuals,
            ranking,
            avg_fitness: f64::NEG_INFINITY,
        }
    }

    /// Number of individuals.
    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    /// The individuals in storage order.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable view of the individuals, for the evaluation pass.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// The individual at a storage position.
    pub fn individual(&self, index: usize) -> &Individual {
        &self.individuals[index]
    }

    /// Mutable access to the individual at a storage position.
    pub fn individual_mut(&mut self, index: usize) -> &mut Individual {
        &mut self.individuals[index]
    }

    /// Recomputes the fitness ranking.
    ///
    /// Descending by fitness; ties keep storage order (stable sort).
    pub fn rank(&mut self) {
        let individuals = &self.individuals;
        self.ranking.sort_by(|&a, &b| {
            individuals[b]
                .fitness()
                .partial_cmp(&individuals[a].fitness())
                .expect("fitness should not be NaN")
        });
    }

    /// Storage index of the individual at the given rank position.
    pub fn ranked_index(&self, rank_position: usize) -> usize {
        self.ranking[rank_position]
    }

    /// The individual at the given rank position (0 = fittest).
    ///
    /// Reflects the ordering computed by the last [`rank`](Population::rank)
    /// call.
    ///
    /// # Panics
    ///
    /// Panics if `rank_position` is out of bounds.
    pub fn fittest(&self, rank_position: usize) -> &Individual {
        &self.individuals[self.ranking[rank_position]]
    }

    /// Cached average fitness (set by the evaluation pass).
    pub fn avg_fitness(&self) -> f64 {
        self.avg_fitness
    }

    /// Stores the population's average fitness.
    pub fn set_avg_fitness(&mut self, avg_fitness: f64) {
        self.avg_fitness = avg_fitness;
    }
}
