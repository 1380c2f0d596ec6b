//! Genetic algorithm for the delivery-routing problem.
//!
//! - [`Chromosome`] / [`Individual`] — Three-segment encoding (tour
//!   permutation, per-vehicle loads, driver assignment) with cached fitness
//! - [`Population`] — Individual container with once-per-generation
//!   fitness ranking
//! - [`operators`] — Validity-preserving segment operators
//! - [`GeneticAlgorithm`] / [`GaConfig`] — The evolution engine

mod chromosome;
mod engine;
pub mod operators;
mod population;

pub use chromosome::{Chromosome, Individual};
pub use engine::{GaConfig, GaResult, GeneticAlgorithm};
pub use population::Population;
