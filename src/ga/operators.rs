//! Segment-level variation operators.
//!
//! Free functions over gene slices, each preserving the chromosome
//! invariants of the segment it touches:
//!
//! - [`order_crossover`] — permutation-preserving crossover for the tour
//!   and driver segments
//! - [`swap_mutation`] — per-position probabilistic swap for the tour
//! - [`capacity_runs`] — contiguous equal-capacity fleet blocks
//! - [`load_swap_mutation`] — optional load mutation restricted to within
//!   one capacity run

use std::ops::Range;

use rand::Rng;

use crate::models::Vehicle;

/// Ordered crossover over a duplicate-free gene sequence.
///
/// Picks two random cut points in `[0, n]`, copies `parent1`'s sub-range
/// between them verbatim, then fills the remaining slots by scanning
/// `parent2` starting just after the cut end (wrapping around), inserting
/// each gene not already present into the first open slot.
///
/// For a permutation this reproduces a permutation of the same values; for
/// the driver segment (distinct values drawn from a larger pool) it
/// reproduces a distinct-valued sequence drawn from the union of both
/// parents.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::operators::order_crossover;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let child = order_crossover(&[0, 1, 2, 3, 4], &[4, 3, 2, 1, 0], &mut rng);
/// let mut sorted = child.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
/// ```
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len());
    if n == 0 {
        return Vec::new();
    }

    let a = rng.random_range(0..=n as u64) as usize;
    let b = rng.random_range(0..=n as u64) as usize;
    let (start, end) = (a.min(b), a.max(b));

    let mut child: Vec<Option<usize>> = vec![None; n];
    for i in start..end {
        child[i] = Some(parent1[i]);
    }

    for i in 0..n {
        let gene = parent2[(end + i) % n];
        if !child.contains(&Some(gene)) {
            if let Some(slot) = child.iter().position(Option::is_none) {
                child[slot] = Some(gene);
            }
        }
    }

    child
        .into_iter()
        .map(|gene| gene.expect("every slot is filled by one of the parents"))
        .collect()
}

/// Per-position swap mutation.
///
/// Independently for every position, with probability `rate`, swaps that
/// gene with a uniformly random position. Swapping preserves the value
/// multiset, so a permutation stays a permutation.
pub fn swap_mutation<R: Rng>(genes: &mut [usize], rate: f64, rng: &mut R) {
    let n = genes.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        if rng.random::<f64>() < rate {
            let j = rng.random_range(0..n as u64) as usize;
            genes.swap(i, j);
        }
    }
}

/// Splits the fleet into contiguous runs of equal capacity.
///
/// Fleet order is assumed to group equal-capacity vehicles together; the
/// boundary after the first run is the separation point between the
/// fleet's first two capacity classes.
///
/// # Examples
///
/// ```
/// use fleet_routing::ga::operators::capacity_runs;
/// use fleet_routing::models::{Vehicle, VehicleKind};
///
/// let fleet = vec![
///     Vehicle::new(2, 18.0, 0.8, VehicleKind::Bike),
///     Vehicle::new(2, 18.0, 0.8, VehicleKind::Bike),
///     Vehicle::new(5, 25.0, 1.5, VehicleKind::Car),
/// ];
/// assert_eq!(capacity_runs(&fleet), vec![0..2, 2..3]);
/// ```
pub fn capacity_runs(fleet: &[Vehicle]) -> Vec<Range<usize>> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=fleet.len() {
        if i == fleet.len() || fleet[i].capacity() != fleet[start].capacity() {
            runs.push(start..i);
            start = i;
        }
    }
    runs
}

/// Per-position swap mutation over the load segment, restricted to swaps
/// within one capacity run.
///
/// Swapping counts between equal-capacity vehicles preserves both load
/// invariants (the sum is unchanged, and every count stays under the same
/// capacity bound). Counts are never swapped across runs.
pub fn load_swap_mutation<R: Rng>(
    loads: &mut [usize],
    fleet: &[Vehicle],
    rate: f64,
    rng: &mut R,
) {
    debug_assert_eq!(loads.len(), fleet.len());
    for run in capacity_runs(fleet) {
        if run.len() < 2 {
            continue;
        }
        for i in run.clone() {
            if rng.random::<f64>() < rate {
                let j = run.start + rng.random_range(0..run.len() as u64) as usize;
                loads.swap(i, j);
            }
        }
    }
}
