//! Permutation crossover and mutation operators.
//!
//! Operators work on `&[CityId]` slices holding any set of distinct ids,
//! not only `0..n`. Every child they return is a permutation of the
//! parents' id set.
//!
//! # Crossover Operators
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985), preserves absolute position
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), every gene keeps
//!   the position it had in one of the parents
//!
//! # Mutation
//!
//! - [`swap_mutation`]: per-gene swap with a uniformly random position
//!
//! # Contract
//!
//! Parents must be equal-length, non-empty permutations of the same ids.
//! Anything else is a caller bug and panics before a child is built.
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover Operators
//!   on the Traveling Salesman Problem"

use crate::tsp::{is_permutation, CityId, Tour};
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Crossover operator applied to each pair of parents.
///
/// ```
/// use tsp_evolve::ga::CrossoverMethod;
/// use tsp_evolve::random::create_rng;
///
/// let mut rng = create_rng(1);
/// let (c1, c2) = CrossoverMethod::Cycle.crossover(&[1, 2, 3, 4], &[2, 1, 4, 3], &mut rng);
/// assert_eq!(c1, vec![1, 2, 4, 3]);
/// assert_eq!(c2, vec![2, 1, 3, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverMethod {
    /// Partially Mapped Crossover.
    #[default]
    Pmx,
    /// Order Crossover.
    Order,
    /// Cycle Crossover. Uses no randomness.
    Cycle,
}

impl CrossoverMethod {
    /// Recombines two parents unconditionally.
    ///
    /// # Panics
    /// Panics if the parents are not permutations of the same ids.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &[CityId],
        parent2: &[CityId],
        rng: &mut R,
    ) -> (Vec<CityId>, Vec<CityId>) {
        match self {
            CrossoverMethod::Pmx => pmx_crossover(parent1, parent2, rng),
            CrossoverMethod::Order => order_crossover(parent1, parent2, rng),
            CrossoverMethod::Cycle => cycle_crossover(parent1, parent2),
        }
    }

    /// Recombines with probability `crossover_rate`; otherwise returns
    /// independent copies of both parents.
    pub fn recombine<R: Rng>(
        &self,
        parent1: &Tour,
        parent2: &Tour,
        crossover_rate: f64,
        rng: &mut R,
    ) -> (Tour, Tour) {
        if rng.random_range(0.0..1.0) >= crossover_rate {
            return (parent1.clone(), parent2.clone());
        }
        let (c1, c2) = self.crossover(parent1, parent2, rng);
        (Tour::new(c1), Tour::new(c2))
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Partially Mapped Crossover (PMX) with a random segment.
///
/// # Panics
/// Panics if the parents are not permutations of the same ids.
pub fn pmx_crossover<R: Rng>(
    parent1: &[CityId],
    parent2: &[CityId],
    rng: &mut R,
) -> (Vec<CityId>, Vec<CityId>) {
    check_parents(parent1, parent2);
    let n = parent1.len();
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let (start, end) = random_segment(n, rng);
    pmx_crossover_segment(parent1, parent2, start, end)
}

/// PMX over the fixed segment `[start, end]`.
///
/// # Algorithm (Goldberg & Lingle, 1985)
///
/// 1. Copy the segment of each parent into its own child
/// 2. For each segment position whose gene from the other parent is not in
///    the child yet, follow the mapping chain through the other parent until
///    it leaves the segment, and place the gene there
/// 3. Fill the remaining holes from the other parent at the same index
///
/// ```
/// use tsp_evolve::ga::operators::pmx_crossover_segment;
///
/// let (c1, c2) = pmx_crossover_segment(&[1, 2, 3, 4, 5], &[2, 4, 1, 5, 3], 1, 3);
/// assert_eq!(c1, vec![5, 2, 3, 4, 1]);
/// assert_eq!(c2, vec![3, 4, 1, 5, 2]);
/// ```
///
/// # Panics
/// Panics on invalid parents or if `start > end` or `end` is out of range.
pub fn pmx_crossover_segment(
    parent1: &[CityId],
    parent2: &[CityId],
    start: usize,
    end: usize,
) -> (Vec<CityId>, Vec<CityId>) {
    check_parents(parent1, parent2);
    check_segment(parent1.len(), start, end);

    let child1 = pmx_build_child(parent1, parent2, start, end);
    let child2 = pmx_build_child(parent2, parent1, start, end);
    (child1, child2)
}

/// Build one PMX child: copy segment from `template`, map from `donor`.
fn pmx_build_child(template: &[CityId], donor: &[CityId], start: usize, end: usize) -> Vec<CityId> {
    let n = template.len();
    let donor_pos = position_index(donor);
    let mut child: Vec<Option<CityId>> = vec![None; n];
    let mut placed: HashSet<CityId> = HashSet::with_capacity(n);

    for i in start..=end {
        child[i] = Some(template[i]);
        placed.insert(template[i]);
    }

    for i in start..=end {
        let donor_val = donor[i];
        if placed.contains(&donor_val) {
            continue;
        }
        // template[pos] displaced donor_val; find where template[pos] sits in
        // donor and repeat while that position is still inside the segment.
        let mut pos = i;
        loop {
            pos = donor_pos[&template[pos]];
            if pos < start || pos > end {
                break;
            }
        }
        child[pos] = Some(donor_val);
        placed.insert(donor_val);
    }

    child
        .into_iter()
        .zip(donor)
        .map(|(gene, &fallback)| gene.unwrap_or(fallback))
        .collect()
}

/// Order Crossover (OX) with a random segment.
///
/// # Panics
/// Panics if the parents are not permutations of the same ids.
pub fn order_crossover<R: Rng>(
    parent1: &[CityId],
    parent2: &[CityId],
    rng: &mut R,
) -> (Vec<CityId>, Vec<CityId>) {
    check_parents(parent1, parent2);
    let n = parent1.len();
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let (start, end) = random_segment(n, rng);
    order_crossover_segment(parent1, parent2, start, end)
}

/// OX over the fixed segment `[start, end]`.
///
/// Positions outside the segment are filled left to right with the other
/// parent's genes that the segment does not contain, in that parent's order.
///
/// ```
/// use tsp_evolve::ga::operators::order_crossover_segment;
///
/// let (c1, _) = order_crossover_segment(&[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1], 1, 2);
/// assert_eq!(c1, vec![5, 2, 3, 4, 1]);
/// ```
///
/// # Panics
/// Panics on invalid parents or if `start > end` or `end` is out of range.
pub fn order_crossover_segment(
    parent1: &[CityId],
    parent2: &[CityId],
    start: usize,
    end: usize,
) -> (Vec<CityId>, Vec<CityId>) {
    check_parents(parent1, parent2);
    check_segment(parent1.len(), start, end);

    let child1 = ox_build_child(parent1, parent2, start, end);
    let child2 = ox_build_child(parent2, parent1, start, end);
    (child1, child2)
}

/// Build one OX child: copy segment from `template`, fill from `donor`.
fn ox_build_child(template: &[CityId], donor: &[CityId], start: usize, end: usize) -> Vec<CityId> {
    let segment = &template[start..=end];
    let kept: HashSet<CityId> = segment.iter().copied().collect();
    let mut fill = donor.iter().copied().filter(|v| !kept.contains(v));

    let mut child = Vec::with_capacity(template.len());
    child.extend(fill.by_ref().take(start));
    child.extend_from_slice(segment);
    child.extend(fill);
    child
}

/// Cycle Crossover (CX).
///
/// Positions are partitioned into cycles (see [`crossover_cycles`]).
/// Cycles with an even discovery index keep each parent's genes in its own
/// child; odd cycles swap them.
///
/// # Panics
/// Panics if the parents are not permutations of the same ids.
pub fn cycle_crossover(parent1: &[CityId], parent2: &[CityId]) -> (Vec<CityId>, Vec<CityId>) {
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    for cycle in crossover_cycles(parent1, parent2).iter().skip(1).step_by(2) {
        for &pos in cycle {
            child1[pos] = parent2[pos];
            child2[pos] = parent1[pos];
        }
    }
    (child1, child2)
}

/// Partitions positions into CX cycles, in order of their lowest position.
///
/// Starting at an unassigned position, the walk goes to the position in
/// `parent1` of the gene `parent2` holds at the current position, until it
/// returns to the start.
///
/// # Panics
/// Panics if the parents are not permutations of the same ids.
pub fn crossover_cycles(parent1: &[CityId], parent2: &[CityId]) -> Vec<Vec<usize>> {
    check_parents(parent1, parent2);
    let n = parent1.len();
    let p1_pos = position_index(parent1);
    let mut assigned = vec![false; n];
    let mut cycles = Vec::new();

    for start in 0..n {
        if assigned[start] {
            continue;
        }
        let mut cycle = Vec::new();
        let mut pos = start;
        while !assigned[pos] {
            assigned[pos] = true;
            cycle.push(pos);
            pos = p1_pos[&parent2[pos]];
        }
        cycles.push(cycle);
    }
    cycles
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: each position, with probability `mutation_rate`, trades
/// its gene with a uniformly random position (possibly itself).
///
/// `mutation_rate = 0` leaves `perm` untouched.
pub fn swap_mutation<R: Rng>(perm: &mut [CityId], mutation_rate: f64, rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        if rng.random_range(0.0..1.0) < mutation_rate {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn position_index(perm: &[CityId]) -> HashMap<CityId, usize> {
    perm.iter().enumerate().map(|(i, &v)| (v, i)).collect()
}

fn check_parents(parent1: &[CityId], parent2: &[CityId]) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");
    assert!(!parent1.is_empty(), "parents must not be empty");
    assert!(
        is_permutation(parent2, parent1),
        "parents must be permutations of the same city ids"
    );
}

fn check_segment(n: usize, start: usize, end: usize) {
    assert!(
        start <= end && end < n,
        "invalid segment [{start}, {end}] for length {n}"
    );
}

// ============================================================================
// Tests
// ============================================================================
