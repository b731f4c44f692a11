//! Fitness evaluation and ranking.
//!
//! Fitness is the inverse of tour length, so higher is better. A tour of
//! length zero gets `f64::INFINITY` rather than a division fault.

use crate::tsp::{DistanceOracle, Tour};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fitness of a tour with the given total length.
///
/// ```
/// use tsp_evolve::ga::fitness_from_distance;
///
/// assert_eq!(fitness_from_distance(4.0), 0.25);
/// assert_eq!(fitness_from_distance(0.0), f64::INFINITY);
/// ```
pub fn fitness_from_distance(distance: f64) -> f64 {
    if distance > 0.0 {
        1.0 / distance
    } else {
        f64::INFINITY
    }
}

/// One population slot in a [`FitnessRanking`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedTour {
    /// Index of the tour in the population that was ranked.
    pub slot: usize,
    /// Closed-circuit length of the tour.
    pub distance: f64,
    pub fitness: f64,
}

/// Population slots ordered from highest to lowest fitness.
///
/// Ties keep ascending slot order, so the ranking is a pure function of
/// the population.
#[derive(Debug, Clone)]
pub struct FitnessRanking {
    entries: Vec<RankedTour>,
}

impl FitnessRanking {
    /// Ranks slots by the tour lengths given in slot order.
    ///
    /// # Panics
    /// Panics if `distances` is empty.
    pub fn from_distances(distances: Vec<f64>) -> Self {
        assert!(!distances.is_empty(), "cannot rank an empty population");
        let mut entries: Vec<RankedTour> = distances
            .into_iter()
            .enumerate()
            .map(|(slot, distance)| RankedTour {
                slot,
                distance,
                fitness: fitness_from_distance(distance),
            })
            .collect();
        // Stable sort: equal fitness keeps slot order.
        entries.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Self { entries }
    }

    /// Entries from best to worst.
    pub fn entries(&self) -> &[RankedTour] {
        &self.entries
    }

    /// The highest-fitness entry.
    pub fn best(&self) -> &RankedTour {
        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Population slots from best to worst.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|e| e.slot)
    }

    pub fn total_fitness(&self) -> f64 {
        self.entries.iter().map(|e| e.fitness).sum()
    }

    /// Mean fitness over the population. Infinite if any tour has length 0.
    pub fn average_fitness(&self) -> f64 {
        self.total_fitness() / self.entries.len() as f64
    }
}

/// Ranks `population` by fitness under `oracle`.
///
/// With the `parallel` feature and `parallel = true`, tour lengths are
/// computed on the rayon pool; results are collected in slot order first,
/// so the ranking is identical either way.
///
/// # Panics
/// Panics if `population` is empty.
pub fn rank<D: DistanceOracle + ?Sized>(
    population: &[Tour],
    oracle: &D,
    parallel: bool,
) -> FitnessRanking {
    FitnessRanking::from_distances(tour_lengths(population, oracle, parallel))
}

#[cfg(feature = "parallel")]
fn tour_lengths<D: DistanceOracle + ?Sized>(
    population: &[Tour],
    oracle: &D,
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        population
            .par_iter()
            .map(|tour| oracle.tour_length(tour))
            .collect()
    } else {
        population.iter().map(|tour| oracle.tour_length(tour)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn tour_lengths<D: DistanceOracle + ?Sized>(
    population: &[Tour],
    oracle: &D,
    _parallel: bool,
) -> Vec<f64> {
    population.iter().map(|tour| oracle.tour_length(tour)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::{City, CityTable};

    fn square() -> CityTable {
        CityTable::new(vec![
            City::new(1, 0.0, 0.0),
            City::new(2, 0.0, 1.0),
            City::new(3, 1.0, 1.0),
            City::new(4, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_rank_orders_best_first() {
        let table = square();
        let population = vec![
            Tour::new(vec![1, 3, 2, 4]),
            Tour::new(vec![1, 2, 3, 4]),
            Tour::new(vec![2, 4, 1, 3]),
        ];
        let ranking = rank(&population, &table, false);
        assert_eq!(ranking.slots().collect::<Vec<_>>(), vec![1, 0, 2]);
        assert!((ranking.best().distance - 4.0).abs() < 1e-12);
        assert!((ranking.best().fitness - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_ties_keep_slot_order() {
        let ranking = FitnessRanking::from_distances(vec![5.0, 2.0, 5.0, 2.0, 5.0]);
        assert_eq!(ranking.slots().collect::<Vec<_>>(), vec![1, 3, 0, 2, 4]);
    }

    #[test]
    fn test_zero_length_is_best() {
        let ranking = FitnessRanking::from_distances(vec![3.0, 0.0, 1.0]);
        assert_eq!(ranking.best().slot, 1);
        assert_eq!(ranking.best().fitness, f64::INFINITY);
        assert_eq!(ranking.average_fitness(), f64::INFINITY);
    }

    #[test]
    fn test_average_fitness() {
        let ranking = FitnessRanking::from_distances(vec![2.0, 4.0]);
        assert!((ranking.total_fitness() - 0.75).abs() < 1e-12);
        assert!((ranking.average_fitness() - 0.375).abs() < 1e-12);
        assert_eq!(ranking.len(), 2);
    }

    #[test]
    fn test_parallel_flag_does_not_change_ranking() {
        let table = square();
        let population = vec![
            Tour::new(vec![4, 3, 2, 1]),
            Tour::new(vec![1, 3, 2, 4]),
            Tour::new(vec![3, 1, 4, 2]),
            Tour::new(vec![2, 3, 4, 1]),
        ];
        let a = rank(&population, &table, false);
        let b = rank(&population, &table, true);
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    #[should_panic(expected = "cannot rank an empty population")]
    fn test_empty_population_panics() {
        FitnessRanking::from_distances(vec![]);
    }
}
