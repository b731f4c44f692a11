//! Selection strategies for building the mating pool.
//!
//! Selection reads a [`FitnessRanking`] and returns population slot
//! indices, sampled with replacement. Higher fitness is better.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::ranking::FitnessRanking;
use rand::seq::index;
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use tsp_evolve::ga::Selection;
///
/// // Tournament with size 5 (moderate selection pressure)
/// let sel = Selection::Tournament(5);
///
/// // Roulette wheel (fitness-proportionate)
/// let sel = Selection::Roulette;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: sample `k` distinct individuals, keep the best.
    ///
    /// Higher `k` = stronger selection pressure. `k` must not exceed the
    /// population size.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Each individual's share of the wheel is `fitness_i / Σfitness`.
    /// Falls back to uniform selection when the fitness sum is zero.
    /// Individuals with infinite fitness (zero-length tours) split the
    /// whole wheel between them.
    ///
    /// # Complexity
    /// O(n) to build the wheel once per pool, O(log n) per selection
    Roulette,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(5)
    }
}

impl Selection {
    /// Selects `pool_size` population slots with replacement.
    ///
    /// The same ranking and generator state always yield the same pool.
    pub fn select_pool<R: Rng>(
        &self,
        ranking: &FitnessRanking,
        pool_size: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        match self {
            Selection::Tournament(k) => (0..pool_size)
                .map(|_| tournament(ranking, *k, rng))
                .collect(),
            Selection::Roulette => {
                let wheel = Wheel::new(ranking);
                (0..pool_size).map(|_| wheel.spin(ranking, rng)).collect()
            }
        }
    }
}

/// Tournament selection over `k` distinct ranking entries.
///
/// The ranking is sorted best first, so the lowest sampled rank wins.
fn tournament<R: Rng>(ranking: &FitnessRanking, k: usize, rng: &mut R) -> usize {
    let n = ranking.len();
    let k = k.clamp(1, n);
    let winner = index::sample(rng, n, k)
        .iter()
        .min()
        .unwrap_or(0);
    ranking.entries()[winner].slot
}

/// Precomputed roulette wheel over ranking positions.
enum Wheel {
    /// Cumulative fitness in ranking order.
    Proportional { cumulative: Vec<f64>, total: f64 },
    /// Ranking positions picked with equal probability.
    Uniform(Vec<usize>),
}

impl Wheel {
    fn new(ranking: &FitnessRanking) -> Self {
        let entries = ranking.entries();

        let infinite: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.fitness.is_infinite())
            .map(|(i, _)| i)
            .collect();
        if !infinite.is_empty() {
            return Wheel::Uniform(infinite);
        }

        let total = ranking.total_fitness();
        if !(total > 0.0 && total.is_finite()) {
            return Wheel::Uniform((0..entries.len()).collect());
        }

        let mut running = 0.0;
        let cumulative = entries
            .iter()
            .map(|e| {
                running += e.fitness;
                running
            })
            .collect();
        Wheel::Proportional { cumulative, total }
    }

    fn spin<R: Rng>(&self, ranking: &FitnessRanking, rng: &mut R) -> usize {
        let position = match self {
            Wheel::Proportional { cumulative, total } => {
                let threshold = rng.random_range(0.0..*total);
                // First entry whose cumulative fitness exceeds the threshold.
                cumulative
                    .partition_point(|&c| c <= threshold)
                    .min(cumulative.len() - 1)
            }
            Wheel::Uniform(candidates) => candidates[rng.random_range(0..candidates.len())],
        };
        ranking.entries()[position].slot
    }
}
