//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::operators::CrossoverMethod;
use super::selection::Selection;
use crate::error::{GaError, GaResult};

/// Where the per-generation elites come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EliteSource {
    /// The `elite_size` best-ranked tours of the current population.
    #[default]
    Ranked,
    /// The first `elite_size` members of the mating pool, in selection
    /// order. Weaker: the best tour survives only if selection drew it
    /// early. Kept for comparison experiments.
    MatingPool,
}

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_evolve::ga::{CrossoverMethod, GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.elite_size, 20);
/// assert_eq!(config.selection, Selection::Tournament(5));
/// assert_eq!(config.crossover, CrossoverMethod::Pmx);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_evolve::ga::{CrossoverMethod, GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_elite_size(30)
///     .with_selection(Selection::Roulette)
///     .with_crossover(CrossoverMethod::Order)
///     .with_mutation_rate(0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours in every generation. At least 2.
    pub population_size: usize,

    /// Number of generations to evolve. The run never stops earlier.
    pub max_generations: usize,

    /// Tours copied unchanged into the next generation (0..=population_size).
    ///
    /// Elites skip crossover and mutation.
    pub elite_size: usize,

    /// Which tours count as elites.
    pub elite_source: EliteSource,

    /// Parent selection strategy. The tournament size lives in
    /// [`Selection::Tournament`].
    pub selection: Selection,

    /// Crossover operator.
    pub crossover: CrossoverMethod,

    /// Probability that a pair of parents is recombined (0.0–1.0).
    ///
    /// Otherwise the first parent passes through unchanged.
    pub crossover_rate: f64,

    /// Per-gene swap probability during mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate tour lengths in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            elite_size: 20,
            elite_source: EliteSource::default(),
            selection: Selection::default(),
            crossover: CrossoverMethod::default(),
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            parallel: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of elites.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    pub fn with_elite_source(mut self, source: EliteSource) -> Self {
        self.elite_source = source;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for setting tournament size.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the crossover operator.
    pub fn with_crossover(mut self, method: CrossoverMethod) -> Self {
        self.crossover = method;
        self
    }

    /// Sets the crossover rate, clamped to `[0, 1]`.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Called before any generation runs; the first violated constraint is
    /// returned.
    pub fn validate(&self) -> GaResult<()> {
        if self.population_size < 2 {
            return Err(GaError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(GaError::ZeroGenerations);
        }
        if self.elite_size > self.population_size {
            return Err(GaError::EliteExceedsPopulation {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if let Selection::Tournament(k) = self.selection {
            if k == 0 || k > self.population_size {
                return Err(GaError::InvalidTournamentSize {
                    size: k,
                    population_size: self.population_size,
                });
            }
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> GaResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GaError::RateOutOfRange { name, value })
    }
}
