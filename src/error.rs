//! Error types for tsp-evolve.
//!
//! Configuration and input faults are reported as [`GaError`] before any
//! generation runs. Operator contract violations (parents that are not
//! permutations of the same id set) are bugs in the caller and panic instead.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type GaResult<T> = Result<T, GaError>;

/// Unified error type for configuration and input validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaError {
    /// Population must hold at least two individuals so parents can differ.
    #[error("population_size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    /// More elites requested than slots in the population.
    #[error("elite_size {elite_size} exceeds population_size {population_size}")]
    EliteExceedsPopulation {
        /// Configured elite count.
        elite_size: usize,
        /// Configured population size.
        population_size: usize,
    },

    /// A probability parameter lies outside `[0, 1]` or is NaN.
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// Tournament size must be between 1 and the population size.
    #[error("tournament size {size} must be in 1..={population_size}")]
    InvalidTournamentSize {
        /// Configured tournament size.
        size: usize,
        /// Configured population size.
        population_size: usize,
    },

    #[error("max_generations must be at least 1")]
    ZeroGenerations,

    /// No cities to build a tour from.
    #[error("city table is empty")]
    EmptyCityTable,

    /// City ids are positive integers.
    #[error("city id must be positive, got {0}")]
    InvalidCityId(usize),

    #[error("duplicate city id {0}")]
    DuplicateCityId(usize),

    /// Exhaustive search refused for an instance that is too large.
    #[error("brute force supports at most {limit} cities, got {count}")]
    TooManyCities {
        /// Number of cities requested.
        count: usize,
        /// Largest supported instance.
        limit: usize,
    },
}
