//! Genetic Algorithm for the symmetric TSP.
//!
//! Individuals are [`Tour`](crate::tsp::Tour)s; fitness is the inverse of
//! tour length. Each generation runs rank → select → crossover → mutate,
//! with optional elitism, and the best tour ever seen is tracked across
//! generations.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, elites, rates, operators)
//! - [`GeneticEngine`]: Step-wise generational state machine
//! - [`GaRunner`]: Runs an engine to termination
//! - [`RunResult`]: Best tour, its distance, and convergence history
//!
//! # Submodules
//!
//! - [`operators`]: PMX, OX and CX crossover plus swap mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Larrañaga et al. (1999), "Genetic Algorithms for the Travelling Salesman
//!   Problem: A Review of Representations and Operators"

mod config;
pub mod operators;
mod ranking;
mod runner;
mod selection;

pub use config::{EliteSource, GaConfig};
pub use operators::CrossoverMethod;
pub use ranking::{fitness_from_distance, rank, FitnessRanking, RankedTour};
pub use runner::{GaRunner, GenerationStats, GeneticEngine, Phase, RunResult};
pub use selection::Selection;
