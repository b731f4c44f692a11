//! Genetic algorithm for the symmetric Traveling Salesman Problem.
//!
//! Built for experimentation: compare selection strategies, permutation
//! crossover operators and hyperparameters on tour quality and
//! convergence speed.
//!
//! - [`tsp`]: tours, the [`DistanceOracle`](tsp::DistanceOracle) trait, a
//!   Euclidean [`CityTable`](tsp::CityTable), and an exhaustive solver for
//!   small instances
//! - [`ga`]: fitness ranking, tournament/roulette selection, PMX/OX/CX
//!   crossover, swap mutation, elitism, and the generational loop
//! - [`experiment`]: run several configurations on one instance and compare
//!
//! Every random draw takes an explicit generator; a fixed
//! [`GaConfig::seed`](ga::GaConfig::seed) reproduces a run exactly.
//!
//! # Example
//!
//! ```
//! use tsp_evolve::ga::{GaConfig, GaRunner};
//! use tsp_evolve::tsp::{City, CityTable};
//!
//! let table = CityTable::new(vec![
//!     City::new(1, 0.0, 0.0),
//!     City::new(2, 0.0, 1.0),
//!     City::new(3, 1.0, 1.0),
//!     City::new(4, 1.0, 0.0),
//! ])?;
//! let config = GaConfig::default()
//!     .with_population_size(20)
//!     .with_elite_size(4)
//!     .with_max_generations(50)
//!     .with_seed(42);
//!
//! let result = GaRunner::run(&table, &table.ids(), &config)?;
//! assert!((result.best_distance - 4.0).abs() < 1e-9);
//! # Ok::<(), tsp_evolve::GaError>(())
//! ```

pub mod error;
pub mod experiment;
pub mod ga;
pub mod random;
pub mod tsp;

pub use error::{GaError, GaResult};
