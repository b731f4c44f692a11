//! TSP problem model.
//!
//! - [`Tour`]: a permutation of city ids
//! - [`DistanceOracle`]: pairwise and closed-circuit distances
//! - [`CityTable`]: Euclidean oracle over a read-only city table
//! - [`brute_force`]: exact solver for instances up to [`BRUTE_FORCE_LIMIT`] cities

mod brute_force;
mod city;
mod tour;

pub use brute_force::{brute_force, BRUTE_FORCE_LIMIT};
pub use city::{City, CityTable, DistanceOracle};
pub use tour::{
    initial_population, is_permutation, validate_city_ids, CityId, Population, Tour,
};
