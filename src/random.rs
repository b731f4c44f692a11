//! Seedable random number generation.
//!
//! Every random draw in the crate goes through an explicit `&mut R: Rng`
//! argument. This module only builds the generator a run starts from.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from `seed`.
///
/// The same seed yields the same sequence on every run and platform
/// supported by `rand`'s `StdRng`.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from OS entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
