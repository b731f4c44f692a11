//! Tour representation and population initialization.

use crate::error::{GaError, GaResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::ops::Deref;

/// Identifier of a city. Positive and unique within a city table.
pub type CityId = usize;

/// One candidate route: a permutation of city ids, implicitly closed
/// into a circuit.
///
/// Equality and hashing are structural over the ordered ids, so
/// `[1, 2, 3]` and its rotation `[2, 3, 1]` are distinct values even
/// though they describe the same circuit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    cities: Vec<CityId>,
}

/// Fixed-size ordered sequence of tours making up one generation.
pub type Population = Vec<Tour>;

impl Tour {
    pub fn new(cities: Vec<CityId>) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Mutable access for order-preserving edits such as swaps.
    pub(crate) fn cities_mut(&mut self) -> &mut [CityId] {
        &mut self.cities
    }

    /// The same circuit traversed in the opposite direction.
    pub fn reversed(&self) -> Tour {
        let mut cities = self.cities.clone();
        cities.reverse();
        Tour { cities }
    }

    /// Whether this tour visits every id in `ids` exactly once.
    pub fn is_permutation_of(&self, ids: &[CityId]) -> bool {
        is_permutation(&self.cities, ids)
    }
}

impl Deref for Tour {
    type Target = [CityId];

    fn deref(&self) -> &[CityId] {
        &self.cities
    }
}

impl From<Vec<CityId>> for Tour {
    fn from(cities: Vec<CityId>) -> Self {
        Self::new(cities)
    }
}

/// Whether `candidate` contains exactly the ids of `reference`, each once.
///
/// `reference` itself must be duplicate-free for this to return `true`.
pub fn is_permutation(candidate: &[CityId], reference: &[CityId]) -> bool {
    if candidate.len() != reference.len() {
        return false;
    }
    let expected: HashSet<CityId> = reference.iter().copied().collect();
    if expected.len() != reference.len() {
        return false;
    }
    let mut seen = HashSet::with_capacity(candidate.len());
    candidate
        .iter()
        .all(|id| expected.contains(id) && seen.insert(*id))
}

/// Checks that `city_ids` is non-empty, positive and duplicate-free.
pub fn validate_city_ids(city_ids: &[CityId]) -> GaResult<()> {
    if city_ids.is_empty() {
        return Err(GaError::EmptyCityTable);
    }
    let mut seen = HashSet::with_capacity(city_ids.len());
    for &id in city_ids {
        if id == 0 {
            return Err(GaError::InvalidCityId(id));
        }
        if !seen.insert(id) {
            return Err(GaError::DuplicateCityId(id));
        }
    }
    Ok(())
}

/// Creates `population_size` independent uniform shuffles of `city_ids`.
///
/// Tours are not required to be distinct. Fails if `city_ids` is empty,
/// contains id 0, or repeats an id.
pub fn initial_population<R: Rng>(
    city_ids: &[CityId],
    population_size: usize,
    rng: &mut R,
) -> GaResult<Population> {
    validate_city_ids(city_ids)?;
    Ok((0..population_size)
        .map(|_| {
            let mut cities = city_ids.to_vec();
            cities.shuffle(rng);
            Tour::new(cities)
        })
        .collect())
}
