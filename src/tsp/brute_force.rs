//! Exhaustive search for small instances.
//!
//! Used as ground truth when measuring how close the GA gets to the
//! optimum. The first city is pinned because rotations of a closed
//! circuit have equal length, so `(n - 1)!` tours are evaluated.

use super::city::DistanceOracle;
use super::tour::{validate_city_ids, CityId, Tour};
use crate::error::{GaError, GaResult};
use tracing::instrument;

/// Largest instance [`brute_force`] accepts (9! = 362 880 tours).
pub const BRUTE_FORCE_LIMIT: usize = 10;

/// Finds the shortest closed tour over `city_ids` by enumeration.
///
/// Returns the first optimal tour in lexicographic order of the
/// remaining positions, together with its length.
#[instrument(level = "debug", skip(oracle, city_ids), fields(cities = city_ids.len()))]
pub fn brute_force<D: DistanceOracle + ?Sized>(
    oracle: &D,
    city_ids: &[CityId],
) -> GaResult<(Tour, f64)> {
    validate_city_ids(city_ids)?;
    if let Some(&unknown) = city_ids.iter().find(|&&id| !oracle.contains(id)) {
        return Err(GaError::InvalidCityId(unknown));
    }
    let n = city_ids.len();
    if n > BRUTE_FORCE_LIMIT {
        return Err(GaError::TooManyCities {
            count: n,
            limit: BRUTE_FORCE_LIMIT,
        });
    }

    let mut order: Vec<usize> = (1..n).collect();
    let mut candidate = city_ids.to_vec();
    let mut best = candidate.clone();
    let mut best_length = oracle.tour_length(&best);

    while next_permutation(&mut order) {
        for (slot, &k) in order.iter().enumerate() {
            candidate[slot + 1] = city_ids[k];
        }
        let length = oracle.tour_length(&candidate);
        if length < best_length {
            best_length = length;
            best.copy_from_slice(&candidate);
        }
    }

    tracing::debug!(best_length, "exhaustive search finished");
    Ok((Tour::new(best), best_length))
}

/// Rearranges `perm` into the next lexicographic permutation.
///
/// Returns `false` (leaving `perm` untouched) when it is already the last.
fn next_permutation(perm: &mut [usize]) -> bool {
    if perm.len() < 2 {
        return false;
    }
    let mut i = perm.len() - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = perm.len() - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::{City, CityTable};

    #[test]
    fn test_next_permutation_enumerates_all() {
        let mut perm = vec![0, 1, 2, 3];
        let mut count = 1;
        while next_permutation(&mut perm) {
            count += 1;
        }
        assert_eq!(count, 24);
        assert_eq!(perm, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_unit_square_optimum() {
        let table = CityTable::new(vec![
            City::new(1, 0.0, 0.0),
            City::new(2, 1.0, 1.0),
            City::new(3, 0.0, 1.0),
            City::new(4, 1.0, 0.0),
        ])
        .unwrap();
        let (tour, length) = brute_force(&table, &table.ids()).unwrap();
        assert!((length - 4.0).abs() < 1e-12);
        assert_eq!(tour[0], 1);
        assert!(tour.is_permutation_of(&table.ids()));
    }

    #[test]
    fn test_single_city() {
        let table = CityTable::new(vec![City::new(5, 2.0, 2.0)]).unwrap();
        let (tour, length) = brute_force(&table, &[5]).unwrap();
        assert_eq!(tour.cities(), &[5]);
        assert_eq!(length, 0.0);
    }

    #[test]
    fn test_limits() {
        let cities: Vec<City> = (1..=11).map(|i| City::new(i, i as f64, 0.0)).collect();
        let table = CityTable::new(cities).unwrap();
        assert_eq!(
            brute_force(&table, &table.ids()).unwrap_err(),
            GaError::TooManyCities {
                count: 11,
                limit: BRUTE_FORCE_LIMIT
            }
        );
        assert_eq!(brute_force(&table, &[]).unwrap_err(), GaError::EmptyCityTable);
    }

    #[test]
    fn test_rejects_bad_ids() {
        let table = CityTable::new(vec![
            City::new(1, 0.0, 0.0),
            City::new(2, 1.0, 0.0),
            City::new(3, 0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            brute_force(&table, &[1, 2, 2]).unwrap_err(),
            GaError::DuplicateCityId(2)
        );
        assert_eq!(
            brute_force(&table, &[1, 2, 9]).unwrap_err(),
            GaError::InvalidCityId(9)
        );
    }
}
