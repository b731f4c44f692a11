//! City table and distance evaluation.

use super::tour::CityId;
use crate::error::{GaError, GaResult};
use std::collections::HashMap;

/// A city with a positive identifier and planar coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub id: CityId,
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub fn new(id: CityId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Answers distance queries between cities.
///
/// The GA core only ever talks to cities through this trait, so any
/// metric (precomputed matrix, geodesic, road network) can be plugged in
/// as long as it is symmetric.
///
/// `Send + Sync` because tour lengths may be evaluated in parallel.
pub trait DistanceOracle: Send + Sync {
    /// Distance between two cities.
    fn distance(&self, from: CityId, to: CityId) -> f64;

    /// Whether `id` names a city this oracle can measure.
    ///
    /// Oracles that cannot enumerate their cities accept every id.
    fn contains(&self, _id: CityId) -> bool {
        true
    }

    /// Length of the closed circuit visiting `tour` in order and
    /// returning to the first city.
    ///
    /// Tours with fewer than two cities have length 0.
    fn tour_length(&self, tour: &[CityId]) -> f64 {
        if tour.len() < 2 {
            return 0.0;
        }
        let open: f64 = tour.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        open + self.distance(tour[tour.len() - 1], tour[0])
    }
}

/// Read-only table of cities indexed by id, with Euclidean distances.
///
/// # Examples
///
/// ```
/// use tsp_evolve::tsp::{City, CityTable, DistanceOracle};
///
/// let table = CityTable::new(vec![
///     City::new(1, 0.0, 0.0),
///     City::new(2, 3.0, 4.0),
/// ]).unwrap();
/// assert_eq!(table.distance(1, 2), 5.0);
/// assert_eq!(table.tour_length(&[1, 2]), 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct CityTable {
    cities: Vec<City>,
    index: HashMap<CityId, usize>,
}

impl CityTable {
    /// Builds a table, rejecting empty input, id 0, and duplicate ids.
    pub fn new(cities: Vec<City>) -> GaResult<Self> {
        if cities.is_empty() {
            return Err(GaError::EmptyCityTable);
        }
        let mut index = HashMap::with_capacity(cities.len());
        for (pos, city) in cities.iter().enumerate() {
            if city.id == 0 {
                return Err(GaError::InvalidCityId(city.id));
            }
            if index.insert(city.id, pos).is_some() {
                return Err(GaError::DuplicateCityId(city.id));
            }
        }
        Ok(Self { cities, index })
    }

    /// City ids in insertion order.
    pub fn ids(&self) -> Vec<CityId> {
        self.cities.iter().map(|c| c.id).collect()
    }

    /// Looks up a city by id.
    pub fn get(&self, id: CityId) -> Option<&City> {
        self.index.get(&id).map(|&pos| &self.cities[pos])
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    fn city(&self, id: CityId) -> &City {
        match self.get(id) {
            Some(city) => city,
            None => panic!("unknown city id {id}"),
        }
    }
}

impl DistanceOracle for CityTable {
    /// # Panics
    /// Panics if either id is not in the table.
    fn distance(&self, from: CityId, to: CityId) -> f64 {
        self.city(from).distance_to(self.city(to))
    }

    fn contains(&self, id: CityId) -> bool {
        self.index.contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> CityTable {
        CityTable::new(vec![
            City::new(1, 0.0, 0.0),
            City::new(2, 0.0, 1.0),
            City::new(3, 1.0, 1.0),
            City::new(4, 1.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_square_order_has_perimeter_length() {
        let table = unit_square();
        assert!((table.tour_length(&[1, 2, 3, 4]) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let table = unit_square();
        let crossing = table.tour_length(&[1, 3, 2, 4]);
        assert!((crossing - (2.0 + 2.0 * 2f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_tours_have_zero_length() {
        let table = unit_square();
        assert_eq!(table.tour_length(&[]), 0.0);
        assert_eq!(table.tour_length(&[3]), 0.0);
    }

    #[test]
    fn test_ids_keep_insertion_order() {
        let table = CityTable::new(vec![City::new(9, 0.0, 0.0), City::new(4, 1.0, 1.0)]).unwrap();
        assert_eq!(table.ids(), vec![9, 4]);
        assert_eq!(table.get(4).map(|c| c.x), Some(1.0));
        assert!(table.get(5).is_none());
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert_eq!(CityTable::new(vec![]).unwrap_err(), GaError::EmptyCityTable);
        assert_eq!(
            CityTable::new(vec![City::new(0, 0.0, 0.0)]).unwrap_err(),
            GaError::InvalidCityId(0)
        );
        assert_eq!(
            CityTable::new(vec![City::new(2, 0.0, 0.0), City::new(2, 1.0, 0.0)]).unwrap_err(),
            GaError::DuplicateCityId(2)
        );
    }

    #[test]
    fn test_contains_only_table_ids() {
        let table = unit_square();
        assert!(table.contains(3));
        assert!(!table.contains(7));
        assert!(!table.contains(0));
    }

    #[test]
    #[should_panic(expected = "unknown city id 7")]
    fn test_unknown_id_panics() {
        unit_square().distance(1, 7);
    }
}
