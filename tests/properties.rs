//! Property tests for the permutation invariants.

use proptest::prelude::*;
use tsp_evolve::ga::operators::{
    crossover_cycles, cycle_crossover, order_crossover_segment, pmx_crossover_segment,
    swap_mutation,
};
use tsp_evolve::ga::{CrossoverMethod, FitnessRanking, Selection};
use tsp_evolve::random::create_rng;
use tsp_evolve::tsp::{is_permutation, City, CityTable, DistanceOracle, Tour};

/// Two shuffles of the ids `1..=n` for some `n` in `1..=12`.
fn parent_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1usize..=12).prop_flat_map(|n| {
        let ids: Vec<usize> = (1..=n).collect();
        (Just(ids.clone()).prop_shuffle(), Just(ids).prop_shuffle())
    })
}

/// Parents plus an arbitrary segment `start <= end < n`.
fn parents_with_segment() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
    parent_pair().prop_flat_map(|(p1, p2)| {
        let n = p1.len();
        (Just(p1), Just(p2), 0..n, 0..n).prop_map(|(p1, p2, a, b)| (p1, p2, a.min(b), a.max(b)))
    })
}

fn city_table() -> impl Strategy<Value = CityTable> {
    prop::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..15).prop_map(|coords| {
        let cities = coords
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| City::new(i + 1, x, y))
            .collect();
        CityTable::new(cities).unwrap()
    })
}

proptest! {
    #[test]
    fn pmx_children_are_permutations((p1, p2, start, end) in parents_with_segment()) {
        let (c1, c2) = pmx_crossover_segment(&p1, &p2, start, end);
        prop_assert!(is_permutation(&c1, &p1), "c1 = {:?}", c1);
        prop_assert!(is_permutation(&c2, &p1), "c2 = {:?}", c2);
    }

    #[test]
    fn ox_children_are_permutations((p1, p2, start, end) in parents_with_segment()) {
        let (c1, c2) = order_crossover_segment(&p1, &p2, start, end);
        prop_assert!(is_permutation(&c1, &p1), "c1 = {:?}", c1);
        prop_assert!(is_permutation(&c2, &p1), "c2 = {:?}", c2);
    }

    #[test]
    fn cx_children_are_permutations((p1, p2) in parent_pair()) {
        let (c1, c2) = cycle_crossover(&p1, &p2);
        prop_assert!(is_permutation(&c1, &p1));
        prop_assert!(is_permutation(&c2, &p1));
        // Every gene keeps the position it had in one of the parents.
        for i in 0..p1.len() {
            prop_assert!(c1[i] == p1[i] || c1[i] == p2[i]);
            prop_assert!(c2[i] == p1[i] || c2[i] == p2[i]);
        }
        let covered: usize = crossover_cycles(&p1, &p2).iter().map(Vec::len).sum();
        prop_assert_eq!(covered, p1.len());
    }

    #[test]
    fn identical_parents_give_identical_children(
        (p, _) in parent_pair(),
        seed in any::<u64>()
    ) {
        let mut rng = create_rng(seed);
        for method in [CrossoverMethod::Pmx, CrossoverMethod::Order, CrossoverMethod::Cycle] {
            let (c1, c2) = method.crossover(&p, &p, &mut rng);
            prop_assert_eq!(&c1, &p);
            prop_assert_eq!(&c2, &p);
        }
    }

    #[test]
    fn guarded_crossover_preserves_permutations(
        (p1, p2) in parent_pair(),
        rate in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let mut rng = create_rng(seed);
        let (t1, t2) = (Tour::new(p1.clone()), Tour::new(p2));
        for method in [CrossoverMethod::Pmx, CrossoverMethod::Order, CrossoverMethod::Cycle] {
            let (c1, c2) = method.recombine(&t1, &t2, rate, &mut rng);
            prop_assert!(c1.is_permutation_of(&p1));
            prop_assert!(c2.is_permutation_of(&p1));
        }
    }

    #[test]
    fn zero_rate_mutation_is_identity((p, _) in parent_pair(), seed in any::<u64>()) {
        let mut rng = create_rng(seed);
        let mut mutated = p.clone();
        swap_mutation(&mut mutated, 0.0, &mut rng);
        prop_assert_eq!(mutated, p);
    }

    #[test]
    fn mutation_preserves_permutation(
        (p, _) in parent_pair(),
        rate in 0.0f64..=1.0,
        seed in any::<u64>()
    ) {
        let mut rng = create_rng(seed);
        let mut mutated = p.clone();
        swap_mutation(&mut mutated, rate, &mut rng);
        prop_assert!(is_permutation(&mutated, &p));
    }

    #[test]
    fn tour_length_is_direction_independent(table in city_table(), seed in any::<u64>()) {
        use rand::seq::SliceRandom;
        let mut ids = table.ids();
        ids.shuffle(&mut create_rng(seed));
        let tour = Tour::new(ids);
        let forward = table.tour_length(&tour);
        let backward = table.tour_length(&tour.reversed());
        prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
    }

    #[test]
    fn selection_is_reproducible(
        distances in prop::collection::vec(0.0f64..50.0, 2..20),
        seed in any::<u64>()
    ) {
        let ranking = FitnessRanking::from_distances(distances.clone());
        let k = distances.len().min(3);
        for selection in [Selection::Tournament(k), Selection::Roulette] {
            let a = selection.select_pool(&ranking, distances.len(), &mut create_rng(seed));
            let b = selection.select_pool(&ranking, distances.len(), &mut create_rng(seed));
            prop_assert_eq!(&a, &b);
            prop_assert!(a.iter().all(|&slot| slot < distances.len()));
        }
    }
}
