//! Side-by-side comparison of GA configurations on one instance.
//!
//! Each [`Experiment`] is run to completion with [`GaRunner`] and timed.
//! [`standard_experiments`] derives the usual one-factor-at-a-time
//! variants (mutation, population, selection, crossover) from a base
//! configuration.

use crate::error::GaResult;
use crate::ga::{CrossoverMethod, GaConfig, GaRunner, Selection};
use crate::tsp::{CityId, DistanceOracle, Tour};
use std::time::{Duration, Instant};
use tracing::instrument;

/// A named configuration to evaluate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Experiment {
    pub name: String,
    pub config: GaConfig,
}

impl Experiment {
    pub fn new(name: impl Into<String>, config: GaConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Outcome of one [`Experiment`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentOutcome {
    pub name: String,
    pub best: Tour,
    pub best_distance: f64,
    /// Wall-clock time of the whole run, initialization included.
    pub elapsed: Duration,
    pub average_fitness_history: Vec<f64>,
}

/// The six stock variants, each changing one factor of `base`:
///
/// | Name               | Change                                   |
/// |--------------------|------------------------------------------|
/// | Default            | none                                     |
/// | High Mutation      | `mutation_rate = 0.3`                    |
/// | Large Population   | population ×2, elites ×1.5               |
/// | Roulette Selection | [`Selection::Roulette`]                  |
/// | Order Crossover    | [`CrossoverMethod::Order`]               |
/// | Cycle Crossover    | [`CrossoverMethod::Cycle`]               |
pub fn standard_experiments(base: &GaConfig) -> Vec<Experiment> {
    vec![
        Experiment::new("Default", base.clone()),
        Experiment::new("High Mutation", base.clone().with_mutation_rate(0.3)),
        Experiment::new(
            "Large Population",
            base.clone()
                .with_population_size(base.population_size * 2)
                .with_elite_size(base.elite_size * 3 / 2),
        ),
        Experiment::new(
            "Roulette Selection",
            base.clone().with_selection(Selection::Roulette),
        ),
        Experiment::new(
            "Order Crossover",
            base.clone().with_crossover(CrossoverMethod::Order),
        ),
        Experiment::new(
            "Cycle Crossover",
            base.clone().with_crossover(CrossoverMethod::Cycle),
        ),
    ]
}

/// Runs every experiment in order on the same instance.
///
/// Stops at the first invalid configuration.
#[instrument(
    level = "debug",
    skip_all,
    fields(cities = city_ids.len(), experiments = experiments.len())
)]
pub fn compare_configurations<D: DistanceOracle + ?Sized>(
    oracle: &D,
    city_ids: &[CityId],
    experiments: &[Experiment],
) -> GaResult<Vec<ExperimentOutcome>> {
    let mut outcomes = Vec::with_capacity(experiments.len());
    for experiment in experiments {
        let started = Instant::now();
        let result = GaRunner::run(oracle, city_ids, &experiment.config)?;
        let elapsed = started.elapsed();

        tracing::info!(
            experiment = %experiment.name,
            best_distance = result.best_distance,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "experiment finished"
        );

        outcomes.push(ExperimentOutcome {
            name: experiment.name.clone(),
            best: result.best,
            best_distance: result.best_distance,
            elapsed,
            average_fitness_history: result.average_fitness_history,
        });
    }
    Ok(outcomes)
}

/// The outcome with the shortest tour. Earlier outcomes win ties.
pub fn best_outcome(outcomes: &[ExperimentOutcome]) -> Option<&ExperimentOutcome> {
    outcomes.iter().reduce(|best, o| {
        if o.best_distance < best.best_distance {
            o
        } else {
            best
        }
    })
}
