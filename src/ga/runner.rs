//! GA evolutionary loop execution.
//!
//! [`GeneticEngine`] advances one generation per [`step`](GeneticEngine::step):
//! rank → select → breed → mutate → replace → re-rank.
//! [`GaRunner`] drives an engine to termination.

use super::config::{EliteSource, GaConfig};
use super::operators::swap_mutation;
use super::ranking::{rank, FitnessRanking};
use crate::error::{GaError, GaResult};
use crate::random::rng_from_option;
use crate::tsp::{initial_population, CityId, DistanceOracle, Population, Tour};
use rand::rngs::StdRng;
use rand::seq::index;
use tracing::instrument;

/// Where the engine is in the generational cycle.
///
/// `Initialized` → (`Ranked` → `Selected` → `Bred` → `Mutated`)* → `Terminated`.
///
/// Between calls to [`GeneticEngine::step`] the engine rests in
/// `Initialized`, `Ranked` or `Terminated`. `Selected`, `Bred` and
/// `Mutated` are transient: they are only held inside `step` and are
/// reported as `trace` events on entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Ranked,
    Selected,
    Bred,
    Mutated,
    Terminated,
}

/// Snapshot emitted after each generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: usize,
    /// Shortest tour in this generation.
    pub best_distance: f64,
    /// Shortest tour seen in any generation so far.
    pub best_ever_distance: f64,
    /// Mean fitness of this generation.
    pub average_fitness: f64,
}

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunResult {
    /// Shortest tour found during the entire run.
    pub best: Tour,

    /// Length of `best`.
    pub best_distance: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Mean population fitness after each generation.
    pub average_fitness_history: Vec<f64>,

    /// Best-ever distance after each generation. Non-increasing.
    pub best_distance_history: Vec<f64>,
}

/// Step-wise genetic algorithm over a fixed set of cities.
///
/// ```
/// use tsp_evolve::ga::{GaConfig, GeneticEngine, Phase};
/// use tsp_evolve::tsp::{City, CityTable};
///
/// let table = CityTable::new(vec![
///     City::new(1, 0.0, 0.0),
///     City::new(2, 0.0, 1.0),
///     City::new(3, 1.0, 1.0),
/// ]).unwrap();
/// let config = GaConfig::default()
///     .with_population_size(6)
///     .with_elite_size(1)
///     .with_tournament_size(2)
///     .with_max_generations(3)
///     .with_seed(1);
///
/// let mut engine = GeneticEngine::new(&table, &table.ids(), config)?;
/// while let Some(stats) = engine.step() {
///     assert!(stats.best_ever_distance <= stats.best_distance);
/// }
/// assert_eq!(engine.phase(), Phase::Terminated);
/// assert_eq!(engine.finish().generations, 3);
/// # Ok::<(), tsp_evolve::GaError>(())
/// ```
pub struct GeneticEngine<'a, D: DistanceOracle + ?Sized> {
    oracle: &'a D,
    config: GaConfig,
    rng: StdRng,
    population: Population,
    ranking: FitnessRanking,
    phase: Phase,
    generation: usize,
    best: Tour,
    best_distance: f64,
    average_fitness_history: Vec<f64>,
    best_distance_history: Vec<f64>,
}

impl<'a, D: DistanceOracle + ?Sized> GeneticEngine<'a, D> {
    /// Validates `config` and `city_ids`, then creates and ranks the
    /// initial population.
    ///
    /// Fails with [`GaError::InvalidCityId`] for an id the oracle does not
    /// know, and with [`GaError::DuplicateCityId`] for a repeated id.
    ///
    /// The best initial tour seeds the best-ever record.
    pub fn new(oracle: &'a D, city_ids: &[CityId], config: GaConfig) -> GaResult<Self> {
        config.validate()?;
        if let Some(&unknown) = city_ids.iter().find(|&&id| !oracle.contains(id)) {
            return Err(GaError::InvalidCityId(unknown));
        }

        let mut rng = rng_from_option(config.seed);
        let population = initial_population(city_ids, config.population_size, &mut rng)?;
        let ranking = rank(&population, oracle, config.parallel);
        let best = population[ranking.best().slot].clone();
        let best_distance = ranking.best().distance;

        Ok(Self {
            oracle,
            rng,
            population,
            ranking,
            phase: Phase::Initialized,
            generation: 0,
            best,
            best_distance,
            average_fitness_history: Vec::with_capacity(config.max_generations),
            best_distance_history: Vec::with_capacity(config.max_generations),
            config,
        })
    }

    /// Current phase of the generational cycle.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Generations completed so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current population, in slot order.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Ranking of the current population.
    pub fn ranking(&self) -> &FitnessRanking {
        &self.ranking
    }

    /// Best tour seen so far and its length.
    pub fn best(&self) -> (&Tour, f64) {
        (&self.best, self.best_distance)
    }

    /// Evolves one generation.
    ///
    /// Returns `None` once `max_generations` have run.
    pub fn step(&mut self) -> Option<GenerationStats> {
        if self.phase == Phase::Terminated {
            return None;
        }
        let population_size = self.config.population_size;

        // The current population was ranked on construction or at the end
        // of the previous step.
        self.enter(Phase::Ranked);

        let pool = self
            .config
            .selection
            .select_pool(&self.ranking, population_size, &mut self.rng);
        self.enter(Phase::Selected);

        let mut next = self.elites(&pool);
        let elite_count = next.len();
        while next.len() < population_size {
            let picks = index::sample(&mut self.rng, pool.len(), 2);
            let parent1 = &self.population[pool[picks.index(0)]];
            let parent2 = &self.population[pool[picks.index(1)]];
            let (child, _) = self.config.crossover.recombine(
                parent1,
                parent2,
                self.config.crossover_rate,
                &mut self.rng,
            );
            next.push(child);
        }
        self.enter(Phase::Bred);

        for tour in &mut next[elite_count..] {
            swap_mutation(tour.cities_mut(), self.config.mutation_rate, &mut self.rng);
        }
        self.enter(Phase::Mutated);

        self.population = next;
        self.ranking = rank(&self.population, self.oracle, self.config.parallel);
        self.generation += 1;

        let generation_best = *self.ranking.best();
        if generation_best.distance < self.best_distance {
            self.best = self.population[generation_best.slot].clone();
            self.best_distance = generation_best.distance;
        }
        let average_fitness = self.ranking.average_fitness();
        self.average_fitness_history.push(average_fitness);
        self.best_distance_history.push(self.best_distance);

        tracing::debug!(
            generation = self.generation,
            best_distance = generation_best.distance,
            best_ever_distance = self.best_distance,
            average_fitness,
            "generation complete"
        );

        self.enter(if self.generation >= self.config.max_generations {
            Phase::Terminated
        } else {
            Phase::Ranked
        });

        Some(GenerationStats {
            generation: self.generation,
            best_distance: generation_best.distance,
            best_ever_distance: self.best_distance,
            average_fitness,
        })
    }

    /// Consumes the engine and returns the run summary.
    pub fn finish(self) -> RunResult {
        RunResult {
            best: self.best,
            best_distance: self.best_distance,
            generations: self.generation,
            average_fitness_history: self.average_fitness_history,
            best_distance_history: self.best_distance_history,
        }
    }

    fn enter(&mut self, phase: Phase) {
        tracing::trace!(generation = self.generation, ?phase, "phase");
        self.phase = phase;
    }

    /// Tours carried verbatim into the next generation.
    fn elites(&self, pool: &[usize]) -> Population {
        let elite_size = self.config.elite_size;
        match self.config.elite_source {
            EliteSource::Ranked => self
                .ranking
                .slots()
                .take(elite_size)
                .map(|slot| self.population[slot].clone())
                .collect(),
            EliteSource::MatingPool => pool
                .iter()
                .take(elite_size)
                .map(|&slot| self.population[slot].clone())
                .collect(),
        }
    }
}

/// Executes the GA to termination.
///
/// # Usage
///
/// ```ignore
/// let table = CityTable::new(cities)?;
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&table, &table.ids(), &config)?;
/// println!("Best distance: {}", result.best_distance);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// Fails before any generation runs if the configuration is invalid or
    /// `city_ids` is empty, repeats an id, or names a city the oracle does
    /// not know.
    pub fn run<D: DistanceOracle + ?Sized>(
        oracle: &D,
        city_ids: &[CityId],
        config: &GaConfig,
    ) -> GaResult<RunResult> {
        Self::run_with_observer(oracle, city_ids, config, |_| {})
    }

    /// Runs the GA, calling `observer` after every generation.
    ///
    /// Useful for progress reporting or recording convergence curves.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            cities = city_ids.len(),
            population = config.population_size,
            generations = config.max_generations,
            selection = ?config.selection,
            crossover = ?config.crossover,
        )
    )]
    pub fn run_with_observer<D, F>(
        oracle: &D,
        city_ids: &[CityId],
        config: &GaConfig,
        mut observer: F,
    ) -> GaResult<RunResult>
    where
        D: DistanceOracle + ?Sized,
        F: FnMut(&GenerationStats),
    {
        let mut engine = GeneticEngine::new(oracle, city_ids, config.clone())?;
        tracing::info!(
            cities = city_ids.len(),
            population = config.population_size,
            generations = config.max_generations,
            elite = config.elite_size,
            selection = ?config.selection,
            crossover = ?config.crossover,
            crossover_rate = config.crossover_rate,
            mutation_rate = config.mutation_rate,
            initial_best = engine.best_distance,
            "GA run started"
        );

        while let Some(stats) = engine.step() {
            observer(&stats);
        }

        let result = engine.finish();
        tracing::info!(
            best_distance = result.best_distance,
            generations = result.generations,
            "GA run finished"
        );
        Ok(result)
    }
}

// ============================================================================
// Tests
// ============================================================================
