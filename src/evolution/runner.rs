//! Evolutionary loop dispatch and results.
//!
//! [`EvolutionRunner`] validates an [`EvolutionConfig`] and runs one of the
//! three replacement strategies:
//!
//! ```text
//! SEED -> (RANK -> SAMPLE -> VARY -> REPLACE/APPEND -> RANK)* -> STOP
//! ```
//!
//! The loop stops only when the [`Terminate`] predicate declines to
//! continue; there is no internal convergence test.

use super::config::{EvolutionConfig, Replacement};
use super::{keyed, tournament, truncation};
use crate::error::Result;
use crate::types::{Crossover, Scored, Terminate, ValueHistory};
use rand::Rng;
use tracing::{debug, trace};

/// Result of a population engine run.
#[derive(Debug, Clone)]
pub struct EvolutionResult<S: Clone> {
    /// The best solution in the final population.
    pub best: S,

    /// Value of the best solution (`objective(best)`).
    pub best_value: f64,

    /// Number of completed generations.
    pub generations: usize,

    /// Number of objective evaluations, including seeding.
    pub evaluations: usize,

    /// Best value sampled every `history_interval` generations: the seeded
    /// population first, the final best last.
    pub value_history: Vec<f64>,

    /// Generations between two `value_history` samples.
    pub history_interval: usize,

    /// Final population, best first, exactly `population_size` entries.
    pub population: Vec<Scored<S>>,

    /// Stable key of each `population` entry (keyed engine only).
    pub keys: Option<Vec<usize>>,
}

impl<S: Clone> EvolutionResult<S> {
    /// Splits into the `(best_value, best)` pair.
    pub fn into_pair(self) -> (f64, S) {
        (self.best_value, self.best)
    }
}

/// Generation counters shared by the three engines.
pub(super) struct Progress {
    pub(super) generations: usize,
    pub(super) evaluations: usize,
    history: ValueHistory,
}

impl Progress {
    pub(super) fn new(config: &EvolutionConfig, evaluations: usize, best_value: f64) -> Self {
        Self {
            generations: 0,
            evaluations,
            history: ValueHistory::new(config.history_interval, best_value),
        }
    }

    pub(super) fn proceed<S, T: Terminate<S>>(&self, terminate: &mut T, best: &Scored<S>) -> bool {
        terminate.proceed(self.generations, best.value, &best.solution)
    }

    pub(super) fn record(&mut self, best_value: f64) {
        self.generations += 1;
        self.history.record(self.generations, best_value);
        trace!(generation = self.generations, best_value, "generation done");
    }

    /// Builds the result from a population ranked best first.
    pub(super) fn finish<S: Clone>(
        self,
        population: Vec<Scored<S>>,
        keys: Option<Vec<usize>>,
    ) -> EvolutionResult<S> {
        let head = &population[0];
        debug!(
            generations = self.generations,
            evaluations = self.evaluations,
            best_value = head.value,
            "evolution finished"
        );
        let history_interval = self.history.interval();
        let value_history = self.history.finish(self.generations, head.value);
        EvolutionResult {
            best: head.solution.clone(),
            best_value: head.value,
            generations: self.generations,
            evaluations: self.evaluations,
            value_history,
            history_interval,
            population,
            keys,
        }
    }
}

/// Executes the population engines.
///
/// # Usage
///
/// ```ignore
/// let config = EvolutionConfig::default()
///     .with_population_size(10)
///     .with_sample_size(2)
///     .with_replacement(Replacement::Truncation);
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = EvolutionRunner::run(&problem, &config, |g, _, _: &_| g < 100, &mut rng)?;
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the engine selected by `config.replacement`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid. No collaborator is called
    /// in that case.
    pub fn run<P, T, R>(
        problem: &P,
        config: &EvolutionConfig,
        terminate: T,
        rng: &mut R,
    ) -> Result<EvolutionResult<P::Solution>>
    where
        P: Crossover,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        match config.replacement {
            Replacement::Truncation => Self::truncation_evolution(problem, config, terminate, rng),
            Replacement::Tournament => Self::tournament_evolution(problem, config, terminate, rng),
            Replacement::KeyedTournament => {
                Self::keyed_tournament_evolution(problem, config, terminate, rng)
            }
        }
    }

    /// Truncation replacement: the top `sample_size` members are varied,
    /// offspring appended, and the best `population_size` kept.
    ///
    /// `config.replacement` is ignored.
    pub fn truncation_evolution<P, T, R>(
        problem: &P,
        config: &EvolutionConfig,
        mut terminate: T,
        rng: &mut R,
    ) -> Result<EvolutionResult<P::Solution>>
    where
        P: Crossover,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        config.validate_for(Replacement::Truncation)?;
        log_start("truncation", config);
        Ok(truncation::run(problem, config, &mut terminate, rng))
    }

    /// Tournament replacement: binary tournament winners are appended,
    /// varied in place, and the population truncated back after re-sorting.
    ///
    /// `config.replacement` is ignored.
    pub fn tournament_evolution<P, T, R>(
        problem: &P,
        config: &EvolutionConfig,
        mut terminate: T,
        rng: &mut R,
    ) -> Result<EvolutionResult<P::Solution>>
    where
        P: Crossover,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        config.validate_for(Replacement::Tournament)?;
        log_start("tournament", config);
        Ok(tournament::run(problem, config, &mut terminate, rng))
    }

    /// Keyed tournament replacement: tournaments over rank positions without
    /// replacement; winners are varied and overwritten under their key.
    ///
    /// `config.replacement` is ignored.
    pub fn keyed_tournament_evolution<P, T, R>(
        problem: &P,
        config: &EvolutionConfig,
        mut terminate: T,
        rng: &mut R,
    ) -> Result<EvolutionResult<P::Solution>>
    where
        P: Crossover,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        config.validate_for(Replacement::KeyedTournament)?;
        log_start("keyed tournament", config);
        Ok(keyed::run(problem, config, &mut terminate, rng))
    }
}

fn log_start(strategy: &str, config: &EvolutionConfig) {
    debug!(
        strategy,
        population_size = config.population_size,
        sample_size = config.sample_size,
        mutation_rate = config.mutation_rate,
        crossover_rate = config.crossover_rate,
        "evolution started"
    );
}
