//! Evolutionary search configuration.
//!
//! [`EvolutionConfig`] holds the parameters shared by the three population
//! engines and selects which replacement strategy [`EvolutionRunner::run`]
//! dispatches to.
//!
//! [`EvolutionRunner::run`]: super::EvolutionRunner::run

use crate::error::{check_probability, Result, SearchError};

/// Population sampling and replacement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Replacement {
    /// Vary the top `sample_size` members, append the offspring, re-sort,
    /// keep the best `population_size`.
    Truncation,

    /// Binary tournaments over the whole population; winners are appended,
    /// varied in place, then the population is re-sorted and truncated.
    #[default]
    Tournament,

    /// Binary tournaments over rank positions without replacement; winners
    /// are varied and written back under their stable key.
    KeyedTournament,
}

/// Configuration for the population engines.
///
/// # Probabilities
///
/// `mutation_rate` and `crossover_rate` are tested one after the other
/// with independent draws: mutation first, crossover only if mutation
/// did not fire. They need not sum to one; a slot where neither fires
/// keeps its candidate unchanged.
///
/// # Examples
///
/// ```
/// use sho_search::evolution::{EvolutionConfig, Replacement};
///
/// let config = EvolutionConfig::default()
///     .with_population_size(10)
///     .with_sample_size(2)
///     .with_replacement(Replacement::Truncation);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionConfig {
    /// Number of members kept at the start of every generation (`n_pop`).
    pub population_size: usize,

    /// Sample slots processed per generation (`n_ech`).
    pub sample_size: usize,

    /// Probability of applying the neighbor operator to a sampled slot.
    pub mutation_rate: f64,

    /// Probability of applying crossover when mutation did not fire.
    pub crossover_rate: f64,

    /// Which engine [`EvolutionRunner::run`](super::EvolutionRunner::run) uses.
    pub replacement: Replacement,

    /// Generations between two `value_history` samples.
    pub history_interval: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            sample_size: 45,
            mutation_rate: 0.8,
            crossover_rate: 0.2,
            replacement: Replacement::default(),
            history_interval: 10,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of sample slots per generation.
    pub fn with_sample_size(mut self, n: usize) -> Self {
        self.sample_size = n;
        self
    }

    /// Sets the mutation probability. Not clamped; see [`validate`](Self::validate).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the crossover probability. Not clamped; see [`validate`](Self::validate).
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the replacement strategy.
    pub fn with_replacement(mut self, replacement: Replacement) -> Self {
        self.replacement = replacement;
        self
    }

    /// Sets how many generations pass between two history samples.
    pub fn with_history_interval(mut self, generations: usize) -> Self {
        self.history_interval = generations;
        self
    }

    /// Validates the configuration for its replacement strategy.
    ///
    /// The keyed variant needs `sample_size < population_size`: every slot
    /// draws two rank positions that no earlier slot of the same
    /// generation has won.
    pub fn validate(&self) -> Result<()> {
        self.validate_for(self.replacement)
    }

    /// Validates the shared parameters against `replacement`'s sampling
    /// constraints, ignoring the configured strategy.
    pub(crate) fn validate_for(&self, replacement: Replacement) -> Result<()> {
        if self.population_size < 2 {
            return Err(SearchError::PopulationTooSmall {
                population_size: self.population_size,
            });
        }
        if self.sample_size == 0 {
            return Err(SearchError::SampleSizeZero);
        }
        let limit = match replacement {
            Replacement::KeyedTournament => self.population_size - 1,
            Replacement::Truncation | Replacement::Tournament => self.population_size,
        };
        if self.sample_size > limit {
            return Err(SearchError::SampleTooLarge {
                sample_size: self.sample_size,
                population_size: self.population_size,
            });
        }
        check_probability("mutation_rate", self.mutation_rate)?;
        check_probability("crossover_rate", self.crossover_rate)?;
        if self.history_interval == 0 {
            return Err(SearchError::HistoryIntervalZero);
        }
        Ok(())
    }
}
