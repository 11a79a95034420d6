//! Error types for search engine configuration.
//!
//! Engines validate their parameters before touching any collaborator, so
//! every variant here describes a precondition violation. Failures raised
//! by the problem itself (objective, initializer, operators) are panics
//! and propagate unhandled.

use thiserror::Error;

/// Errors reported by engine parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Population must hold at least two members for tournaments and mates.
    #[error("population size ({population_size}) must be >= 2")]
    PopulationTooSmall {
        /// The invalid population size
        population_size: usize,
    },

    /// At least one sample slot per generation is required.
    #[error("sample size must be >= 1")]
    SampleSizeZero,

    /// Sample size exceeds what the population can supply.
    #[error("sample size ({sample_size}) too large for population of {population_size}")]
    SampleTooLarge {
        /// Requested sample slots per generation
        sample_size: usize,
        /// Configured population size
        population_size: usize,
    },

    /// A probability parameter is outside `[0, 1]`.
    #[error("invalid {name}: {value} (must be in [0, 1])")]
    InvalidProbability {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// Initial temperature must be finite and positive.
    #[error("invalid initial temperature: {value} (must be finite and > 0)")]
    InvalidTemperature {
        /// The rejected value
        value: f64,
    },

    /// History must be sampled at least every generation.
    #[error("history interval must be >= 1")]
    HistoryIntervalZero,

    /// Temperature decay factor must lie in `(0, 1]`.
    #[error("invalid temperature decay: {value} (must be in (0, 1])")]
    InvalidDecay {
        /// The rejected value
        value: f64,
    },
}

/// A specialized `Result` type for search engines.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Returns `true` for population or sample sizing errors.
    pub fn is_population_error(&self) -> bool {
        matches!(
            self,
            SearchError::PopulationTooSmall { .. }
                | SearchError::SampleSizeZero
                | SearchError::SampleTooLarge { .. }
        )
    }

    /// Returns `true` for out-of-range probabilities.
    pub fn is_probability_error(&self) -> bool {
        matches!(self, SearchError::InvalidProbability { .. })
    }
}

/// Checks that `value` is a probability, rejecting NaN.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SearchError::InvalidProbability { name, value })
    }
}
