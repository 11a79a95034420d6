//! Annealing configuration.

use crate::error::{Result, SearchError};

/// Temperature schedule for [`TrajectoryRunner::simulated_annealing`].
///
/// Temperature decays geometrically: `T_{k+1} = decay * T_k`, applied
/// once per iteration whether or not the candidate was accepted.
///
/// # Examples
///
/// ```
/// use sho_search::trajectory::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_decay(0.95);
/// assert!(config.validate().is_ok());
/// ```
///
/// [`TrajectoryRunner::simulated_annealing`]: super::TrajectoryRunner::simulated_annealing
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnnealingConfig {
    /// Starting temperature. Must be finite and positive.
    pub initial_temperature: f64,

    /// Geometric decay factor in `(0, 1]`. `1.0` keeps the temperature fixed.
    pub decay: f64,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            decay: 0.99,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature. Not clamped; see [`validate`](Self::validate).
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the per-iteration decay factor. Not clamped; see [`validate`](Self::validate).
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = decay;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(SearchError::InvalidTemperature {
                value: self.initial_temperature,
            });
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(SearchError::InvalidDecay { value: self.decay });
        }
        Ok(())
    }
}
