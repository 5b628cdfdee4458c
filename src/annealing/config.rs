//! Annealing configuration and schedule arithmetic.

use crate::cost::Objective;
use crate::error::{Result, SearchError};

/// The loop runs while the temperature is strictly above this value.
pub const FINAL_TEMPERATURE: f64 = 0.1;

/// Configuration for [`SimulatedAnnealing`](super::SimulatedAnnealing).
///
/// Cooling is geometric: `T_{k+1} = cooling_rate * T_k`.
///
/// # Examples
///
/// ```
/// use hyper_search::annealing::AnnealingConfig;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_rate(0.9)
///     .with_step(0.5);
/// assert_eq!(config.expected_iterations(), 66);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealingConfig {
    /// Starting temperature. Higher values run longer and explore more.
    pub initial_temperature: f64,

    /// Cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// Magnitude of the single-coordinate perturbation. Must be positive.
    pub step: f64,

    /// Direction of the improvement test. The Metropolis term ignores it.
    pub objective: Objective,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            cooling_rate: 0.98,
            step: 0.1,
            objective: Objective::Minimize,
            seed: None,
        }
    }
}

impl AnnealingConfig {
    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    /// Sets the geometric cooling factor applied after every iteration.
    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    /// Sets the perturbation size of a single move.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of iterations the schedule allows:
    /// `ceil(ln(0.1 / T0) / ln(cooling_rate))`, or 0 when `T0 <= 0.1`.
    ///
    /// Assumes a valid configuration.
    pub fn expected_iterations(&self) -> usize {
        if self.initial_temperature <= FINAL_TEMPERATURE {
            return 0;
        }
        let n = (FINAL_TEMPERATURE / self.initial_temperature).ln() / self.cooling_rate.ln();
        n.ceil() as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(SearchError::config(format!(
                "initial_temperature must be positive and finite, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(SearchError::config(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SearchError::config(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnnealingConfig::default();
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert!((config.cooling_rate - 0.98).abs() < 1e-10);
        assert!(config.validate().is_ok());
        assert_eq!(config.expected_iterations(), 456);
    }

    #[test]
    fn test_validate_bad_cooling() {
        for rate in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let config = AnnealingConfig::default().with_cooling_rate(rate);
            assert!(config.validate().is_err(), "rate {rate} accepted");
        }
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealingConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = AnnealingConfig::default().with_initial_temperature(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_step() {
        let config = AnnealingConfig::default().with_step(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_expected_iterations() {
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.5);
        assert_eq!(config.expected_iterations(), 7);

        let cold = AnnealingConfig::default().with_initial_temperature(0.05);
        assert_eq!(cold.expected_iterations(), 0);
    }
}
