//! Hill climbing configuration.

use crate::cost::Objective;
use crate::error::{Result, SearchError};

/// Configuration for [`HillClimb`](super::HillClimb).
///
/// # Examples
///
/// ```
/// use hyper_search::hillclimb::HillClimbConfig;
///
/// let config = HillClimbConfig::default().with_step(1.0).with_seed(3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HillClimbConfig {
    /// Distance of a single-coordinate move. Must be positive.
    pub step: f64,

    /// Whether lower or higher cost wins.
    pub objective: Objective,

    /// Upper bound on accepted moves. 0 = run until a local optimum.
    pub max_rounds: usize,

    /// Random seed for the starting point.
    pub seed: Option<u64>,
}

impl Default for HillClimbConfig {
    fn default() -> Self {
        Self {
            step: 0.1,
            objective: Objective::Minimize,
            max_rounds: 0,
            seed: None,
        }
    }
}

impl HillClimbConfig {
    /// Sets the neighbor offset per coordinate.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the maximum number of accepted moves (0 = unlimited).
    pub fn with_max_rounds(mut self, n: usize) -> Self {
        self.max_rounds = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(SearchError::config(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        Ok(())
    }
}
