//! Random search configuration.

use crate::cost::Objective;
use crate::error::{Result, SearchError};

/// Configuration for [`RandomSearch`](super::RandomSearch).
///
/// # Examples
///
/// ```
/// use hyper_search::random::RandomConfig;
///
/// let config = RandomConfig::default()
///     .with_max_iterations(500)
///     .with_seed(7);
/// assert_eq!(config.max_iterations, 500);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RandomConfig {
    /// Number of points to sample. Must be at least 1.
    pub max_iterations: usize,

    /// Whether lower or higher cost wins.
    pub objective: Objective,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            objective: Objective::Minimize,
            seed: None,
        }
    }
}

impl RandomConfig {
    /// Sets the number of samples to draw.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
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

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(SearchError::config("max_iterations must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RandomConfig::default();
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.objective, Objective::Minimize);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_iterations() {
        let config = RandomConfig::default().with_max_iterations(0);
        assert!(matches!(
            config.validate(),
            Err(SearchError::InvalidConfiguration(_))
        ));
    }
}
