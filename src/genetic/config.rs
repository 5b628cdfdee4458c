//! Genetic search configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary loop.

use crate::cost::Objective;
use crate::error::{Result, SearchError};

/// Configuration for [`GeneticSearch`](super::GeneticSearch).
///
/// # Defaults
///
/// ```
/// use hyper_search::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.elite_count(), 10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use hyper_search::genetic::GeneticConfig;
///
/// let config = GeneticConfig::default()
///     .with_population_size(40)
///     .with_elite_fraction(0.25)
///     .with_mutation_prob(0.3)
///     .with_crossover_prob(0.6)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneticConfig {
    /// Number of individuals at the start of every generation.
    pub population_size: usize,

    /// Step size. Validated for parity with the local strategies; the
    /// genetic operators do not read it.
    pub step: f64,

    /// Probability of adding a mutated elite per refill attempt (0.0–1.0).
    pub mutation_prob: f64,

    /// Probability of adding a crossover child per refill attempt (0.0–1.0).
    ///
    /// Drawn independently of `mutation_prob`; one attempt may add both.
    pub crossover_prob: f64,

    /// Fraction of the ranked population kept unchanged (0.0–1.0).
    ///
    /// `floor(elite_fraction * population_size)` must be at least 1, since
    /// elites are the only parents.
    pub elite_fraction: f64,

    /// Number of generations to run.
    pub max_generations: usize,

    /// Half-width of the mutation perturbation.
    pub mutation_scale: f64,

    /// Grid spacing of the initial population.
    pub lattice_resolution: f64,

    /// Whether lower or higher cost wins.
    pub objective: Objective,

    /// Whether [`GeneticSearch::run`](super::GeneticSearch::run) scores the
    /// population on a worker pool. Ignored without the `parallel` feature.
    pub parallel: bool,

    /// Share of available cores used by the worker pool, in (0, 1].
    pub worker_fraction: f64,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            step: 0.1,
            mutation_prob: 0.2,
            crossover_prob: 0.5,
            elite_fraction: 0.1,
            max_generations: 100,
            mutation_scale: 0.5,
            lattice_resolution: 0.05,
            objective: Objective::Minimize,
            parallel: true,
            worker_fraction: 0.8,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the step size.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the per-attempt mutation probability.
    pub fn with_mutation_prob(mut self, p: f64) -> Self {
        self.mutation_prob = p;
        self
    }

    /// Sets the per-attempt crossover probability.
    pub fn with_crossover_prob(mut self, p: f64) -> Self {
        self.crossover_prob = p;
        self
    }

    /// Sets the fraction of the ranked population kept as elites.
    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the half-width of the mutation perturbation.
    pub fn with_mutation_scale(mut self, scale: f64) -> Self {
        self.mutation_scale = scale;
        self
    }

    /// Sets the grid spacing of the initial population.
    pub fn with_lattice_resolution(mut self, resolution: f64) -> Self {
        self.lattice_resolution = resolution;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Enables or disables the worker pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the share of available cores used by the worker pool.
    pub fn with_worker_fraction(mut self, fraction: f64) -> Self {
        self.worker_fraction = fraction;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// `floor(elite_fraction * population_size)`.
    pub fn elite_count(&self) -> usize {
        // Tolerance keeps products like 0.29 * 100 from flooring to 28.
        (self.elite_fraction * self.population_size as f64 + 1e-9).floor() as usize
    }

    /// Validates the configuration.
    ///
    /// Rates are rejected rather than clamped so that a typo does not
    /// silently change the search.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(SearchError::config("population_size must be at least 1"));
        }
        if self.max_generations == 0 {
            return Err(SearchError::config("max_generations must be at least 1"));
        }
        for (name, p) in [
            ("mutation_prob", self.mutation_prob),
            ("crossover_prob", self.crossover_prob),
            ("elite_fraction", self.elite_fraction),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SearchError::config(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.mutation_prob == 0.0 && self.crossover_prob == 0.0 {
            return Err(SearchError::config(
                "mutation_prob and crossover_prob cannot both be zero",
            ));
        }
        if self.elite_count() == 0 {
            return Err(SearchError::config(format!(
                "elite_fraction {} keeps no elites out of {}",
                self.elite_fraction, self.population_size
            )));
        }
        for (name, v) in [
            ("step", self.step),
            ("mutation_scale", self.mutation_scale),
            ("lattice_resolution", self.lattice_resolution),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(SearchError::config(format!(
                    "{name} must be positive and finite, got {v}"
                )));
            }
        }
        if !(self.worker_fraction > 0.0 && self.worker_fraction <= 1.0) {
            return Err(SearchError::config(format!(
                "worker_fraction must be in (0, 1], got {}",
                self.worker_fraction
            )));
        }
        Ok(())
    }
}
