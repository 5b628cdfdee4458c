//! Random search loop.

use super::config::RandomConfig;
use crate::cost::{score, CostEvaluator, CostResult};
use crate::create_rng;
use crate::error::Result;
use crate::observer::{NoopObserver, SearchObserver};
use crate::space::{ParameterSpace, ParameterVector};
use rand::Rng;

/// Result of a random search run.
#[derive(Debug, Clone)]
pub struct RandomResult {
    /// Best vector sampled.
    pub best: ParameterVector,

    /// Evaluation of `best`.
    pub best_result: CostResult,

    /// Number of samples evaluated.
    pub iterations: usize,

    /// Number of times a new best was recorded, counting the first sample.
    pub improvements: usize,

    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
}

/// Executes random search.
pub struct RandomSearch;

impl RandomSearch {
    /// Runs random search with an RNG seeded from `config.seed`.
    pub fn run<E: CostEvaluator + ?Sized>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &RandomConfig,
    ) -> Result<RandomResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with(space, evaluator, config, &mut rng, &mut NoopObserver)
    }

    /// Runs random search with a caller-supplied RNG and observer.
    ///
    /// `config.seed` is ignored here.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidConfiguration`](crate::SearchError::InvalidConfiguration)
    /// before sampling anything if the config is invalid, and the first
    /// evaluation error otherwise.
    pub fn run_with<E, R, O>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &RandomConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<RandomResult>
    where
        E: CostEvaluator + ?Sized,
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let objective = config.objective;

        tracing::debug!(
            iterations = config.max_iterations,
            params = space.len(),
            ?objective,
            "random search started"
        );

        let mut best = space.random_vector(rng);
        let mut best_result = score(evaluator, &best)?;
        observer.on_evaluation(0, &best, &best_result);
        observer.on_improvement(0, &best, &best_result);
        let mut improvements = 1usize;
        let mut cost_history = Vec::with_capacity(config.max_iterations);
        cost_history.push(best_result.cost);

        for iteration in 1..config.max_iterations {
            let candidate = space.random_vector(rng);
            let result = score(evaluator, &candidate)?;
            observer.on_evaluation(iteration, &candidate, &result);

            if objective.is_better(result.cost, best_result.cost) {
                tracing::trace!(iteration, cost = result.cost, "random search improved");
                observer.on_improvement(iteration, &candidate, &result);
                improvements += 1;
                best = candidate;
                best_result = result;
            }

            cost_history.push(best_result.cost);
        }

        tracing::debug!(cost = best_result.cost, improvements, "random search finished");
        observer.on_finish(&best, &best_result);

        Ok(RandomResult {
            best,
            best_result,
            iterations: config.max_iterations,
            improvements,
            cost_history,
        })
    }
}
