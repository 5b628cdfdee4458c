//! Progress side channel.
//!
//! Runners report what they evaluate to a [`SearchObserver`]. Observers never
//! influence the search; they exist for logging and bookkeeping. All hooks
//! default to no-ops.

use crate::cost::CostResult;
use crate::genetic::GenerationStats;
use crate::space::ParameterVector;

/// Receives progress events from a running search.
pub trait SearchObserver {
    /// Called after every single cost evaluation, in evaluation order.
    fn on_evaluation(
        &mut self,
        _iteration: usize,
        _vector: &ParameterVector,
        _result: &CostResult,
    ) {
    }

    /// Called when the tracked best (or current, for annealing) vector changes.
    fn on_improvement(
        &mut self,
        _iteration: usize,
        _vector: &ParameterVector,
        _result: &CostResult,
    ) {
    }

    /// Called once per genetic generation after ranking.
    fn on_generation(&mut self, _stats: &GenerationStats) {}

    /// Called once with the vector the runner is about to return.
    fn on_finish(&mut self, _best: &ParameterVector, _result: &CostResult) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Emits progress as `tracing` events under the `hyper_search` target.
///
/// Per-evaluation lines go out at `DEBUG`, improvements, generations and
/// the final result at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_evaluation(&mut self, iteration: usize, vector: &ParameterVector, result: &CostResult) {
        tracing::debug!(
            target: "hyper_search",
            iteration,
            vector = %vector,
            cost = result.cost,
            overkill = result.overkill,
            escape = result.escape,
            "evaluated"
        );
    }

    fn on_improvement(&mut self, iteration: usize, vector: &ParameterVector, result: &CostResult) {
        tracing::info!(
            target: "hyper_search",
            iteration,
            vector = %vector,
            cost = result.cost,
            "new best"
        );
    }

    fn on_generation(&mut self, stats: &GenerationStats) {
        tracing::info!(
            target: "hyper_search",
            generation = stats.generation,
            population = stats.population_size,
            best = stats.best_cost,
            median = stats.median_cost,
            worst = stats.worst_cost,
            elite_count = stats.elite_count,
            worst_elite = stats.worst_elite_cost,
            "generation ranked"
        );
    }

    fn on_finish(&mut self, best: &ParameterVector, result: &CostResult) {
        tracing::info!(
            target: "hyper_search",
            vector = %best,
            cost = result.cost,
            overkill = result.overkill,
            escape = result.escape,
            "search finished"
        );
    }
}

impl<O: SearchObserver + ?Sized> SearchObserver for &mut O {
    fn on_evaluation(&mut self, iteration: usize, vector: &ParameterVector, result: &CostResult) {
        (**self).on_evaluation(iteration, vector, result)
    }

    fn on_improvement(&mut self, iteration: usize, vector: &ParameterVector, result: &CostResult) {
        (**self).on_improvement(iteration, vector, result)
    }

    fn on_generation(&mut self, stats: &GenerationStats) {
        (**self).on_generation(stats)
    }

    fn on_finish(&mut self, best: &ParameterVector, result: &CostResult) {
        (**self).on_finish(best, result)
    }
}
