//! Hill climbing loop.

use super::config::HillClimbConfig;
use crate::cost::{score, CostEvaluator, CostResult};
use crate::create_rng;
use crate::error::Result;
use crate::observer::{NoopObserver, SearchObserver};
use crate::space::{NumType, ParameterSpace, ParameterVector};
use rand::Rng;

/// Result of a hill climbing run.
#[derive(Debug, Clone)]
pub struct HillClimbResult {
    /// The point where the climb stopped.
    pub best: ParameterVector,

    /// Evaluation of `best`.
    pub best_result: CostResult,

    /// Number of accepted moves.
    pub rounds: usize,

    /// Total cost evaluations, including the starting point.
    pub evaluations: usize,

    /// `true` if the climb ended at a local optimum, `false` if
    /// `max_rounds` cut it short.
    pub converged: bool,

    /// Cost of the current point after each accepted move (starting point first).
    pub cost_history: Vec<f64>,
}

/// Executes steepest-ascent hill climbing.
pub struct HillClimb;

impl HillClimb {
    /// Runs hill climbing from a random start seeded by `config.seed`.
    pub fn run<E: CostEvaluator + ?Sized>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &HillClimbConfig,
    ) -> Result<HillClimbResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with(space, evaluator, config, &mut rng, &mut NoopObserver)
    }

    /// Runs hill climbing with a caller-supplied RNG and observer.
    ///
    /// The RNG is only used to draw the starting point.
    pub fn run_with<E, R, O>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &HillClimbConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<HillClimbResult>
    where
        E: CostEvaluator + ?Sized,
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let start = space.random_vector(rng);
        Self::climb_from(space, evaluator, config, start, observer)
    }

    /// Climbs from a given starting point.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfiguration`](crate::SearchError::InvalidConfiguration)
    /// if the config is invalid or `start` lies outside the space.
    pub fn climb_from<E, O>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &HillClimbConfig,
        start: ParameterVector,
        observer: &mut O,
    ) -> Result<HillClimbResult>
    where
        E: CostEvaluator + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        if !space.contains(&start) {
            return Err(crate::SearchError::config(format!(
                "starting point {start} lies outside the parameter space"
            )));
        }
        let objective = config.objective;

        let mut current = start;
        let mut current_result = score(evaluator, &current)?;
        let mut evaluations = 1usize;
        observer.on_evaluation(0, &current, &current_result);

        tracing::debug!(
            start = %current,
            cost = current_result.cost,
            step = config.step,
            "hill climb started"
        );

        let mut rounds = 0usize;
        let mut cost_history = vec![current_result.cost];
        let mut converged = false;

        loop {
            if config.max_rounds > 0 && rounds >= config.max_rounds {
                break;
            }

            let neighbors = Self::neighbors(space, &current, config.step);

            let mut best_neighbor: Option<(usize, ParameterVector, CostResult)> = None;
            for neighbor in neighbors {
                let result = score(evaluator, &neighbor)?;
                observer.on_evaluation(evaluations, &neighbor, &result);

                let beats = match &best_neighbor {
                    None => true,
                    Some((_, _, r)) => objective.is_better(result.cost, r.cost),
                };
                if beats {
                    best_neighbor = Some((evaluations, neighbor, result));
                }
                evaluations += 1;
            }

            // Strict comparison: ties end the climb, so flat plateaus cannot loop.
            match best_neighbor {
                Some((at, neighbor, result))
                    if objective.is_better(result.cost, current_result.cost) =>
                {
                    rounds += 1;
                    tracing::trace!(round = rounds, cost = result.cost, "hill climb moved");
                    observer.on_improvement(at, &neighbor, &result);
                    current = neighbor;
                    current_result = result;
                    cost_history.push(current_result.cost);
                }
                _ => {
                    converged = true;
                    break;
                }
            }
        }

        tracing::debug!(
            cost = current_result.cost,
            rounds,
            evaluations,
            converged,
            "hill climb finished"
        );
        observer.on_finish(&current, &current_result);

        Ok(HillClimbResult {
            best: current,
            best_result: current_result,
            rounds,
            evaluations,
            converged,
            cost_history,
        })
    }

    /// One-step neighbors of `vector`, in index order, down-move first.
    ///
    /// Moves that would leave a parameter's range are dropped, never clamped.
    /// In integer spaces the moved value is rounded, and moves that round
    /// back onto the current value are dropped.
    pub fn neighbors(
        space: &ParameterSpace,
        vector: &ParameterVector,
        step: f64,
    ) -> Vec<ParameterVector> {
        let mut out = Vec::with_capacity(vector.len() * 2);
        for (i, &value) in vector.iter().enumerate() {
            let (min, max) = space.bounds(i);
            for moved in [value - step, value + step] {
                let moved = match space.num_type() {
                    NumType::Integer => moved.round(),
                    NumType::Float => moved,
                };
                if moved < min || moved > max || moved == value {
                    continue;
                }
                out.push(vector.with_value(i, moved));
            }
        }
        out
    }
}
