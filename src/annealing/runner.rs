//! Annealing loop.

use super::config::{AnnealingConfig, FINAL_TEMPERATURE};
use crate::cost::{score, CostEvaluator, CostResult};
use crate::create_rng;
use crate::error::Result;
use crate::observer::{NoopObserver, SearchObserver};
use crate::space::{ParameterSpace, ParameterVector};
use rand::Rng;

/// Result of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// The current point when the temperature reached its floor.
    pub best: ParameterVector,

    /// Evaluation of `best`.
    pub best_result: CostResult,

    /// Number of perturbation steps taken.
    pub iterations: usize,

    /// Temperature when the loop stopped.
    pub final_temperature: f64,

    /// Number of accepted candidates (improving or not).
    pub accepted_moves: usize,

    /// Number of candidates accepted because they were directly better.
    pub improving_moves: usize,

    /// Cost of the current point after each iteration.
    pub cost_history: Vec<f64>,
}

/// Executes simulated annealing.
pub struct SimulatedAnnealing;

impl SimulatedAnnealing {
    /// Runs annealing with an RNG seeded from `config.seed`.
    pub fn run<E: CostEvaluator + ?Sized>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &AnnealingConfig,
    ) -> Result<AnnealingResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with(space, evaluator, config, &mut rng, &mut NoopObserver)
    }

    /// Runs annealing with a caller-supplied RNG and observer.
    pub fn run_with<E, R, O>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &AnnealingConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<AnnealingResult>
    where
        E: CostEvaluator + ?Sized,
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let objective = config.objective;

        let mut current = space.random_vector(rng);
        let mut current_result = score(evaluator, &current)?;
        observer.on_evaluation(0, &current, &current_result);

        tracing::debug!(
            start = %current,
            cost = current_result.cost,
            temperature = config.initial_temperature,
            cooling_rate = config.cooling_rate,
            "annealing started"
        );

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut cost_history = Vec::with_capacity(config.expected_iterations());

        while temperature > FINAL_TEMPERATURE {
            let index = rng.random_range(0..current.len());
            let delta = if rng.random_bool(0.5) {
                config.step
            } else {
                -config.step
            };
            let moved = space.quantize(index, current[index] + delta);
            let candidate = current.with_value(index, moved);
            let candidate_result = score(evaluator, &candidate)?;
            iterations += 1;
            observer.on_evaluation(iterations, &candidate, &candidate_result);

            // The improvement test follows the objective; the Metropolis term
            // is always written for minimization. Improvement short-circuits
            // so no random number is drawn for it.
            let improved = objective.is_better(candidate_result.cost, current_result.cost);
            let accept = improved || {
                let uphill = uphill(candidate_result.cost, current_result.cost);
                rng.random::<f64>() < (-uphill / temperature).exp()
            };

            if accept {
                accepted_moves += 1;
                if improved {
                    improving_moves += 1;
                }
                tracing::trace!(
                    iteration = iterations,
                    cost = candidate_result.cost,
                    improved,
                    temperature,
                    "annealing accepted"
                );
                observer.on_improvement(iterations, &candidate, &candidate_result);
                current = candidate;
                current_result = candidate_result;
            }

            cost_history.push(current_result.cost);
            temperature *= config.cooling_rate;
        }

        tracing::debug!(
            cost = current_result.cost,
            iterations,
            accepted_moves,
            improving_moves,
            "annealing finished"
        );
        observer.on_finish(&current, &current_result);

        Ok(AnnealingResult {
            best: current,
            best_result: current_result,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        })
    }
}

/// Cost increase of a move, with NaN treated as worse than any number.
///
/// A NaN-to-NaN move is flat and always passes the Metropolis test; a move
/// into NaN from a real cost never does.
fn uphill(candidate: f64, current: f64) -> f64 {
    match (candidate.is_nan(), current.is_nan()) {
        (true, true) => 0.0,
        (true, false) => f64::INFINITY,
        (false, true) => f64::NEG_INFINITY,
        (false, false) => candidate - current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::{CostFn, Objective, TryCostFn};
    use crate::observer::testing::Recorder;
    use crate::space::NumType;
    use crate::SearchError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn grid() -> ParameterSpace {
        ParameterSpace::new(NumType::Integer, [("x", 0.0, 10.0), ("y", 0.0, 10.0)]).unwrap()
    }

    fn sum_cost() -> CostFn<impl Fn(&ParameterVector) -> CostResult + Send + Sync> {
        CostFn::new(|v: &ParameterVector| CostResult::from_cost(v.iter().sum()))
    }

    #[test]
    fn test_iteration_count_matches_schedule() {
        let space = grid();
        let eval = sum_cost();
        for (t0, rate) in [(100.0, 0.9), (10.0, 0.5), (50.0, 0.8), (0.5, 0.95)] {
            let config = AnnealingConfig::default()
                .with_initial_temperature(t0)
                .with_cooling_rate(rate)
                .with_step(1.0)
                .with_seed(1);
            let result = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
            let expected = ((0.1f64 / t0).ln() / rate.ln()).ceil() as usize;
            assert_eq!(result.iterations, expected, "T0={t0} rate={rate}");
            assert_eq!(result.iterations, config.expected_iterations());
            assert!(result.final_temperature <= FINAL_TEMPERATURE);
            assert_eq!(result.cost_history.len(), result.iterations);
        }
    }

    #[test]
    fn test_cold_start_returns_initial_point() {
        let space = grid();
        let calls = AtomicUsize::new(0);
        let eval = CostFn::new(|v: &ParameterVector| {
            calls.fetch_add(1, Ordering::Relaxed);
            CostResult::from_cost(v[0])
        });
        let config = AnnealingConfig::default()
            .with_initial_temperature(0.1)
            .with_step(1.0)
            .with_seed(3);
        let result = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_stays_in_bounds() {
        let space = ParameterSpace::new(NumType::Float, [("a", 0.0, 0.3), ("b", -1.0, 1.0)])
            .unwrap();
        let eval = CostFn::new(|v: &ParameterVector| CostResult::from_cost(-v[0] + v[1]));
        let config = AnnealingConfig::default()
            .with_initial_temperature(20.0)
            .with_cooling_rate(0.97)
            .with_step(0.25);
        let mut rng = StdRng::seed_from_u64(12);
        let mut rec = Recorder::default();
        let result =
            SimulatedAnnealing::run_with(&space, &eval, &config, &mut rng, &mut rec).unwrap();

        assert!(space.contains(&result.best));
        assert!(rec.evaluations.iter().all(|(v, _)| space.contains(v)));
        assert_eq!(rec.evaluations.len(), result.iterations + 1);
    }

    #[test]
    fn test_descends_on_sum() {
        let space = grid();
        let eval = sum_cost();
        let best = (0..5)
            .map(|seed| {
                let config = AnnealingConfig::default()
                    .with_initial_temperature(5.0)
                    .with_cooling_rate(0.995)
                    .with_step(1.0)
                    .with_seed(seed);
                SimulatedAnnealing::run(&space, &eval, &config)
                    .unwrap()
                    .best_result
                    .cost
            })
            .fold(f64::INFINITY, f64::min);
        assert!(best <= 2.0, "annealing never got near the origin: {best}");
    }

    #[test]
    fn test_returns_current_point() {
        let space = grid();
        let eval = sum_cost();
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.9)
            .with_step(1.0)
            .with_seed(21);
        let result = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        assert_eq!(result.best_result.cost, result.best.iter().sum::<f64>());
        assert_eq!(result.cost_history.last().copied(), Some(result.best_result.cost));
    }

    #[test]
    fn test_maximize_keeps_minimizing_metropolis_term() {
        // With Maximize, a lower-cost candidate fails the improvement test
        // but has exp(positive) > 1, so it is always accepted; a higher-cost
        // one passes the improvement test. Every move is accepted.
        let space = grid();
        let eval = sum_cost();
        let config = AnnealingConfig::default()
            .with_initial_temperature(10.0)
            .with_cooling_rate(0.9)
            .with_step(1.0)
            .with_objective(Objective::Maximize)
            .with_seed(4);
        let result = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        assert_eq!(result.accepted_moves, result.iterations);
    }

    #[test]
    fn test_minimize_rejects_some_uphill_when_cold() {
        let space = grid();
        let eval = sum_cost();
        let config = AnnealingConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_rate(0.99)
            .with_step(1.0)
            .with_seed(6);
        let result = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        assert!(result.accepted_moves < result.iterations);
        assert!(result.improving_moves <= result.accepted_moves);
    }

    #[test]
    fn test_uphill_with_nan() {
        assert_eq!(uphill(3.0, 1.0), 2.0);
        assert_eq!(uphill(f64::NAN, f64::NAN), 0.0);
        assert_eq!(uphill(f64::NAN, 1.0), f64::INFINITY);
        assert_eq!(uphill(1.0, f64::NAN), f64::NEG_INFINITY);
    }

    #[test]
    fn test_nan_region_is_walked_and_never_reentered() {
        let space = ParameterSpace::new(NumType::Integer, [("x", 0.0, 10.0)]).unwrap();
        let eval = CostFn::new(|v: &ParameterVector| {
            CostResult::from_cost(if v[0] >= 5.0 { f64::NAN } else { v[0] })
        });
        let config = AnnealingConfig::default()
            .with_initial_temperature(50.0)
            .with_cooling_rate(0.95)
            .with_step(1.0);

        let mut nan_starts = 0;
        let mut escaped = 0;
        for seed in 0..30 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut rec = Recorder::default();
            let result =
                SimulatedAnnealing::run_with(&space, &eval, &config, &mut rng, &mut rec).unwrap();

            if rec.evaluations[0].1.cost.is_nan() {
                nan_starts += 1;
                assert!(result.accepted_moves > 0, "seed {seed} stuck on NaN start");
                if result.best_result.cost.is_finite() {
                    escaped += 1;
                }
            }
            // Once the walk holds a real cost it never steps back into NaN.
            if let Some(first) = result.cost_history.iter().position(|c| c.is_finite()) {
                assert!(
                    result.cost_history[first..].iter().all(|c| c.is_finite()),
                    "seed {seed} re-entered NaN"
                );
            }
        }
        assert!(nan_starts > 0);
        assert!(escaped > 0);
    }

    #[test]
    fn test_same_seed_same_path() {
        let space = grid();
        let eval = sum_cost();
        let config = AnnealingConfig::default()
            .with_initial_temperature(30.0)
            .with_cooling_rate(0.95)
            .with_step(1.0)
            .with_seed(77);
        let a = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        let b = SimulatedAnnealing::run(&space, &eval, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    fn test_invalid_cooling_rejected() {
        let config = AnnealingConfig::default().with_cooling_rate(1.0);
        let res = SimulatedAnnealing::run(&grid(), &sum_cost(), &config);
        assert!(matches!(res, Err(SearchError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_evaluation_error_aborts() {
        let calls = AtomicUsize::new(0);
        let eval = TryCostFn::new(|_: &ParameterVector| {
            if calls.fetch_add(1, Ordering::Relaxed) >= 3 {
                Err("license server unreachable".into())
            } else {
                Ok(CostResult::from_cost(0.0))
            }
        });
        let config = AnnealingConfig::default().with_step(1.0).with_seed(0);
        let err = SimulatedAnnealing::run(&grid(), &eval, &config).unwrap_err();
        assert!(err.is_evaluation());
    }
}
