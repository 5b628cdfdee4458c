//! Genetic evolutionary loop.
//!
//! [`GeneticSearch`] orchestrates the generation cycle:
//! evaluate → rank → keep elites → refill by mutation and crossover → repeat.

use super::batch::{BatchEvaluator, SequentialBatch};
use super::config::GeneticConfig;
use super::operators;
use crate::cost::{CostEvaluator, CostResult};
use crate::create_rng;
use crate::error::{Result, SearchError};
use crate::observer::{NoopObserver, SearchObserver};
use crate::space::{ParameterSpace, ParameterVector};
use rand::Rng;

/// Summary of one ranked generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,

    /// Number of individuals evaluated this generation.
    pub population_size: usize,

    /// Number of individuals carried unchanged into the next generation.
    pub elite_count: usize,

    /// Cost of the top-ranked individual.
    pub best_cost: f64,

    /// Numeric median of the population's costs.
    pub median_cost: f64,

    /// Cost of the bottom-ranked individual.
    pub worst_cost: f64,

    /// Cost of the lowest-ranked elite.
    pub worst_elite_cost: f64,
}

impl GenerationStats {
    fn from_ranked(
        generation: usize,
        ranked: &[(ParameterVector, CostResult)],
        elite_count: usize,
    ) -> Self {
        let mut costs: Vec<f64> = ranked.iter().map(|(_, r)| r.cost).collect();
        let best_cost = costs[0];
        let worst_cost = costs[costs.len() - 1];
        let worst_elite_cost = costs[elite_count.min(costs.len()) - 1];

        costs.sort_by(f64::total_cmp);
        let mid = costs.len() / 2;
        let median_cost = if costs.len() % 2 == 0 {
            (costs[mid - 1] + costs[mid]) / 2.0
        } else {
            costs[mid]
        };

        Self {
            generation,
            population_size: ranked.len(),
            elite_count,
            best_cost,
            median_cost,
            worst_cost,
            worst_elite_cost,
        }
    }
}

/// Result of a genetic search run.
#[derive(Debug, Clone)]
pub struct GeneticResult {
    /// Top-ranked individual of the final generation.
    pub best: ParameterVector,

    /// Evaluation of `best`.
    pub best_result: CostResult,

    /// Number of generations executed.
    pub generations: usize,

    /// Total cost evaluations.
    pub evaluations: usize,

    /// Per-generation statistics, in order.
    pub history: Vec<GenerationStats>,
}

/// Executes the genetic search loop.
///
/// # Usage
///
/// ```
/// use hyper_search::cost::{CostFn, CostResult};
/// use hyper_search::genetic::{GeneticConfig, GeneticSearch};
/// use hyper_search::space::{NumType, ParameterSpace, ParameterVector};
///
/// let space = ParameterSpace::new(NumType::Float, [("a", -1.0, 1.0), ("b", -1.0, 1.0)]).unwrap();
/// let eval = CostFn::new(|v: &ParameterVector| CostResult::from_cost(v[0] * v[0] + v[1] * v[1]));
/// let config = GeneticConfig::default()
///     .with_population_size(20)
///     .with_max_generations(10)
///     .with_elite_fraction(0.2)
///     .with_seed(42);
/// let result = GeneticSearch::run(&space, &eval, &config).unwrap();
/// assert!(space.contains(&result.best));
/// ```
pub struct GeneticSearch;

impl GeneticSearch {
    /// Runs the search with an RNG seeded from `config.seed`.
    ///
    /// Scores on a worker pool sized by `config.worker_fraction` when
    /// `config.parallel` is set and the `parallel` feature is enabled, and
    /// on the calling thread otherwise.
    pub fn run<E: CostEvaluator + ?Sized>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &GeneticConfig,
    ) -> Result<GeneticResult> {
        Self::run_observed(space, evaluator, config, &mut NoopObserver)
    }

    /// Like [`run`](Self::run), reporting progress to `observer`.
    pub fn run_observed<E, O>(
        space: &ParameterSpace,
        evaluator: &E,
        config: &GeneticConfig,
        observer: &mut O,
    ) -> Result<GeneticResult>
    where
        E: CostEvaluator + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        run_default(space, evaluator, config, &mut rng, observer)
    }

    /// Runs the search with an explicit batch evaluator, RNG and observer.
    ///
    /// # Errors
    /// [`SearchError::InvalidConfiguration`] before any evaluation if the
    /// config is invalid; the first evaluation error otherwise.
    pub fn run_with<E, B, R, O>(
        space: &ParameterSpace,
        evaluator: &E,
        batch: &B,
        config: &GeneticConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<GeneticResult>
    where
        E: CostEvaluator + ?Sized,
        B: BatchEvaluator + ?Sized,
        R: Rng + ?Sized,
        O: SearchObserver + ?Sized,
    {
        config.validate()?;
        let objective = config.objective;
        let size = config.population_size;
        let elite_count = config.elite_count().min(size);

        tracing::debug!(
            population = size,
            generations = config.max_generations,
            elite_count,
            "genetic search started"
        );

        // 1. Initialize population on the lattice
        let mut population: Vec<ParameterVector> = (0..size)
            .map(|_| space.lattice_vector(rng, config.lattice_resolution))
            .collect();

        let mut history = Vec::with_capacity(config.max_generations);
        let mut evaluations = 0usize;
        let mut best_seen = objective.worst();
        let mut ranked: Vec<(ParameterVector, CostResult)> = Vec::new();

        // 2. Evolutionary loop
        for generation in 0..config.max_generations {
            // Synchronous barrier: the whole population is scored before ranking.
            let results = batch.evaluate_batch(evaluator, &population)?;
            if results.len() != population.len() {
                return Err(SearchError::WorkerPool(format!(
                    "batch evaluator returned {} results for {} vectors",
                    results.len(),
                    population.len()
                )));
            }
            for (offset, (v, r)) in population.iter().zip(&results).enumerate() {
                observer.on_evaluation(evaluations + offset, v, r);
            }
            evaluations += population.len();

            // Stable sort keeps earlier individuals ahead on ties.
            ranked = population.into_iter().zip(results).collect();
            ranked.sort_by(|a, b| objective.rank(a.1.cost, b.1.cost));

            let stats = GenerationStats::from_ranked(generation, &ranked, elite_count);
            tracing::debug!(
                generation,
                best = stats.best_cost,
                median = stats.median_cost,
                "generation ranked"
            );
            observer.on_generation(&stats);
            history.push(stats);

            let (leader, leader_result) = &ranked[0];
            if objective.is_better(leader_result.cost, best_seen) {
                best_seen = leader_result.cost;
                observer.on_improvement(generation, leader, leader_result);
            }

            // The last generation's offspring would never be scored.
            population = if generation + 1 < config.max_generations {
                breed(space, &ranked[..elite_count], config, rng)
            } else {
                Vec::new()
            };
        }

        // 3. Top of the final ranking
        let (best, best_result) = ranked
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::config("population_size must be at least 1"))?;

        tracing::debug!(cost = best_result.cost, evaluations, "genetic search finished");
        observer.on_finish(&best, &best_result);

        Ok(GeneticResult {
            best,
            best_result,
            generations: config.max_generations,
            evaluations,
            history,
        })
    }
}

#[cfg(feature = "parallel")]
fn run_default<E, R, O>(
    space: &ParameterSpace,
    evaluator: &E,
    config: &GeneticConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<GeneticResult>
where
    E: CostEvaluator + ?Sized,
    R: Rng + ?Sized,
    O: SearchObserver + ?Sized,
{
    if config.parallel {
        let pool = super::batch::ParallelBatch::with_fraction(config.worker_fraction)?;
        tracing::debug!(threads = pool.threads(), "scoring on worker pool");
        GeneticSearch::run_with(space, evaluator, &pool, config, rng, observer)
    } else {
        GeneticSearch::run_with(space, evaluator, &SequentialBatch, config, rng, observer)
    }
}

#[cfg(not(feature = "parallel"))]
fn run_default<E, R, O>(
    space: &ParameterSpace,
    evaluator: &E,
    config: &GeneticConfig,
    rng: &mut R,
    observer: &mut O,
) -> Result<GeneticResult>
where
    E: CostEvaluator + ?Sized,
    R: Rng + ?Sized,
    O: SearchObserver + ?Sized,
{
    GeneticSearch::run_with(space, evaluator, &SequentialBatch, config, rng, observer)
}

/// Builds the next population: elites first, then bred children until the
/// population is full.
///
/// Mutation and crossover are drawn independently on every attempt; an
/// attempt that adds nothing is simply repeated.
fn breed<R: Rng + ?Sized>(
    space: &ParameterSpace,
    elites: &[(ParameterVector, CostResult)],
    config: &GeneticConfig,
    rng: &mut R,
) -> Vec<ParameterVector> {
    let size = config.population_size;
    let mut next: Vec<ParameterVector> = Vec::with_capacity(size);
    next.extend(elites.iter().map(|(v, _)| v.clone()));

    while next.len() < size {
        if rng.random_bool(config.mutation_prob) {
            let parent = &elites[rng.random_range(0..elites.len())].0;
            next.push(operators::mutate(space, parent, config.mutation_scale, rng));
        }
        if next.len() < size && rng.random_bool(config.crossover_prob) {
            let p1 = &elites[rng.random_range(0..elites.len())].0;
            let p2 = &elites[rng.random_range(0..elites.len())].0;
            next.push(operators::single_point_crossover(p1, p2, rng));
        }
    }

    next
}

// ============================================================================
// Tests
// ============================================================================
