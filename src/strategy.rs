//! Strategy selection.
//!
//! [`Strategy`] wraps the four runners behind one closed enum so callers can
//! pick a search by name (for example from a config file) and get back a
//! common [`SearchOutcome`].
//!
//! ```
//! use hyper_search::cost::{CostFn, CostResult};
//! use hyper_search::space::{NumType, ParameterSpace, ParameterVector};
//! use hyper_search::strategy::Strategy;
//!
//! let space = ParameterSpace::new(NumType::Float, [("x", 0.0, 10.0)]).unwrap();
//! let eval = CostFn::new(|v: &ParameterVector| CostResult::from_cost((v[0] - 3.0).abs()));
//! let strategy: Strategy = "hillclimb".parse().unwrap();
//! let outcome = strategy.with_seed(7).run(&space, &eval).unwrap();
//! assert_eq!(outcome.strategy, "hillclimb");
//! ```

use crate::annealing::{AnnealingConfig, SimulatedAnnealing};
use crate::cost::{CostEvaluator, CostResult, Objective};
use crate::create_rng;
use crate::error::{Result, SearchError};
use crate::genetic::{GeneticConfig, GeneticSearch};
use crate::hillclimb::{HillClimb, HillClimbConfig};
use crate::observer::{NoopObserver, SearchObserver};
use crate::random::{RandomConfig, RandomSearch};
use crate::space::{ParameterSpace, ParameterVector};
use std::str::FromStr;

/// A search strategy together with its tuning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "strategy", rename_all = "lowercase"))]
pub enum Strategy {
    Random(RandomConfig),
    HillClimb(HillClimbConfig),
    Annealing(AnnealingConfig),
    Genetic(GeneticConfig),
}

/// Common summary of a finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Canonical name of the strategy that produced this outcome.
    pub strategy: &'static str,

    /// The vector the strategy returned.
    pub best: ParameterVector,

    /// Evaluation of `best`.
    pub result: CostResult,

    /// Number of cost evaluations spent.
    pub evaluations: usize,
}

impl Strategy {
    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Random(_) => "random",
            Self::HillClimb(_) => "hillclimb",
            Self::Annealing(_) => "annealing",
            Self::Genetic(_) => "genetic",
        }
    }

    pub fn objective(&self) -> Objective {
        match self {
            Self::Random(c) => c.objective,
            Self::HillClimb(c) => c.objective,
            Self::Annealing(c) => c.objective,
            Self::Genetic(c) => c.objective,
        }
    }

    pub fn with_objective(self, objective: Objective) -> Self {
        match self {
            Self::Random(c) => Self::Random(c.with_objective(objective)),
            Self::HillClimb(c) => Self::HillClimb(c.with_objective(objective)),
            Self::Annealing(c) => Self::Annealing(c.with_objective(objective)),
            Self::Genetic(c) => Self::Genetic(c.with_objective(objective)),
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Self::Random(c) => Self::Random(c.with_seed(seed)),
            Self::HillClimb(c) => Self::HillClimb(c.with_seed(seed)),
            Self::Annealing(c) => Self::Annealing(c.with_seed(seed)),
            Self::Genetic(c) => Self::Genetic(c.with_seed(seed)),
        }
    }

    /// Runs the strategy without progress reporting.
    pub fn run<E: CostEvaluator + ?Sized>(
        &self,
        space: &ParameterSpace,
        evaluator: &E,
    ) -> Result<SearchOutcome> {
        self.run_observed(space, evaluator, &mut NoopObserver)
    }

    /// Runs the strategy, reporting progress to `observer`.
    pub fn run_observed<E, O>(
        &self,
        space: &ParameterSpace,
        evaluator: &E,
        observer: &mut O,
    ) -> Result<SearchOutcome>
    where
        E: CostEvaluator + ?Sized,
        O: SearchObserver + ?Sized,
    {
        tracing::info!(strategy = self.name(), params = space.len(), "search started");

        let (best, result, evaluations) = match self {
            Self::Random(config) => {
                let mut rng = create_rng(config.seed);
                let r = RandomSearch::run_with(space, evaluator, config, &mut rng, observer)?;
                (r.best, r.best_result, r.iterations)
            }
            Self::HillClimb(config) => {
                let mut rng = create_rng(config.seed);
                let r = HillClimb::run_with(space, evaluator, config, &mut rng, observer)?;
                (r.best, r.best_result, r.evaluations)
            }
            Self::Annealing(config) => {
                let mut rng = create_rng(config.seed);
                let r = SimulatedAnnealing::run_with(space, evaluator, config, &mut rng, observer)?;
                // The starting point is scored before the first step.
                (r.best, r.best_result, r.iterations + 1)
            }
            Self::Genetic(config) => {
                let r = GeneticSearch::run_observed(space, evaluator, config, observer)?;
                (r.best, r.best_result, r.evaluations)
            }
        };

        tracing::info!(
            strategy = self.name(),
            best = %best,
            cost = result.cost,
            evaluations,
            "search finished"
        );

        Ok(SearchOutcome {
            strategy: self.name(),
            best,
            result,
            evaluations,
        })
    }
}

impl FromStr for Strategy {
    type Err = SearchError;

    /// Parses a strategy name into that strategy with default tuning.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "random" | "random_search" | "rs" => Ok(Self::Random(RandomConfig::default())),
            "hillclimb" | "hill_climb" | "hill-climb" | "hc" => {
                Ok(Self::HillClimb(HillClimbConfig::default()))
            }
            "annealing" | "simulated_annealing" | "sa" => {
                Ok(Self::Annealing(AnnealingConfig::default()))
            }
            "genetic" | "ga" => Ok(Self::Genetic(GeneticConfig::default())),
            _ => Err(SearchError::UnknownStrategy(s.to_string())),
        }
    }
}
