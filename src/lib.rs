//! Black-box hyperparameter search over bounded numeric spaces.
//!
//! Given a [`ParameterSpace`](space::ParameterSpace) and a
//! [`CostEvaluator`](cost::CostEvaluator), each strategy proposes candidate
//! vectors, scores them, and returns the best one it found:
//!
//! - **Random Search**: independent uniform samples, best-so-far kept.
//! - **Hill Climbing**: steepest-descent over the axis-aligned neighborhood
//!   until no neighbor is strictly better.
//! - **Simulated Annealing**: single-coordinate moves with Metropolis
//!   acceptance under a geometric cooling schedule.
//! - **Genetic Search**: lattice-seeded population, elitist selection,
//!   mutation and single-point crossover, with the population scored as a
//!   batch (optionally on a rayon worker pool).
//!
//! [`Strategy`](strategy::Strategy) selects one of them by name. Progress can
//! be observed through [`SearchObserver`](observer::SearchObserver); the
//! stock [`TracingObserver`](observer::TracingObserver) forwards it to
//! `tracing`.
//!
//! # Features
//!
//! - `parallel` (default): rayon-backed batch evaluation for genetic search.
//! - `serde`: `Serialize`/`Deserialize` for spaces, vectors, results and
//!   configurations.

pub mod annealing;
pub mod cost;
pub mod error;
pub mod genetic;
pub mod hillclimb;
pub mod observer;
pub mod random;
pub mod space;
pub mod strategy;

pub use error::{EvalError, Result, SearchError};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// RNG for a run: seeded when `seed` is given, from entropy otherwise.
pub(crate) fn create_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
