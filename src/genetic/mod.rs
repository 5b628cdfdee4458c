//! Genetic Search.
//!
//! Population-based search over the parameter space. Each generation the
//! whole population is scored through a [`BatchEvaluator`], ranked, and the
//! top `floor(elite_fraction * population_size)` individuals survive
//! unchanged. The rest of the next population is bred from those elites by
//! single-coordinate mutation and single-point crossover.
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: population size, operator probabilities, elitism
//! - [`GeneticSearch`]: executes the evolutionary loop
//! - [`BatchEvaluator`]: ordered, possibly parallel, population scoring
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod batch;
mod config;
pub mod operators;
mod runner;

#[cfg(feature = "parallel")]
pub use batch::{worker_count, ParallelBatch};
pub use batch::{BatchEvaluator, SequentialBatch};
pub use config::GeneticConfig;
pub use runner::{GenerationStats, GeneticResult, GeneticSearch};
