//! Population scoring.
//!
//! The genetic loop never calls the cost function directly; it hands the
//! whole population to a [`BatchEvaluator`] and blocks until every vector is
//! scored. Implementations must return results in input order.

use crate::cost::{score, CostEvaluator, CostResult};
use crate::error::Result;
use crate::space::ParameterVector;

/// Scores a batch of vectors, preserving order.
pub trait BatchEvaluator {
    /// Returns one result per input vector, `results[i]` belonging to
    /// `vectors[i]`. The first evaluation error aborts the batch.
    fn evaluate_batch<E: CostEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        vectors: &[ParameterVector],
    ) -> Result<Vec<CostResult>>;
}

impl<B: BatchEvaluator + ?Sized> BatchEvaluator for &B {
    fn evaluate_batch<E: CostEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        vectors: &[ParameterVector],
    ) -> Result<Vec<CostResult>> {
        (**self).evaluate_batch(evaluator, vectors)
    }
}

/// Evaluates one vector after another on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialBatch;

impl BatchEvaluator for SequentialBatch {
    fn evaluate_batch<E: CostEvaluator + ?Sized>(
        &self,
        evaluator: &E,
        vectors: &[ParameterVector],
    ) -> Result<Vec<CostResult>> {
        vectors.iter().map(|v| score(evaluator, v)).collect()
    }
}

#[cfg(feature = "parallel")]
pub use parallel::{worker_count, ParallelBatch};

#[cfg(feature = "parallel")]
mod parallel {
    use super::BatchEvaluator;
    use crate::cost::{score, CostEvaluator, CostResult};
    use crate::error::{Result, SearchError};
    use crate::space::ParameterVector;
    use rayon::prelude::*;

    /// Number of workers for a fraction of the available cores, at least 1.
    pub fn worker_count(fraction: f64) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        ((cores as f64 * fraction).floor() as usize).max(1)
    }

    /// Fans evaluation out over a dedicated rayon thread pool.
    ///
    /// The pool is owned by this value and lives as long as it does, so a
    /// search does not compete with the global rayon pool.
    #[derive(Debug)]
    pub struct ParallelBatch {
        pool: rayon::ThreadPool,
    }

    impl ParallelBatch {
        /// Creates a pool with exactly `threads` workers.
        pub fn new(threads: usize) -> Result<Self> {
            if threads == 0 {
                return Err(SearchError::config("worker thread count must be at least 1"));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("hyper-search-{i}"))
                .build()
                .map_err(|e| SearchError::WorkerPool(e.to_string()))?;
            Ok(Self { pool })
        }

        /// Creates a pool sized to `fraction` of the available cores.
        pub fn with_fraction(fraction: f64) -> Result<Self> {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return Err(SearchError::config(format!(
                    "worker_fraction must be in (0, 1], got {fraction}"
                )));
            }
            Self::new(worker_count(fraction))
        }

        pub fn threads(&self) -> usize {
            self.pool.current_num_threads()
        }
    }

    impl BatchEvaluator for ParallelBatch {
        fn evaluate_batch<E: CostEvaluator + ?Sized>(
            &self,
            evaluator: &E,
            vectors: &[ParameterVector],
        ) -> Result<Vec<CostResult>> {
            self.pool
                .install(|| vectors.par_iter().map(|v| score(evaluator, v)).collect())
        }
    }
}
