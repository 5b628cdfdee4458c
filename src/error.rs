//! Error taxonomy for space construction, configuration and evaluation.

use thiserror::Error;

/// Error returned by a [`CostEvaluator`](crate::cost::CostEvaluator).
///
/// The search never inspects or retries it; it is carried unchanged inside
/// [`SearchError::Evaluation`].
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Everything that can stop a search before it returns a vector.
#[derive(Error, Debug)]
pub enum SearchError {
    /// A parameter's bounds do not describe a usable range.
    #[error("parameter `{name}` has invalid range [{min}, {max}]")]
    InvalidRange { name: String, min: f64, max: f64 },

    /// A tuning parameter is outside its domain. No evaluation was performed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The cost callback failed; the run was aborted.
    #[error("cost evaluation failed: {0}")]
    Evaluation(#[source] EvalError),

    /// A strategy name did not match any known strategy.
    #[error("unknown search strategy `{0}`")]
    UnknownStrategy(String),

    /// The worker pool for batch evaluation could not be created.
    #[error("worker pool error: {0}")]
    WorkerPool(String),
}

impl SearchError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SearchError::InvalidConfiguration(msg.into())
    }

    /// Returns `true` if this error originated in the cost callback.
    pub fn is_evaluation(&self) -> bool {
        matches!(self, SearchError::Evaluation(_))
    }
}
