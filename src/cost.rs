//! The boundary to the user's cost function.
//!
//! A [`CostEvaluator`] maps a [`ParameterVector`] to a [`CostResult`]. The
//! search treats it as an opaque, pure function: it is called from worker
//! threads during genetic batch evaluation, its errors abort the run, and
//! only [`CostResult::cost`] ever influences a decision.

use crate::error::{EvalError, SearchError};
use crate::space::ParameterVector;
use std::cmp::Ordering;
use std::sync::Arc;

/// Outcome of one cost evaluation.
///
/// `overkill` and `escape` are diagnostics: they are reported to observers
/// and returned with the best vector, but never compared.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostResult {
    pub cost: f64,
    pub overkill: f64,
    pub escape: f64,
}

impl CostResult {
    pub fn new(cost: f64, overkill: f64, escape: f64) -> Self {
        Self {
            cost,
            overkill,
            escape,
        }
    }

    /// A result with zeroed diagnostics.
    pub fn from_cost(cost: f64) -> Self {
        Self {
            cost,
            ..Self::default()
        }
    }
}

/// Direction of optimization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Objective {
    #[default]
    Minimize,
    Maximize,
}

impl Objective {
    /// Maps the classic `reverse` flag: `true` means maximize.
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Objective::Maximize
        } else {
            Objective::Minimize
        }
    }

    /// Strict comparison: `a` beats `b`.
    ///
    /// NaN always loses: a NaN `a` beats nothing, and any other `a` beats a
    /// NaN `b`.
    pub fn is_better(self, a: f64, b: f64) -> bool {
        if a.is_nan() {
            return false;
        }
        if b.is_nan() {
            return true;
        }
        match self {
            Objective::Minimize => a < b,
            Objective::Maximize => a > b,
        }
    }

    /// Sentinel that every real cost beats.
    pub fn worst(self) -> f64 {
        match self {
            Objective::Minimize => f64::INFINITY,
            Objective::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Total ordering that puts better costs first and NaN last.
    pub fn rank(self, a: f64, b: f64) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
                match self {
                    Objective::Minimize => ord,
                    Objective::Maximize => ord.reverse(),
                }
            }
        }
    }
}

/// A cost function over parameter vectors.
///
/// Implementations must tolerate concurrent calls from several threads;
/// any interior serialization is the implementor's business.
pub trait CostEvaluator: Send + Sync {
    /// Scores one vector.
    ///
    /// # Errors
    /// Any error is propagated unchanged and aborts the current search.
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError>;
}

impl<E: CostEvaluator + ?Sized> CostEvaluator for &E {
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError> {
        (**self).evaluate(vector)
    }
}

impl<E: CostEvaluator + ?Sized> CostEvaluator for Arc<E> {
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError> {
        (**self).evaluate(vector)
    }
}

impl<E: CostEvaluator + ?Sized> CostEvaluator for Box<E> {
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError> {
        (**self).evaluate(vector)
    }
}

/// Adapts an infallible closure into a [`CostEvaluator`].
///
/// # Examples
///
/// ```
/// use hyper_search::cost::{CostEvaluator, CostFn, CostResult};
/// use hyper_search::space::ParameterVector;
///
/// let eval = CostFn::new(|v: &ParameterVector| CostResult::from_cost(v.iter().sum()));
/// let r = eval.evaluate(&vec![1.0, 2.0].into()).unwrap();
/// assert_eq!(r.cost, 3.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CostFn<F>(F);

impl<F> CostFn<F>
where
    F: Fn(&ParameterVector) -> CostResult + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> CostEvaluator for CostFn<F>
where
    F: Fn(&ParameterVector) -> CostResult + Send + Sync,
{
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError> {
        Ok((self.0)(vector))
    }
}

/// Adapts a fallible closure into a [`CostEvaluator`].
#[derive(Debug, Clone, Copy)]
pub struct TryCostFn<F>(F);

impl<F> TryCostFn<F>
where
    F: Fn(&ParameterVector) -> Result<CostResult, EvalError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> CostEvaluator for TryCostFn<F>
where
    F: Fn(&ParameterVector) -> Result<CostResult, EvalError> + Send + Sync,
{
    fn evaluate(&self, vector: &ParameterVector) -> Result<CostResult, EvalError> {
        (self.0)(vector)
    }
}

/// Runs `evaluator` and lifts its error into [`SearchError::Evaluation`].
pub(crate) fn score<E: CostEvaluator + ?Sized>(
    evaluator: &E,
    vector: &ParameterVector,
) -> crate::Result<CostResult> {
    evaluator.evaluate(vector).map_err(SearchError::Evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_is_strict() {
        assert!(Objective::Minimize.is_better(1.0, 2.0));
        assert!(!Objective::Minimize.is_better(2.0, 2.0));
        assert!(Objective::Maximize.is_better(3.0, 2.0));
        assert!(!Objective::Maximize.is_better(2.0, 2.0));
    }

    #[test]
    fn test_worst_loses_to_everything() {
        for obj in [Objective::Minimize, Objective::Maximize] {
            assert!(obj.is_better(0.0, obj.worst()));
            assert!(obj.is_better(-1e300, obj.worst()));
            assert!(obj.is_better(1e300, obj.worst()));
        }
    }

    #[test]
    fn test_nan_always_loses() {
        for obj in [Objective::Minimize, Objective::Maximize] {
            assert!(obj.is_better(1.0, f64::NAN));
            assert!(obj.is_better(obj.worst(), f64::NAN));
            assert!(!obj.is_better(f64::NAN, 1.0));
            assert!(!obj.is_better(f64::NAN, obj.worst()));
            assert!(!obj.is_better(f64::NAN, f64::NAN));
        }
    }

    #[test]
    fn test_rank_puts_nan_last() {
        let mut costs = vec![f64::NAN, 3.0, f64::NAN, 1.0, 2.0];
        costs.sort_by(|a, b| Objective::Minimize.rank(*a, *b));
        assert_eq!(&costs[..3], &[1.0, 2.0, 3.0]);
        assert!(costs[3..].iter().all(|c| c.is_nan()));

        costs.sort_by(|a, b| Objective::Maximize.rank(*a, *b));
        assert_eq!(&costs[..3], &[3.0, 2.0, 1.0]);
        assert!(costs[3..].iter().all(|c| c.is_nan()));
    }

    #[test]
    fn test_rank_is_total_with_many_nans() {
        // Large enough to leave the small-slice sort path.
        let mut costs: Vec<f64> = (0..500)
            .map(|i| if i % 3 == 0 { f64::NAN } else { ((i * 37) % 101) as f64 })
            .collect();
        for obj in [Objective::Minimize, Objective::Maximize] {
            costs.sort_by(|a, b| obj.rank(*a, *b));
            let first_nan = costs.iter().position(|c| c.is_nan()).unwrap();
            assert!(costs[first_nan..].iter().all(|c| c.is_nan()));
            assert!(costs[..first_nan]
                .windows(2)
                .all(|w| obj.rank(w[0], w[1]) != Ordering::Greater));
        }
    }

    #[test]
    fn test_from_reverse() {
        assert_eq!(Objective::from_reverse(false), Objective::Minimize);
        assert_eq!(Objective::from_reverse(true), Objective::Maximize);
    }

    #[test]
    fn test_rank_orders_best_first() {
        let mut costs = vec![3.0, 1.0, 2.0];
        costs.sort_by(|a, b| Objective::Minimize.rank(*a, *b));
        assert_eq!(costs, vec![1.0, 2.0, 3.0]);
        costs.sort_by(|a, b| Objective::Maximize.rank(*a, *b));
        assert_eq!(costs, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_try_cost_fn_propagates() {
        let eval = TryCostFn::new(|v: &ParameterVector| {
            if v[0] < 0.0 {
                Err("negative input".into())
            } else {
                Ok(CostResult::new(v[0], 0.1, 0.2))
            }
        });
        assert!(eval.evaluate(&vec![-1.0].into()).is_err());
        let ok = eval.evaluate(&vec![2.0].into()).unwrap();
        assert_eq!(ok, CostResult::new(2.0, 0.1, 0.2));
    }

    #[test]
    fn test_references_and_arcs_evaluate() {
        let eval = CostFn::new(|v: &ParameterVector| CostResult::from_cost(v[0] * 2.0));
        let v: ParameterVector = vec![1.5].into();
        assert_eq!((&eval).evaluate(&v).unwrap().cost, 3.0);
        let shared = Arc::new(eval);
        assert_eq!(shared.evaluate(&v).unwrap().cost, 3.0);
    }
}
