//! Owned parameter vectors.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// One candidate point in a [`ParameterSpace`](super::ParameterSpace).
///
/// Values follow the declared parameter order. The vector owns its storage,
/// so `clone()` yields an independent copy that can be mutated freely.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterVector(Vec<f64>);

impl ParameterVector {
    /// Wraps raw values.
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Returns the values as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the vector and returns the raw values.
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Returns a copy with `value` written at `index`.
    pub fn with_value(&self, index: usize, value: f64) -> Self {
        let mut next = self.clone();
        next.0[index] = value;
        next
    }
}

impl Deref for ParameterVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for ParameterVector {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl From<Vec<f64>> for ParameterVector {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for ParameterVector {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl From<ParameterVector> for Vec<f64> {
    fn from(v: ParameterVector) -> Self {
        v.0
    }
}

impl FromIterator<f64> for ParameterVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ParameterVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}
