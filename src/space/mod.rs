//! The bounded search domain.
//!
//! A [`ParameterSpace`] is an ordered list of named parameters, each with an
//! inclusive `[min, max]` range, plus a space-wide [`NumType`] that decides
//! how sampled and perturbed values are quantized. The order of parameters
//! fixes the index of each value in a [`ParameterVector`].
//!
//! Every strategy in this crate draws its points through the space and
//! clamps every derived coordinate back into range before the point is
//! evaluated, so observed vectors always satisfy [`ParameterSpace::contains`].

mod vector;

pub use vector::ParameterVector;

use crate::error::{Result, SearchError};
use rand::Rng;
use std::collections::HashSet;

/// How parameter values are quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NumType {
    /// Whole numbers; both bounds are reachable by sampling.
    Integer,
    /// Real numbers; uniform samples are rounded to two decimals.
    #[default]
    Float,
}

/// A single named dimension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parameter {
    pub name: String,
    pub min: f64,
    pub max: f64,
}

impl Parameter {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            min,
            max,
        }
    }

    /// Width of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Serializable description of a space, validated on conversion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceDescriptor {
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_type: NumType,
    pub parameters: Vec<Parameter>,
}

/// Ordered, immutable set of bounded parameters.
///
/// # Examples
///
/// ```
/// use hyper_search::space::{NumType, ParameterSpace};
///
/// let space = ParameterSpace::new(
///     NumType::Float,
///     [("learning_rate", 0.001, 0.1), ("momentum", 0.0, 0.99)],
/// )
/// .unwrap();
/// assert_eq!(space.len(), 2);
/// assert_eq!(space.index_of("momentum"), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "SpaceDescriptor", into = "SpaceDescriptor")
)]
pub struct ParameterSpace {
    params: Vec<Parameter>,
    num_type: NumType,
}

impl ParameterSpace {
    /// Builds a space from `(name, min, max)` triples in declaration order.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidRange`] if a range is empty, inverted or not
    /// finite, or if an integer space has fractional bounds.
    /// [`SearchError::InvalidConfiguration`] if there are no parameters or a
    /// name repeats.
    pub fn new<I, S>(num_type: NumType, params: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64, f64)>,
        S: Into<String>,
    {
        let params = params
            .into_iter()
            .map(|(name, min, max)| Parameter::new(name, min, max))
            .collect();
        Self::from_parameters(num_type, params)
    }

    /// Builds a space from already-assembled [`Parameter`]s.
    pub fn from_parameters(num_type: NumType, params: Vec<Parameter>) -> Result<Self> {
        if params.is_empty() {
            return Err(SearchError::config("parameter space must not be empty"));
        }

        let mut seen = HashSet::with_capacity(params.len());
        for p in &params {
            let fractional = num_type == NumType::Integer
                && (p.min.fract() != 0.0 || p.max.fract() != 0.0);
            if !p.min.is_finite() || !p.max.is_finite() || p.min >= p.max || fractional {
                return Err(SearchError::InvalidRange {
                    name: p.name.clone(),
                    min: p.min,
                    max: p.max,
                });
            }
            if !seen.insert(p.name.as_str()) {
                return Err(SearchError::config(format!(
                    "duplicate parameter name `{}`",
                    p.name
                )));
            }
        }

        Ok(Self { params, num_type })
    }

    /// Number of parameters (and length of every vector in this space).
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Always `false` for a constructed space; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn num_type(&self) -> NumType {
        self.num_type
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// Parameter names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    /// Position of `name` in the vector layout.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    /// `(min, max)` of the parameter at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        let p = &self.params[index];
        (p.min, p.max)
    }

    /// Draws a uniformly random vector.
    ///
    /// Float spaces round each value to two decimals; integer spaces draw
    /// whole numbers with both bounds inclusive.
    pub fn random_vector<R: Rng + ?Sized>(&self, rng: &mut R) -> ParameterVector {
        self.params
            .iter()
            .map(|p| match self.num_type {
                NumType::Float => {
                    let raw = rng.random_range(p.min..=p.max);
                    round_to_cents(raw).clamp(p.min, p.max)
                }
                NumType::Integer => rng.random_range(p.min as i64..=p.max as i64) as f64,
            })
            .collect()
    }

    /// Draws a vector whose components lie on the grid
    /// `min + k * resolution` inside each range.
    ///
    /// Integer spaces round grid points to whole numbers.
    ///
    /// # Panics
    /// Panics if `resolution` is not positive.
    pub fn lattice_vector<R: Rng + ?Sized>(&self, rng: &mut R, resolution: f64) -> ParameterVector {
        assert!(resolution > 0.0, "lattice resolution must be positive");
        self.params
            .iter()
            .enumerate()
            .map(|(i, p)| {
                // Tolerance keeps spans like 1.0 / 0.05 from flooring to 19.
                let steps = (p.span() / resolution + 1e-9).floor() as u64;
                let k = rng.random_range(0..=steps);
                self.quantize(i, p.min + k as f64 * resolution)
            })
            .collect()
    }

    /// Bounds `value` to the range of the parameter at `index`.
    pub fn clamp(&self, index: usize, value: f64) -> f64 {
        let p = &self.params[index];
        value.clamp(p.min, p.max)
    }

    /// Rounds `value` to the space's numeric type, then clamps it.
    pub fn quantize(&self, index: usize, value: f64) -> f64 {
        let value = match self.num_type {
            NumType::Integer => value.round(),
            NumType::Float => value,
        };
        self.clamp(index, value)
    }

    /// Whether `vector` has the right length and every value is in range.
    pub fn contains(&self, vector: &[f64]) -> bool {
        vector.len() == self.params.len()
            && vector
                .iter()
                .zip(&self.params)
                .all(|(v, p)| *v >= p.min && *v <= p.max)
    }

    /// Pairs each value with its parameter name.
    pub fn named<'a>(&'a self, vector: &'a [f64]) -> Vec<(&'a str, f64)> {
        self.names().zip(vector.iter().copied()).collect()
    }
}

impl TryFrom<SpaceDescriptor> for ParameterSpace {
    type Error = SearchError;

    fn try_from(desc: SpaceDescriptor) -> Result<Self> {
        Self::from_parameters(desc.num_type, desc.parameters)
    }
}

impl From<ParameterSpace> for SpaceDescriptor {
    fn from(space: ParameterSpace) -> Self {
        SpaceDescriptor {
            num_type: space.num_type,
            parameters: space.params,
        }
    }
}

fn round_to_cents(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
