//! Hill Climbing.
//!
//! Steepest-descent local search over the axis-aligned neighborhood: each
//! round moves every coordinate one `step` down and up (when the move stays
//! in range), evaluates all neighbors, and adopts the best one only if it
//! strictly beats the current point. The first round with no strictly
//! better neighbor ends the search at a local optimum.

mod config;
mod runner;

pub use config::HillClimbConfig;
pub use runner::{HillClimb, HillClimbResult};
