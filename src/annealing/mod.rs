//! Simulated Annealing.
//!
//! Single-point search that perturbs one coordinate by `±step` per
//! iteration and accepts the candidate if it is better, or otherwise with
//! the Metropolis probability `exp(-(candidate - current) / T)`. The
//! temperature decays geometrically and the run ends once it reaches
//! [`FINAL_TEMPERATURE`]. The returned point is the current point at that
//! moment; no separate best-so-far is kept.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;

pub use config::{AnnealingConfig, FINAL_TEMPERATURE};
pub use runner::{AnnealingResult, SimulatedAnnealing};
