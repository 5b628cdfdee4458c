//! Random Search.
//!
//! Samples independent uniform points from the space and keeps the best one.
//! Every iteration is independent of the others; there is no early exit.
//!
//! # References
//!
//! - Bergstra & Bengio (2012), "Random Search for Hyper-Parameter Optimization"

mod config;
mod runner;

pub use config::RandomConfig;
pub use runner::{RandomResult, RandomSearch};
