//! Single-trajectory engines.
//!
//! Each engine keeps one incumbent and runs a generate-and-test loop:
//!
//! - **Random search**: candidates are drawn independently from the
//!   initializer.
//! - **Greedy ascent**: candidates are neighbors of the incumbent.
//! - **Simulated annealing**: neighbors of the incumbent, gated by a
//!   temperature-dependent Metropolis test.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod config;
mod runner;

pub use config::AnnealingConfig;
pub use runner::{TrajectoryResult, TrajectoryRunner, HISTORY_INTERVAL};
