//! Population-based evolutionary search.
//!
//! Three engines share seeding (`population_size` independent draws, each
//! evaluated once) and the mutation-then-crossover variation test, and
//! differ in how they sample and replace:
//!
//! - [`Replacement::Truncation`]: vary the top `sample_size`, append,
//!   re-rank, truncate.
//! - [`Replacement::Tournament`]: binary tournaments with replacement,
//!   append winners, vary in place, re-rank, truncate.
//! - [`Replacement::KeyedTournament`]: binary tournaments over rank
//!   positions without replacement, overwrite winners under stable keys.
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: population size, sample size, operator rates
//! - [`EvolutionRunner`]: validates and runs an engine
//! - [`EvolutionResult`]: best solution, final ranked population, statistics
//! - [`MatingPool`]: parents handed to [`Crossover`](crate::Crossover)
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

mod config;
mod keyed;
pub mod population;
mod runner;
mod tournament;
mod truncation;

pub use config::{EvolutionConfig, Replacement};
pub use population::{MatingPool, RankSampler};
pub use runner::{EvolutionResult, EvolutionRunner};
