//! Stochastic black-box search templates.
//!
//! Generic, representation-agnostic engines for maximizing an objective
//! over candidate solutions (real vectors, bitstrings, anything `Clone`):
//!
//! - **Random search**: independent draws from the initializer.
//! - **Greedy ascent**: hill climbing with plateau walk.
//! - **Simulated annealing**: temperature-gated acceptance of
//!   non-worsening neighbors.
//! - **Evolutionary search**: truncation, tournament, and keyed-tournament
//!   population engines.
//!
//! A problem plugs in through [`Problem`], [`Neighborhood`] and
//! [`Crossover`]; stopping is delegated entirely to a [`Terminate`]
//! predicate, usually a closure. Randomness comes from an explicit
//! `&mut impl Rng` so seeded runs replay exactly.
//!
//! # Example
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::{Rng, SeedableRng};
//! use sho_search::trajectory::TrajectoryRunner;
//! use sho_search::{Neighborhood, Problem};
//!
//! struct Peak;
//!
//! impl Problem for Peak {
//!     type Solution = f64;
//!     fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
//!         rng.random_range(-10.0..10.0)
//!     }
//!     fn objective(&self, x: &f64) -> f64 {
//!         -x * x
//!     }
//! }
//!
//! impl Neighborhood for Peak {
//!     fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
//!         x + rng.random_range(-0.5..0.5)
//!     }
//! }
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let result = TrajectoryRunner::greedy_ascent(&Peak, |it: usize, _: f64, _: &f64| it < 500, &mut rng);
//! assert!(result.best_value > -0.01);
//! ```

pub mod error;
pub mod evolution;
pub mod trajectory;
mod types;

pub use error::{Result, SearchError};
pub use types::{Crossover, Neighborhood, Problem, Scored, Terminate};
