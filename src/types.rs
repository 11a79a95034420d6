//! Core trait definitions shared by every engine.
//!
//! The engines are oblivious to the solution representation: a problem
//! supplies an initializer, an objective, and (depending on the engine) a
//! neighbor operator and a crossover operator. Stopping is delegated to a
//! [`Terminate`] predicate.
//!
//! # Maximization
//!
//! All engines maximize the objective. For minimization, negate it.

use crate::evolution::MatingPool;
use rand::Rng;

/// Defines a black-box search problem.
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use sho_search::Problem;
///
/// struct Coverage { width: f64 }
///
/// impl Problem for Coverage {
///     type Solution = Vec<f64>;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
///         (0..4).map(|_| rng.random_range(0.0..self.width)).collect()
///     }
///
///     fn objective(&self, sol: &Vec<f64>) -> f64 {
///         sol.iter().sum()
///     }
/// }
/// ```
pub trait Problem {
    /// The solution representation type.
    type Solution: Clone;

    /// Draws a fresh, independent candidate.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Computes the value of a solution. Higher is better.
    fn objective(&self, solution: &Self::Solution) -> f64;
}

/// A problem with a perturbation (mutation) operator.
pub trait Neighborhood: Problem {
    /// Derives a neighbor of `solution`.
    ///
    /// The returned value is the new candidate; the engine never inspects
    /// the argument again after the call.
    fn neighbor<R: Rng>(&self, solution: &Self::Solution, rng: &mut R) -> Self::Solution;
}

/// A problem with a recombination operator, for population engines.
pub trait Crossover: Neighborhood {
    /// Builds one child from the pool's primary parent and its mates.
    ///
    /// Implementations typically pick a mate with
    /// [`MatingPool::choose_mate`] and may apply [`Neighborhood::neighbor`]
    /// to the child with probability [`MatingPool::mutation_rate`].
    ///
    /// The default implementation clones the primary parent.
    fn crossover<R: Rng>(
        &self,
        pool: &MatingPool<'_, Self::Solution>,
        _rng: &mut R,
    ) -> Self::Solution {
        pool.parent().clone()
    }
}

/// Decides whether an engine keeps iterating.
///
/// Called before every iteration (or generation) with the number of
/// completed iterations and the current incumbent. Returning `false` stops
/// the engine; this is the only stopping rule the engines know.
///
/// Any `FnMut(usize, f64, &S) -> bool` closure implements this trait.
pub trait Terminate<S> {
    /// Returns `true` to run another iteration.
    fn proceed(&mut self, iteration: usize, best_value: f64, best: &S) -> bool;
}

impl<S, F> Terminate<S> for F
where
    F: FnMut(usize, f64, &S) -> bool,
{
    fn proceed(&mut self, iteration: usize, best_value: f64, best: &S) -> bool {
        self(iteration, best_value, best)
    }
}

/// A solution paired with its cached objective value.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<S> {
    /// The candidate solution.
    pub solution: S,
    /// `objective(solution)`, computed once.
    pub value: f64,
}

impl<S> Scored<S> {
    /// Evaluates `solution` with the problem's objective.
    pub fn evaluate<P>(problem: &P, solution: S) -> Self
    where
        P: Problem<Solution = S>,
    {
        let value = problem.objective(&solution);
        Self { solution, value }
    }
}

/// Best-value trace sampled every `interval` steps.
///
/// Holds the seed value, the value after every step that is a multiple of
/// `interval`, and the value at the final step.
pub(crate) struct ValueHistory {
    interval: usize,
    values: Vec<f64>,
    last_step: usize,
}

impl ValueHistory {
    pub(crate) fn new(interval: usize, seed_value: f64) -> Self {
        Self {
            interval: interval.max(1),
            values: vec![seed_value],
            last_step: 0,
        }
    }

    pub(crate) fn interval(&self) -> usize {
        self.interval
    }

    /// Records `value` after `step` completed steps, if `step` is sampled.
    pub(crate) fn record(&mut self, step: usize, value: f64) {
        if step % self.interval == 0 {
            self.values.push(value);
            self.last_step = step;
        }
    }

    /// Closes the trace at `step`, appending `value` if it was not sampled.
    pub(crate) fn finish(mut self, step: usize, value: f64) -> Vec<f64> {
        if step != self.last_step {
            self.values.push(value);
        }
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Identity;

    impl Problem for Identity {
        type Solution = f64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> f64 {
            0.0
        }

        fn objective(&self, x: &f64) -> f64 {
            *x
        }
    }

    #[test]
    fn test_closure_is_terminate() {
        let mut calls = 0;
        let mut stop_at_three = |it: usize, _v: f64, _s: &f64| {
            calls += 1;
            it < 3
        };
        assert!(stop_at_three.proceed(0, 1.0, &1.0));
        assert!(!stop_at_three.proceed(3, 1.0, &1.0));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_scored_caches_value() {
        let scored = Scored::evaluate(&Identity, 7.5);
        assert_eq!(scored.value, 7.5);
        assert_eq!(scored.solution, 7.5);
    }

    #[test]
    fn test_history_samples_every_interval() {
        let mut history = ValueHistory::new(10, 0.0);
        for step in 1..=35 {
            history.record(step, step as f64);
        }
        assert_eq!(history.finish(35, 35.0), vec![0.0, 10.0, 20.0, 30.0, 35.0]);
    }

    #[test]
    fn test_history_final_step_not_duplicated() {
        let mut history = ValueHistory::new(5, 1.0);
        for step in 1..=10 {
            history.record(step, 2.0);
        }
        assert_eq!(history.finish(10, 2.0), vec![1.0, 2.0, 2.0]);

        let history = ValueHistory::new(5, 1.0);
        assert_eq!(history.finish(0, 1.0), vec![1.0]);
    }

    #[test]
    fn test_history_zero_interval_records_every_step() {
        let mut history = ValueHistory::new(0, 0.0);
        assert_eq!(history.interval(), 1);
        history.record(1, 1.0);
        history.record(2, 2.0);
        assert_eq!(history.finish(2, 2.0), vec![0.0, 1.0, 2.0]);
    }
}
