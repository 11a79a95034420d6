//! Single-trajectory execution loops.
//!
//! All three engines share one shape: seed an incumbent from the
//! initializer, then repeatedly ask the [`Terminate`] predicate, generate
//! one candidate, and decide whether it replaces the incumbent.
//!
//! Replacement uses `candidate >= best`, never strict `>`. On flat regions
//! this lets the trajectory walk across equal-valued neighbors instead of
//! stalling on the first plateau point.

use super::config::AnnealingConfig;
use crate::error::Result;
use crate::types::{Neighborhood, Problem, Scored, Terminate, ValueHistory};
use rand::Rng;
use tracing::{debug, trace};

/// Iterations between two `value_history` samples.
pub const HISTORY_INTERVAL: usize = 100;

/// Result of a single-trajectory run.
#[derive(Debug, Clone)]
pub struct TrajectoryResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Value of the best solution (`objective(best)`).
    pub best_value: f64,

    /// Number of completed iterations.
    pub iterations: usize,

    /// Number of objective evaluations, including the seed.
    pub evaluations: usize,

    /// Number of candidates that replaced the incumbent.
    pub accepted_moves: usize,

    /// Temperature after the last iteration. `None` for non-annealing engines.
    pub final_temperature: Option<f64>,

    /// Best value sampled every `history_interval` iterations: the seed
    /// first, the final best last.
    pub value_history: Vec<f64>,

    /// Iterations between two `value_history` samples.
    pub history_interval: usize,
}

impl<S: Clone> TrajectoryResult<S> {
    /// Splits into the `(best_value, best)` pair.
    pub fn into_pair(self) -> (f64, S) {
        (self.best_value, self.best)
    }
}

/// Incumbent bookkeeping shared by the three loops.
struct Trajectory<S> {
    best: Scored<S>,
    iterations: usize,
    evaluations: usize,
    accepted_moves: usize,
    history: ValueHistory,
}

impl<S: Clone> Trajectory<S> {
    fn seed<P, R>(problem: &P, rng: &mut R) -> Self
    where
        P: Problem<Solution = S>,
        R: Rng,
    {
        let best = Scored::evaluate(problem, problem.initial_solution(rng));
        let history = ValueHistory::new(HISTORY_INTERVAL, best.value);
        Self {
            best,
            iterations: 0,
            evaluations: 1,
            accepted_moves: 0,
            history,
        }
    }

    fn proceed<T: Terminate<S>>(&mut self, terminate: &mut T) -> bool {
        terminate.proceed(self.iterations, self.best.value, &self.best.solution)
    }

    /// Records one finished iteration; `candidate` replaces the incumbent
    /// when `accept` holds.
    fn step(&mut self, candidate: Scored<S>, accept: bool) {
        self.evaluations += 1;
        if accept {
            trace!(
                iteration = self.iterations,
                from = self.best.value,
                to = candidate.value,
                "incumbent replaced"
            );
            self.best = candidate;
            self.accepted_moves += 1;
        }
        self.iterations += 1;
        self.history.record(self.iterations, self.best.value);
    }

    fn finish(self, final_temperature: Option<f64>) -> TrajectoryResult<S> {
        debug!(
            iterations = self.iterations,
            evaluations = self.evaluations,
            accepted_moves = self.accepted_moves,
            best_value = self.best.value,
            "trajectory finished"
        );
        let history_interval = self.history.interval();
        let value_history = self.history.finish(self.iterations, self.best.value);
        TrajectoryResult {
            best: self.best.solution,
            best_value: self.best.value,
            iterations: self.iterations,
            evaluations: self.evaluations,
            accepted_moves: self.accepted_moves,
            final_temperature,
            value_history,
            history_interval,
        }
    }
}

/// Executes the single-trajectory engines.
///
/// # Usage
///
/// ```ignore
/// let mut rng = StdRng::seed_from_u64(42);
/// let result = TrajectoryRunner::greedy_ascent(&problem, |it, _, _: &_| it < 1000, &mut rng);
/// println!("best value: {}", result.best_value);
/// ```
pub struct TrajectoryRunner;

impl TrajectoryRunner {
    /// Pure random search: every iteration draws an independent candidate
    /// from the initializer.
    pub fn random_search<P, T, R>(
        problem: &P,
        mut terminate: T,
        rng: &mut R,
    ) -> TrajectoryResult<P::Solution>
    where
        P: Problem,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        debug!("random search started");
        let mut run = Trajectory::seed(problem, rng);

        while run.proceed(&mut terminate) {
            let candidate = Scored::evaluate(problem, problem.initial_solution(rng));
            let accept = candidate.value >= run.best.value;
            run.step(candidate, accept);
        }

        run.finish(None)
    }

    /// Randomized greedy ascent (hill climbing with plateau walk): every
    /// iteration perturbs the incumbent with the neighbor operator.
    pub fn greedy_ascent<P, T, R>(
        problem: &P,
        mut terminate: T,
        rng: &mut R,
    ) -> TrajectoryResult<P::Solution>
    where
        P: Neighborhood,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        debug!("greedy ascent started");
        let mut run = Trajectory::seed(problem, rng);

        while run.proceed(&mut terminate) {
            let candidate = Scored::evaluate(problem, problem.neighbor(&run.best.solution, rng));
            let accept = candidate.value >= run.best.value;
            run.step(candidate, accept);
        }

        run.finish(None)
    }

    /// Simulated annealing over the incumbent.
    ///
    /// A candidate is accepted when it is non-worsening *and* passes the
    /// Metropolis test `exp((best - candidate) / T) > u`, `u ~ U[0, 1)`.
    /// Worsening candidates are never accepted, unlike textbook annealing;
    /// the temperature only modulates how often equal-or-better moves are
    /// taken. The uniform draw happens only for non-worsening candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid. No collaborator is called
    /// in that case.
    pub fn simulated_annealing<P, T, R>(
        problem: &P,
        config: &AnnealingConfig,
        mut terminate: T,
        rng: &mut R,
    ) -> Result<TrajectoryResult<P::Solution>>
    where
        P: Neighborhood,
        T: Terminate<P::Solution>,
        R: Rng,
    {
        config.validate()?;
        debug!(
            initial_temperature = config.initial_temperature,
            decay = config.decay,
            "simulated annealing started"
        );

        let mut run = Trajectory::seed(problem, rng);
        let mut temperature = config.initial_temperature;

        while run.proceed(&mut terminate) {
            let candidate = Scored::evaluate(problem, problem.neighbor(&run.best.solution, rng));
            let accept = candidate.value >= run.best.value
                && ((run.best.value - candidate.value) / temperature).exp()
                    > rng.random_range(0.0..1.0);
            run.step(candidate, accept);
            temperature *= config.decay;
        }

        Ok(run.finish(Some(temperature)))
    }
}
