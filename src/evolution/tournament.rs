//! Tournament replacement with append-then-truncate.
//!
//! Each sample slot runs a binary tournament between two distinct members
//! of the start-of-generation population. A clone of the winner (ties go to
//! the first draw) is appended, then varied in place: mutation with
//! probability `mutation_rate`, else crossover with probability
//! `crossover_rate`, else left as a plain copy. After all slots the
//! population is re-ranked and cut back to `population_size`.
//!
//! The same member may win several slots in one generation.
//!
//! Crossover takes the winner's clone as primary parent and draws its mate
//! from the start-of-generation members other than the winner, not from
//! the members other than the slot's index.

use super::config::EvolutionConfig;
use super::population::{distinct_pair, rank_descending, seed, MatingPool};
use super::runner::{EvolutionResult, Progress};
use crate::types::{Crossover, Scored, Terminate};
use rand::Rng;

pub(super) fn run<P, T, R>(
    problem: &P,
    config: &EvolutionConfig,
    terminate: &mut T,
    rng: &mut R,
) -> EvolutionResult<P::Solution>
where
    P: Crossover,
    T: Terminate<P::Solution>,
    R: Rng,
{
    let n_pop = config.population_size;
    let n_ech = config.sample_size;

    let mut population = seed(problem, n_pop, n_pop + n_ech, rng);
    rank_descending(&mut population);
    let mut progress = Progress::new(config, n_pop, population[0].value);

    while progress.proceed(terminate, &population[0]) {
        for _ in 0..n_ech {
            let (first, second) = distinct_pair(n_pop, rng);
            let winner = if population[second].value > population[first].value {
                second
            } else {
                first
            };
            population.push(population[winner].clone());
            let slot = population.len() - 1;

            let child = if rng.random_range(0.0..1.0) < config.mutation_rate {
                problem.neighbor(&population[slot].solution, rng)
            } else if rng.random_range(0.0..1.0) < config.crossover_rate {
                let pool = MatingPool::new(
                    &population[slot].solution,
                    &population[..n_pop],
                    Some(winner),
                    config.mutation_rate,
                );
                problem.crossover(&pool, rng)
            } else {
                continue;
            };
            population[slot] = Scored::evaluate(problem, child);
            progress.evaluations += 1;
        }

        rank_descending(&mut population);
        population.truncate(n_pop);
        progress.record(population[0].value);
    }

    progress.finish(population, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Neighborhood, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::{Cell, RefCell};

    /// Integer solutions scored by themselves; the neighbor logs its input.
    struct Logged {
        next: Cell<i64>,
        mutated: RefCell<Vec<i64>>,
    }

    impl Logged {
        fn new() -> Self {
            Self {
                next: Cell::new(0),
                mutated: RefCell::new(Vec::new()),
            }
        }
    }

    impl Problem for Logged {
        type Solution = i64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> i64 {
            let v = self.next.get();
            self.next.set(v + 1);
            v
        }

        fn objective(&self, x: &i64) -> f64 {
            *x as f64
        }
    }

    impl Neighborhood for Logged {
        fn neighbor<R: Rng>(&self, x: &i64, _rng: &mut R) -> i64 {
            self.mutated.borrow_mut().push(*x);
            x + 1000
        }
    }

    impl Crossover for Logged {}

    fn config(population_size: usize, sample_size: usize, mutation_rate: f64) -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(population_size)
            .with_sample_size(sample_size)
            .with_mutation_rate(mutation_rate)
            .with_crossover_rate(0.0)
    }

    #[test]
    fn test_every_slot_is_a_mutated_member() {
        let problem = Logged::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stop = |g: usize, _: f64, _: &i64| g < 1;

        let result = run(&problem, &config(6, 3, 1.0), &mut stop, &mut rng);

        let mutated = problem.mutated.borrow();
        assert_eq!(mutated.len(), 3);
        for &parent in mutated.iter() {
            assert!((0..6).contains(&parent), "mutated a non-member: {parent}");
        }
        // Every mutant (>= 1000) beats every seed (< 6) and survives.
        let survivors = result.population.iter().filter(|m| m.value >= 1000.0).count();
        assert_eq!(survivors, 3);
    }

    #[test]
    fn test_tournament_winner_is_better_of_pair() {
        // With two members every tournament compares 0 and 1, so 1 wins.
        let problem = Logged::new();
        let mut rng = StdRng::seed_from_u64(7);
        let mut stop = |g: usize, _: f64, _: &i64| g < 1;

        run(&problem, &config(2, 2, 1.0), &mut stop, &mut rng);

        assert_eq!(*problem.mutated.borrow(), vec![1, 1]);
    }

    #[test]
    fn test_unvaried_copies_are_truncated() {
        let problem = Logged::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stop = |g: usize, _: f64, _: &i64| g < 5;

        let result = run(&problem, &config(5, 5, 0.0), &mut stop, &mut rng);

        assert_eq!(result.population.len(), 5);
        assert_eq!(result.evaluations, 5);
        assert!(problem.mutated.borrow().is_empty());
        for window in result.population.windows(2) {
            assert!(window[0].value >= window[1].value);
        }
    }

    /// Same seeds as [`Logged`]; crossover logs `(parent, mate)`.
    struct Pairing {
        inner: Logged,
        pairs: RefCell<Vec<(i64, i64)>>,
    }

    impl Problem for Pairing {
        type Solution = i64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> i64 {
            self.inner.initial_solution(rng)
        }

        fn objective(&self, x: &i64) -> f64 {
            self.inner.objective(x)
        }
    }

    impl Neighborhood for Pairing {
        fn neighbor<R: Rng>(&self, x: &i64, rng: &mut R) -> i64 {
            self.inner.neighbor(x, rng)
        }
    }

    impl Crossover for Pairing {
        fn crossover<R: Rng>(&self, pool: &MatingPool<'_, i64>, rng: &mut R) -> i64 {
            let mate = *pool.choose_mate(rng);
            self.pairs.borrow_mut().push((*pool.parent(), mate));
            pool.parent() + mate
        }
    }

    #[test]
    fn test_crossover_parent_is_winner() {
        // Members 0 and 1: every tournament is won by 1, whose only mate is 0.
        let problem = Pairing {
            inner: Logged::new(),
            pairs: RefCell::new(Vec::new()),
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut stop = |g: usize, _: f64, _: &i64| g < 1;
        let cfg = config(2, 2, 0.0).with_crossover_rate(1.0);

        run(&problem, &cfg, &mut stop, &mut rng);

        assert_eq!(*problem.pairs.borrow(), vec![(1, 0), (1, 0)]);
    }

    #[test]
    fn test_default_crossover_copies_winner() {
        let problem = Logged::new();
        let mut rng = StdRng::seed_from_u64(42);
        let mut stop = |g: usize, _: f64, _: &i64| g < 3;
        let cfg = config(4, 2, 0.0).with_crossover_rate(1.0);

        let result = run(&problem, &cfg, &mut stop, &mut rng);

        // Children are clones of members, so values never leave the seed range.
        assert!(result.population.iter().all(|m| (0.0..4.0).contains(&m.value)));
        assert_eq!(result.evaluations, 4 + 3 * 2);
    }
}
