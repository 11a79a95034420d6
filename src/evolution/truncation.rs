//! Truncation replacement over the top-ranked sample.
//!
//! Each generation visits the `sample_size` best members in rank order.
//! Slot `j` mutates member `j` with probability `mutation_rate`; otherwise,
//! with probability `crossover_rate`, it recombines member `j` with a mate
//! from the top `sample_size`. Offspring are appended, the population is
//! re-ranked, and the best `population_size` survive.

use super::config::EvolutionConfig;
use super::population::{rank_descending, seed, MatingPool};
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
        for j in 0..n_ech {
            let child = if rng.random_range(0.0..1.0) < config.mutation_rate {
                problem.neighbor(&population[j].solution, rng)
            } else if rng.random_range(0.0..1.0) < config.crossover_rate {
                let pool = MatingPool::new(
                    &population[j].solution,
                    &population[..n_ech],
                    Some(j),
                    config.mutation_rate,
                );
                problem.crossover(&pool, rng)
            } else {
                continue;
            };
            population.push(Scored::evaluate(problem, child));
            progress.evaluations += 1;
        }

        rank_descending(&mut population);
        population.truncate(n_pop);
        progress.record(population[0].value);
    }

    progress.finish(population, None)
}
