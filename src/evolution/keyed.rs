//! Keyed tournament replacement over an arena of stable slots.
//!
//! The population is an arena of `population_size` slots; a slot's index
//! is its key and stays attached to that lineage for the whole run. A
//! ranked key list (best first) is rebuilt at the end of every generation.
//!
//! Each sample slot draws two rank positions from the generation's ranked
//! view, excluding positions that already won this generation; the better
//! position wins and is claimed. The winner's slot is overwritten in place
//! by its mutant or crossover child. Slots are never appended or removed.

use super::config::EvolutionConfig;
use super::population::{ranked_keys, seed, MatingPool, RankSampler};
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

    let mut arena = seed(problem, n_pop, n_pop, rng);
    let mut ranking = ranked_keys(&arena);
    let mut progress = Progress::new(config, n_pop, arena[ranking[0]].value);

    while progress.proceed(terminate, &arena[ranking[0]]) {
        let mut sampler = RankSampler::new(n_pop);

        for _ in 0..n_ech {
            let (first, second) = sampler.draw_pair(rng);
            let position = first.min(second);
            sampler.claim(position);
            let key = ranking[position];

            let child = if rng.random_range(0.0..1.0) < config.mutation_rate {
                problem.neighbor(&arena[key].solution, rng)
            } else if rng.random_range(0.0..1.0) < config.crossover_rate {
                let pool = MatingPool::new(
                    &arena[key].solution,
                    &arena,
                    Some(position),
                    config.mutation_rate,
                )
                .with_order(&ranking);
                problem.crossover(&pool, rng)
            } else {
                continue;
            };
            arena[key] = Scored::evaluate(problem, child);
            progress.evaluations += 1;
        }

        ranking = ranked_keys(&arena);
        progress.record(arena[ranking[0]].value);
    }

    let mut slots: Vec<Option<Scored<P::Solution>>> = arena.into_iter().map(Some).collect();
    let population = ranking
        .iter()
        .filter_map(|&key| slots[key].take())
        .collect();
    progress.finish(population, Some(ranking))
}
