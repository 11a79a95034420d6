//! Population ranking and sampling utilities.
//!
//! Shared by the three population engines:
//!
//! - [`rank_descending`] / [`ranked_keys`]: best-first ordering
//! - [`distinct_pair`]: two different indices, resampling on collision
//! - [`RankSampler`]: tournament pairs without replacement within a generation
//! - [`MatingPool`]: the view of parents handed to [`Crossover`]
//!
//! [`Crossover`]: crate::Crossover

use crate::types::{Problem, Scored};
use rand::Rng;
use std::cmp::Ordering;

fn best_first<S>(a: &Scored<S>, b: &Scored<S>) -> Ordering {
    b.value.total_cmp(&a.value)
}

/// Sorts members by value, best first. Stable for equal values.
pub fn rank_descending<S>(members: &mut [Scored<S>]) {
    members.sort_by(best_first);
}

/// Returns arena keys ordered by value, best first.
///
/// The arena itself is left untouched so keys stay stable identities.
pub fn ranked_keys<S>(arena: &[Scored<S>]) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..arena.len()).collect();
    keys.sort_by(|&a, &b| best_first(&arena[a], &arena[b]));
    keys
}

/// Draws and evaluates `size` independent members.
///
/// `capacity` reserves room for offspring appended during a generation.
pub(crate) fn seed<P, R>(problem: &P, size: usize, capacity: usize, rng: &mut R) -> Vec<Scored<P::Solution>>
where
    P: Problem,
    R: Rng,
{
    let mut members = Vec::with_capacity(capacity.max(size));
    for _ in 0..size {
        let solution = problem.initial_solution(rng);
        members.push(Scored::evaluate(problem, solution));
    }
    members
}

/// Draws two different indices uniformly from `0..n`.
///
/// The second index is redrawn until it differs from the first.
///
/// # Panics
/// Panics if `n < 2`.
pub fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    assert!(n >= 2, "need at least two members to draw a pair");
    let first = rng.random_range(0..n);
    let mut second = rng.random_range(0..n);
    while second == first {
        second = rng.random_range(0..n);
    }
    (first, second)
}

/// Draws tournament pairs over rank positions without replacement.
///
/// Once a position has won a tournament ([`claim`](Self::claim)), neither
/// side of a later pair in the same generation may land on it. Losers stay
/// eligible.
#[derive(Debug, Clone)]
pub struct RankSampler {
    claimed: Vec<bool>,
    free: usize,
}

impl RankSampler {
    /// Creates a sampler over `n` rank positions, all free.
    pub fn new(n: usize) -> Self {
        Self {
            claimed: vec![false; n],
            free: n,
        }
    }

    /// Number of positions not yet claimed.
    pub fn free(&self) -> usize {
        self.free
    }

    /// Whether `position` has already won this generation.
    pub fn is_claimed(&self, position: usize) -> bool {
        self.claimed[position]
    }

    /// Draws two different unclaimed positions.
    ///
    /// # Panics
    /// Panics if fewer than two positions are free.
    pub fn draw_pair<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        assert!(self.free >= 2, "need two unclaimed rank positions");
        let n = self.claimed.len();

        let mut first = rng.random_range(0..n);
        while self.claimed[first] {
            first = rng.random_range(0..n);
        }
        let mut second = rng.random_range(0..n);
        while second == first || self.claimed[second] {
            second = rng.random_range(0..n);
        }
        (first, second)
    }

    /// Marks `position` as a tournament winner.
    pub fn claim(&mut self, position: usize) {
        if !self.claimed[position] {
            self.claimed[position] = true;
            self.free -= 1;
        }
    }
}

/// Parents available to a crossover operator.
///
/// Holds the primary parent and a ranked view of mates. Ranks index the
/// view best first; for the keyed engine the view maps ranks to arena keys.
#[derive(Debug)]
pub struct MatingPool<'a, S> {
    parent: &'a S,
    members: &'a [Scored<S>],
    order: Option<&'a [usize]>,
    parent_rank: Option<usize>,
    mutation_rate: f64,
}

impl<'a, S> MatingPool<'a, S> {
    pub(crate) fn new(
        parent: &'a S,
        members: &'a [Scored<S>],
        parent_rank: Option<usize>,
        mutation_rate: f64,
    ) -> Self {
        Self {
            parent,
            members,
            order: None,
            parent_rank,
            mutation_rate,
        }
    }

    /// Reads members through `order` (rank -> arena key).
    pub(crate) fn with_order(mut self, order: &'a [usize]) -> Self {
        self.order = Some(order);
        self
    }

    /// The primary parent.
    pub fn parent(&self) -> &'a S {
        self.parent
    }

    /// Rank of the primary parent inside the pool, if it is a member.
    pub fn parent_rank(&self) -> Option<usize> {
        self.parent_rank
    }

    /// Number of ranked members.
    pub fn len(&self) -> usize {
        self.order.map_or(self.members.len(), <[usize]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member at `rank`, best first.
    pub fn get(&self, rank: usize) -> Option<&'a S> {
        self.scored(rank).map(|m| &m.solution)
    }

    /// Cached value of the member at `rank`.
    pub fn value(&self, rank: usize) -> Option<f64> {
        self.scored(rank).map(|m| m.value)
    }

    /// Probability the operator should apply the neighbor to its child.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Picks a mate uniformly among members other than the parent's rank.
    ///
    /// Falls back to the primary parent when no other member exists.
    pub fn choose_mate<R: Rng>(&self, rng: &mut R) -> &'a S {
        let n = self.len();
        let candidates = match self.parent_rank {
            Some(rank) if rank < n => n - 1,
            _ => n,
        };
        if candidates == 0 {
            return self.parent;
        }

        let mut rank = rng.random_range(0..candidates);
        if let Some(parent_rank) = self.parent_rank {
            if rank >= parent_rank {
                rank += 1;
            }
        }
        self.get(rank).unwrap_or(self.parent)
    }

    fn scored(&self, rank: usize) -> Option<&'a Scored<S>> {
        let members = self.members;
        match self.order {
            Some(order) => order.get(rank).and_then(|&key| members.get(key)),
            None => members.get(rank),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scored(values: &[f64]) -> Vec<Scored<usize>> {
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| Scored { solution: i, value })
            .collect()
    }

    #[test]
    fn test_rank_descending() {
        let mut pop = scored(&[4.0, 10.0, 6.0, 8.0]);
        rank_descending(&mut pop);
        let values: Vec<f64> = pop.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![10.0, 8.0, 6.0, 4.0]);
    }

    #[test]
    fn test_rank_descending_stable_on_ties() {
        let mut pop = scored(&[1.0, 5.0, 5.0, 5.0]);
        rank_descending(&mut pop);
        let ids: Vec<usize> = pop.iter().map(|m| m.solution).collect();
        assert_eq!(ids, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_ranked_keys_leaves_arena() {
        let arena = scored(&[4.0, 10.0, 6.0, 8.0]);
        assert_eq!(ranked_keys(&arena), vec![1, 3, 2, 0]);
        assert_eq!(arena[0].value, 4.0);
    }

    #[test]
    fn test_distinct_pair() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let (a, b) = distinct_pair(2, &mut rng);
            assert_ne!(a, b);
            assert!(a < 2 && b < 2);
        }
    }

    #[test]
    #[should_panic(expected = "need at least two members")]
    fn test_distinct_pair_needs_two() {
        let mut rng = StdRng::seed_from_u64(42);
        distinct_pair(1, &mut rng);
    }

    #[test]
    fn test_rank_sampler_without_replacement() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let n = 6;
            let mut sampler = RankSampler::new(n);
            let mut winners = Vec::new();
            for _ in 0..n - 1 {
                let (a, b) = sampler.draw_pair(&mut rng);
                assert_ne!(a, b);
                assert!(!sampler.is_claimed(a) && !sampler.is_claimed(b));
                let winner = a.min(b);
                assert!(!winners.contains(&winner));
                winners.push(winner);
                sampler.claim(winner);
            }
            assert_eq!(sampler.free(), 1);
        }
    }

    #[test]
    fn test_rank_sampler_claim_idempotent() {
        let mut sampler = RankSampler::new(3);
        sampler.claim(1);
        sampler.claim(1);
        assert_eq!(sampler.free(), 2);
    }

    #[test]
    fn test_mating_pool_excludes_parent() {
        let members = scored(&[9.0, 7.0, 5.0]);
        let pool = MatingPool::new(&members[1].solution, &members, Some(1), 0.5);
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = [0u32; 3];
        for _ in 0..3000 {
            seen[*pool.choose_mate(&mut rng)] += 1;
        }
        assert_eq!(seen[1], 0, "parent chosen as its own mate: {seen:?}");
        assert!(seen[0] > 1200 && seen[2] > 1200, "expected uniform: {seen:?}");
        assert_eq!(pool.mutation_rate(), 0.5);
    }

    #[test]
    fn test_mating_pool_single_member() {
        let members = scored(&[3.0]);
        let pool = MatingPool::new(&members[0].solution, &members, Some(0), 0.0);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(*pool.choose_mate(&mut rng), 0);
    }

    #[test]
    fn test_mating_pool_ordered_view() {
        let arena = scored(&[4.0, 10.0, 6.0]);
        let order = ranked_keys(&arena);
        let pool = MatingPool::new(&arena[0].solution, &arena, None, 0.0).with_order(&order);

        assert_eq!(pool.len(), 3);
        assert_eq!(pool.get(0), Some(&1));
        assert_eq!(pool.value(2), Some(4.0));
        assert_eq!(pool.get(3), None);
    }
}
