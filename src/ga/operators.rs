//! Permutation-based genetic operators for tours.
//!
//! The core operators work on `&[usize]` city-id vectors; the population
//! helpers apply them across a pool of [`Tour`]s.
//!
//! # Crossover
//!
//! - [`cycle_crossover`] (CX): Oliver, Smith & Holland (1987), exchanges
//!   one cycle of positions between the parents, so every child is still a
//!   valid permutation
//!
//! # Mutation
//!
//! - [`invert_mutation`]: reverse a random segment straddling the midpoint
//! - [`invert_segment`]: the deterministic reversal behind it
//!
//! # Population helpers
//!
//! - [`mutate_population`]: independent Bernoulli mutation per tour
//! - [`recombine_population`]: random pairing plus Bernoulli crossover
//!
//! # References
//!
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"
//! - Holland (1975), *Adaptation in Natural and Artificial Systems* (inversion)

use crate::random::{chance, make_even, pop_random};
use crate::tour::Tour;
use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Cycle Crossover (CX) for permutations of `0..n`.
///
/// # Algorithm
///
/// 1. `child1` starts as a copy of `parent2`, `child2` as a copy of `parent1`
/// 2. Starting at position 0, follow `parent2[i]` to its position in
///    `parent1` until the walk returns to 0; this is one cycle
/// 3. On the cycle positions `child1` takes `parent1`'s value and `child2`
///    takes `parent2`'s
///
/// When the cycle spans the whole permutation, the children are copies of
/// `parent1` and `parent2` respectively.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if the parents have different lengths or are not permutations of
/// the same `0..n` set.
pub fn cycle_crossover(parent1: &[usize], parent2: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    let mut child1 = parent2.to_vec();
    let mut child2 = parent1.to_vec();
    if n == 0 {
        return (child1, child2);
    }

    let mut pos_in_p1 = vec![usize::MAX; n];
    for (i, &city) in parent1.iter().enumerate() {
        assert!(city < n, "city id {city} out of range for {n} cities");
        pos_in_p1[city] = i;
    }

    let mut i = 0;
    let mut steps = 0;
    loop {
        child1[i] = parent1[i];
        child2[i] = parent2[i];
        i = pos_in_p1[parent2[i]];
        assert!(i < n, "parents are not permutations of the same set");
        if i == 0 {
            break;
        }
        steps += 1;
        assert!(steps < n, "cycle did not close: parents are not permutations");
    }

    (child1, child2)
}

// ============================================================================
// Mutation
// ============================================================================

/// Reverses `perm[ini..fin]` in place, leaving prefix and suffix untouched.
///
/// Applying the same reversal twice restores the original sequence.
///
/// # Panics
/// Panics if `ini > fin` or `fin > perm.len()`.
pub fn invert_segment(perm: &mut [usize], ini: usize, fin: usize) {
    perm[ini..fin].reverse();
}

/// Inversion mutation with cut points on either side of the midpoint.
///
/// `ini` is uniform in `[0, n/2]` and `fin` uniform in `[n/2, n]`, so the
/// reversed segment `[ini, fin)` always straddles `n/2`.
pub fn invert_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let (ini, fin) = midpoint_cuts(n, rng);
    invert_segment(perm, ini, fin);
}

/// Mutates each tour independently with probability `p_mutate`.
pub fn mutate_population<R: Rng>(population: &mut [Tour], p_mutate: f64, rng: &mut R) {
    for tour in population.iter_mut() {
        if chance(rng, p_mutate) {
            tour.mutate(rng);
        }
    }
}

// ============================================================================
// Recombination
// ============================================================================

/// Pairs up the pool at random and crosses each pair with probability
/// `p_cross`.
///
/// An odd pool first drops or duplicates one random individual (50/50).
/// Pairs are drawn from random positions; each successful pair contributes
/// both children. Only the offspring are returned; the parents stay in
/// `pool` for the caller to keep or discard.
pub fn recombine_population<R: Rng>(pool: &[Tour], p_cross: f64, rng: &mut R) -> Vec<Tour> {
    let mut parents: Vec<usize> = (0..pool.len()).collect();
    if parents.len() % 2 == 1 {
        let drop = chance(rng, 0.5);
        make_even(&mut parents, drop, rng);
    }

    let mut offspring = Vec::with_capacity(parents.len());
    while parents.len() >= 2 {
        let a = pop_random(&mut parents, rng);
        let b = pop_random(&mut parents, rng);
        if chance(rng, p_cross) {
            let (c1, c2) = pool[a].crossover(&pool[b]);
            offspring.push(c1);
            offspring.push(c2);
        }
    }
    offspring
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick cut points `ini ∈ [0, n/2]`, `fin ∈ [n/2, n]`.
fn midpoint_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let half = n / 2;
    let ini = rng.random_range(0..=half);
    let fin = rng.random_range(half..=n);
    (ini, fin)
}

// ============================================================================
// Tests
// ============================================================================
