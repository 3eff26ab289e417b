//! Initial population generation from the permutation space.
//!
//! The space of tours has `n!` elements, far too many to enumerate. The
//! generator picks a random window of `size` consecutive lexicographic
//! permutations and walks only that window with [`LexPermutations`], a lazy
//! enumerator that can start at any rank. Two unconditional mutation passes
//! then break up the lexicographic adjacency of the window.

use super::operators::mutate_population;
use crate::error::{TspError, TspResult};
use crate::problem::TspProblem;
use crate::tour::Tour;
use log::trace;
use rand::Rng;

/// Returns `n!`, or `None` if it does not fit in a `u128` (`n > 34`).
pub fn factorial(n: usize) -> Option<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| acc.checked_mul(k))
}

/// Lazy enumerator of the permutations of `0..n` in lexicographic order.
///
/// Starting at any rank costs O(n²) through the factorial number system;
/// each further step is one next-permutation move. The sequence is finite
/// and ends after the last permutation `[n-1, ..., 1, 0]`.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::LexPermutations;
///
/// let perms: Vec<Vec<usize>> = LexPermutations::starting_at(3, 3).collect();
/// assert_eq!(perms, vec![vec![1, 2, 0], vec![2, 0, 1], vec![2, 1, 0]]);
/// ```
#[derive(Debug, Clone)]
pub struct LexPermutations {
    next: Option<Vec<usize>>,
}

impl LexPermutations {
    /// Enumerates all permutations of `0..n` from the identity.
    pub fn new(n: usize) -> Self {
        Self {
            next: Some((0..n).collect()),
        }
    }

    /// Enumerates from the permutation of lexicographic rank `rank`.
    ///
    /// A rank past the end of the space yields an empty sequence.
    pub fn starting_at(n: usize, rank: u128) -> Self {
        if let Some(total) = factorial(n) {
            if rank >= total {
                return Self { next: None };
            }
        }
        Self {
            next: Some(unrank(n, rank)),
        }
    }
}

impl Iterator for LexPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut successor = current.clone();
        if next_permutation(&mut successor) {
            self.next = Some(successor);
        }
        Some(current)
    }
}

/// The permutation of `0..n` at lexicographic `rank`.
///
/// Factorials that overflow `u128` are larger than any representable rank,
/// so their digit is zero.
fn unrank(n: usize, mut rank: u128) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut perm = Vec::with_capacity(n);
    for i in 0..n {
        let digit = match factorial(n - 1 - i) {
            Some(f) => {
                let d = (rank / f) as usize;
                rank %= f;
                d
            }
            None => 0,
        };
        perm.push(remaining.remove(digit));
    }
    perm
}

/// Advances to the next lexicographic permutation in place.
///
/// Returns `false` (leaving `perm` unchanged) at the last permutation.
fn next_permutation(perm: &mut [usize]) -> bool {
    let n = perm.len();
    if n < 2 {
        return false;
    }
    let mut i = n - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }
    let mut j = n - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

/// Generates `size` evaluated tours from a random lexicographic window.
///
/// Draws `fin` uniformly in `[size, n!)`, takes the `size` permutations of
/// ranks `[fin - size, fin)`, mutates each tour twice with probability 1,
/// and evaluates them.
///
/// # Errors
/// [`TspError::PopulationTooLarge`] if `size >= n!`, and
/// [`TspError::InvalidConfig`] if `size` is zero.
pub fn generate<R: Rng>(
    problem: &mut TspProblem,
    size: usize,
    rng: &mut R,
) -> TspResult<Vec<Tour>> {
    let n = problem.num_cities();
    if size == 0 {
        return Err(TspError::InvalidConfig(
            "population_size must be at least 1".into(),
        ));
    }
    let space = factorial(n).unwrap_or(u128::MAX);
    if size as u128 >= space {
        return Err(TspError::PopulationTooLarge {
            population_size: size,
            num_cities: n,
        });
    }

    let fin = rng.random_range(size as u128..space);
    let ini = fin - size as u128;
    trace!("initial population window: ranks [{ini}, {fin}) of {n}!");

    let mut population: Vec<Tour> = LexPermutations::starting_at(n, ini)
        .take(size)
        .map(Tour::new)
        .collect();
    debug_assert_eq!(population.len(), size);

    for _ in 0..2 {
        mutate_population(&mut population, 1.0, rng);
    }
    problem.evaluate_population(&mut population);
    Ok(population)
}
