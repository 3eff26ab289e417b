//! Random number helpers shared by the operators and the runner.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded RNG. The same seed always yields the same stream.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from OS entropy when `None`.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => create_rng(s),
        None => create_rng(rand::random()),
    }
}

/// Draws one Bernoulli trial: `true` with probability `p`.
///
/// Compares a uniform draw in `[0, 1)` against `p`, so `p = 1.0` always
/// succeeds and `p = 0.0` never does.
pub fn chance<R: Rng>(rng: &mut R, p: f64) -> bool {
    rng.random_range(0.0..1.0) < p
}

/// Removes and returns a uniformly chosen element.
///
/// Order of the remaining elements is not preserved.
///
/// # Panics
/// Panics if `items` is empty.
pub fn pop_random<T, R: Rng>(items: &mut Vec<T>, rng: &mut R) -> T {
    assert!(!items.is_empty(), "cannot pop from an empty pool");
    let idx = rng.random_range(0..items.len());
    items.swap_remove(idx)
}

/// Makes an odd-sized pool even by dropping or duplicating one random
/// element. Returns `true` when an element was dropped.
pub fn make_even<T: Clone, R: Rng>(items: &mut Vec<T>, drop: bool, rng: &mut R) -> bool {
    if items.len() % 2 == 0 {
        return false;
    }
    let idx = rng.random_range(0..items.len());
    if drop {
        items.swap_remove(idx);
    } else {
        let dup = items[idx].clone();
        items.push(dup);
    }
    drop
}
