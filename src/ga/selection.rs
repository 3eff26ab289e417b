//! Survivor selection strategies.
//!
//! Each strategy reduces a candidate pool to a target-sized survivor set.
//! All strategies assume **minimization** (lower fitness = better) and
//! expect every tour in the pool to be evaluated.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Michalewicz (1996), *Genetic Algorithms + Data Structures = Evolution
//!   Programs* (exponential ranking)

use crate::random::{chance, make_even, pop_random};
use crate::tour::{sort_by_fitness, Tour};
use rand::Rng;

/// Selection policy for choosing the next generation.
///
/// # Examples
///
/// ```
/// use u_tsp::ga::Selection;
///
/// assert_eq!(Selection::default(), Selection::Tournament);
/// let sel: Selection = "rank-exp".parse().unwrap();
/// assert_eq!(sel, Selection::RankExponential);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Two knockout rounds of random pairwise duels over the whole pool.
    ///
    /// Stronger tours tend to win in both rounds and appear twice, while
    /// weaker ones still survive when paired with even weaker opponents.
    #[default]
    Tournament,

    /// Keep the best `target` tours. Deterministic.
    Truncation,

    /// Rank-based sampling with geometric weights `s^r`, where `s` is the
    /// pool's fitness standard deviation.
    RankExponential,
}

impl Selection {
    /// Selects up to `target` survivors from `pool`, sorted best first
    /// for Tournament and Truncation.
    pub fn select<R: Rng>(&self, pool: Vec<Tour>, target: usize, rng: &mut R) -> Vec<Tour> {
        match self {
            Selection::Tournament => select_tournament(&pool, target, rng),
            Selection::Truncation => select_best(pool, target),
            Selection::RankExponential => select_rank_exp(pool, target, rng),
        }
    }
}

impl std::str::FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tournament" => Ok(Selection::Tournament),
            "truncation" | "best" => Ok(Selection::Truncation),
            "rank-exp" | "rank_exponential" | "rank-exponential" => {
                Ok(Selection::RankExponential)
            }
            other => Err(format!("unknown selection strategy: {other}")),
        }
    }
}

/// Truncation selection: sort ascending, keep the first `target`.
pub fn select_best(mut pool: Vec<Tour>, target: usize) -> Vec<Tour> {
    sort_by_fitness(&mut pool);
    pool.truncate(target);
    pool
}

/// Tournament selection over the entire pool, run in two rounds.
///
/// Each round copies the pool, evens out an odd size, then repeatedly pops
/// two random tours and keeps the fitter. For an odd pool the first round
/// drops or duplicates a random tour (50/50) and the second round does the
/// opposite, so the rounds together always yield exactly `pool.len()`
/// winners. Winners are sorted ascending and truncated to `target`.
pub fn select_tournament<R: Rng>(pool: &[Tour], target: usize, rng: &mut R) -> Vec<Tour> {
    let mut winners = Vec::with_capacity(pool.len());
    let mut drop = chance(rng, 0.5);

    for _ in 0..2 {
        let mut entrants: Vec<usize> = (0..pool.len()).collect();
        if entrants.len() % 2 == 1 {
            make_even(&mut entrants, drop, rng);
            drop = !drop;
        }
        while entrants.len() >= 2 {
            let a = pop_random(&mut entrants, rng);
            let b = pop_random(&mut entrants, rng);
            let winner = if pool[a].fitness() < pool[b].fitness() {
                a
            } else {
                b
            };
            winners.push(pool[winner].clone());
        }
    }

    sort_by_fitness(&mut winners);
    winners.truncate(target);
    winners
}

/// Rank-based exponential selection.
///
/// Sorts the pool, sets `s` to the fitness standard deviation, and gives
/// rank `r` the probability `(1 - s) / (1 - s^n) * s^r`. Draws `n` ranks
/// from the cumulative distribution and returns the first `target` picks
/// (in draw order, repeats allowed).
pub fn select_rank_exp<R: Rng>(mut pool: Vec<Tour>, target: usize, rng: &mut R) -> Vec<Tour> {
    let n = pool.len();
    if n == 0 {
        return pool;
    }
    sort_by_fitness(&mut pool);
    let (s, _mean) = fitness_stats(&pool);

    let mut cumulative = Vec::with_capacity(n);
    let mut acc = 0.0;
    for p in rank_probabilities(s, n) {
        acc += p;
        cumulative.push(acc);
    }

    let mut chosen = Vec::with_capacity(n.min(target));
    for _ in 0..n {
        let cutoff: f64 = rng.random_range(0.0..1.0);
        let idx = cumulative
            .iter()
            .position(|&c| c >= cutoff)
            .unwrap_or(n - 1);
        chosen.push(pool[idx].clone());
    }
    chosen.truncate(target);
    chosen
}

/// Sample standard deviation and mean of the pool's fitness.
///
/// A pool of fewer than two tours has zero deviation.
pub fn fitness_stats(pool: &[Tour]) -> (f64, f64) {
    let n = pool.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mean = pool.iter().map(Tour::fitness).sum::<f64>() / n as f64;
    if n < 2 {
        return (0.0, mean);
    }
    let var = pool
        .iter()
        .map(|t| (t.fitness() - mean).powi(2))
        .sum::<f64>()
        / (n - 1) as f64;
    (var.sqrt(), mean)
}

/// Geometric rank probabilities `(1 - s) / (1 - s^n) * s^r` for `r < n`.
///
/// `(1 - s) / (1 - s^n)` is the normalizer of the geometric series, so the
/// weights are computed as `s^r / Σ s^k`, shifted in log space when
/// `s > 1` to stay finite. `s = 1` is uniform; `s = 0` puts all mass on
/// rank 0.
fn rank_probabilities(s: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if !s.is_finite() || s <= 0.0 {
        let mut p = vec![0.0; n];
        p[0] = 1.0;
        return p;
    }
    if (s - 1.0).abs() < 1e-12 {
        return vec![1.0 / n as f64; n];
    }
    let ln_s = s.ln();
    let top = if s > 1.0 { (n - 1) as f64 } else { 0.0 };
    let weights: Vec<f64> = (0..n).map(|r| ((r as f64 - top) * ln_s).exp()).collect();
    let total: f64 = weights.iter().sum();
    weights.into_iter().map(|w| w / total).collect()
}
