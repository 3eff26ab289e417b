//! Memoized pairwise Euclidean distances.
//!
//! [`DistanceCache`] stores one slot per unordered pair of city ids under
//! the canonical key `(min, max)`, so `distance(a, b)` and `distance(b, a)`
//! share the same entry. Cities are immutable, so entries never go stale
//! and are never evicted.

use crate::city::City;
use std::collections::HashMap;

/// Upper bound on the pairs reserved per city by [`DistanceCache::with_cities`].
pub const PAIRS_PER_CITY: usize = 8;

/// Run-owned memo of pairwise distances.
///
/// # Examples
///
/// ```
/// use u_tsp::{City, DistanceCache};
///
/// let a = City::new(0, 0.0, 0.0);
/// let b = City::new(1, 3.0, 4.0);
/// let mut cache = DistanceCache::new();
///
/// assert_eq!(cache.distance(&a, &b), 5.0);
/// assert_eq!(cache.distance(&b, &a), 5.0);
/// assert_eq!(cache.computations(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DistanceCache {
    memo: HashMap<(usize, usize), f64>,
    computations: usize,
}

impl DistanceCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache with a capacity hint for `num_cities` cities.
    ///
    /// The hint is capped at [`PAIRS_PER_CITY`] pairs per city; runs touch
    /// only a small fraction of all `C(n, 2)` pairs, and the memo grows past
    /// the hint as new pairs are computed.
    pub fn with_cities(num_cities: usize) -> Self {
        let pairs = num_cities.saturating_mul(num_cities.saturating_sub(1)) / 2;
        let hint = pairs.min(num_cities.saturating_mul(PAIRS_PER_CITY));
        Self {
            memo: HashMap::with_capacity(hint),
            computations: 0,
        }
    }

    /// Returns the distance between two cities, computing it at most once.
    ///
    /// A city's distance to itself is zero and is not stored.
    pub fn distance(&mut self, a: &City, b: &City) -> f64 {
        if a.id() == b.id() {
            return 0.0;
        }
        let key = if a.id() < b.id() {
            (a.id(), b.id())
        } else {
            (b.id(), a.id())
        };
        if let Some(&d) = self.memo.get(&key) {
            return d;
        }
        let d = a.euclidean(b);
        self.computations += 1;
        self.memo.insert(key, d);
        d
    }

    /// Number of raw distance computations performed so far.
    pub fn computations(&self) -> usize {
        self.computations
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Returns true if no pair has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.memo.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        City::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn test_symmetry() {
        let cities = square();
        let mut cache = DistanceCache::new();
        for a in &cities {
            for b in &cities {
                assert_eq!(cache.distance(a, b), cache.distance(b, a));
            }
        }
    }

    #[test]
    fn test_one_computation_per_unordered_pair() {
        let cities = square();
        let mut cache = DistanceCache::with_cities(cities.len());

        // Repeat queries in both orders several times.
        for _ in 0..3 {
            for a in &cities {
                for b in cities.iter().rev() {
                    cache.distance(a, b);
                }
            }
        }
        // C(4, 2) = 6 unordered pairs.
        assert_eq!(cache.computations(), 6);
        assert_eq!(cache.len(), 6);
    }

    #[test]
    fn test_zero_iff_same_id() {
        let cities = square();
        let mut cache = DistanceCache::new();
        assert_eq!(cache.distance(&cities[2], &cities[2]), 0.0);
        assert!(cache.is_empty());
        assert!(cache.distance(&cities[0], &cities[2]) > 0.0);
    }

    #[test]
    fn test_capacity_hint_is_linear_in_cities() {
        let small = DistanceCache::with_cities(4);
        assert!(small.capacity() >= 6);

        let large = DistanceCache::with_cities(5_000);
        assert!(large.is_empty());
        assert!(large.capacity() >= 5_000 * PAIRS_PER_CITY);
        assert!(large.capacity() < 5_000 * PAIRS_PER_CITY * 2);
    }

    #[test]
    fn test_grows_past_capacity_hint() {
        let cities: Vec<City> = City::from_coordinates(
            &(0..40).map(|i| (i as f64, (i * i) as f64)).collect::<Vec<_>>(),
        );
        let mut cache = DistanceCache::with_cities(cities.len());
        for a in &cities {
            for b in &cities {
                cache.distance(a, b);
            }
        }
        assert_eq!(cache.len(), 40 * 39 / 2);
        assert_eq!(cache.computations(), 40 * 39 / 2);
    }

    #[test]
    fn test_values_match_euclidean() {
        let cities = square();
        let mut cache = DistanceCache::new();
        let diag = cache.distance(&cities[0], &cities[2]);
        assert!((diag - 2f64.sqrt()).abs() < 1e-12);
        let side = cache.distance(&cities[3], &cities[0]);
        assert!((side - 1.0).abs() < 1e-12);
    }
}
