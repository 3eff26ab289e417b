//! Problem instance: the city set and its run-owned distance cache.

use crate::city::City;
use crate::distance::DistanceCache;
use crate::error::{TspError, TspResult};
use crate::tour::Tour;

/// Minimum number of cities for a meaningful tour.
pub const MIN_CITIES: usize = 3;

/// A validated Euclidean TSP instance.
///
/// Owns the cities and the [`DistanceCache`]. Fitness evaluation through
/// [`evaluate`](Self::evaluate) is the only path that reads or fills the
/// cache, so two problems never share memoized state.
///
/// # Examples
///
/// ```
/// use u_tsp::{TspProblem, Tour};
///
/// let mut problem =
///     TspProblem::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])?;
/// let mut tour = Tour::new(vec![0, 1, 2, 3]);
/// assert_eq!(problem.evaluate(&mut tour), 4.0);
/// # Ok::<(), u_tsp::TspError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TspProblem {
    cities: Vec<City>,
    cache: DistanceCache,
}

impl TspProblem {
    /// Builds a problem from cities whose ids equal their positions.
    pub fn new(cities: Vec<City>) -> TspResult<Self> {
        if cities.len() < MIN_CITIES {
            return Err(TspError::TooFewCities(cities.len()));
        }
        for (index, city) in cities.iter().enumerate() {
            if city.id() != index {
                return Err(TspError::IdMismatch {
                    index,
                    id: city.id(),
                });
            }
            if !city.is_finite() {
                return Err(TspError::NonFiniteCoordinate { id: city.id() });
            }
        }
        let cache = DistanceCache::with_cities(cities.len());
        Ok(Self { cities, cache })
    }

    /// Builds a problem from coordinates, assigning ids by input order.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> TspResult<Self> {
        Self::new(City::from_coordinates(coords))
    }

    /// Returns the cities, indexed by id.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Returns the number of cities.
    pub fn num_cities(&self) -> usize {
        self.cities.len()
    }

    /// Returns the distance cache.
    pub fn cache(&self) -> &DistanceCache {
        &self.cache
    }

    /// Total cyclic length of a city-id sequence, wrap-around edge included.
    pub fn tour_length(&mut self, order: &[usize]) -> f64 {
        let n = order.len();
        let mut total = 0.0;
        for i in 0..n {
            let a = &self.cities[order[i]];
            let b = &self.cities[order[(i + 1) % n]];
            total += self.cache.distance(a, b);
        }
        total
    }

    /// Evaluates a tour, storing and returning its fitness.
    ///
    /// Already-evaluated tours return their cached value.
    ///
    /// # Panics
    /// Panics if the tour is not a permutation of this problem's cities.
    pub fn evaluate(&mut self, tour: &mut Tour) -> f64 {
        if tour.is_evaluated() {
            return tour.fitness();
        }
        assert!(
            tour.is_permutation(self.num_cities()),
            "tour lost the permutation property: {tour}"
        );
        let fitness = self.tour_length(tour.order());
        tour.set_fitness(fitness);
        fitness
    }

    /// Evaluates every unevaluated tour in the population.
    pub fn evaluate_population(&mut self, population: &mut [Tour]) {
        for tour in population.iter_mut() {
            self.evaluate(tour);
        }
    }
}
