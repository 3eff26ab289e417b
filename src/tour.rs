//! Tour chromosome: a closed route visiting every city exactly once.

use crate::city::City;
use crate::ga::operators::{cycle_crossover, invert_mutation, invert_segment};
use crate::problem::TspProblem;
use rand::Rng;
use std::cmp::Ordering;

/// Relative tolerance used when grouping tours by equal fitness.
pub const FITNESS_EPSILON: f64 = 1e-9;

/// A candidate solution: a permutation of city ids.
///
/// The tour carries its own fitness (total cyclic length). A freshly built
/// or mutated tour is unevaluated: it holds no fitness and reports
/// `f64::INFINITY` until [`TspProblem::evaluate`] stores the real value,
/// which may itself be infinite. Lower fitness is better.
///
/// # Examples
///
/// ```
/// use u_tsp::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]);
/// assert_eq!(tour.order(), &[2, 0, 1]);
/// assert_eq!(tour.fitness(), f64::INFINITY);
/// ```
#[derive(Debug, Clone)]
pub struct Tour {
    order: Vec<usize>,
    fitness: Option<f64>,
}

impl Tour {
    /// Creates an unevaluated tour from a city-id permutation.
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            fitness: None,
        }
    }

    /// Returns the city-id sequence.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Returns the number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the tour visits no cities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the cached fitness (`f64::INFINITY` if unevaluated).
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// Returns true once a fitness has been stored.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Stores the fitness computed by the problem.
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Resolves the route to the problem's cities, in visiting order.
    pub fn cities<'a>(&'a self, problem: &'a TspProblem) -> impl Iterator<Item = &'a City> + 'a {
        self.order.iter().map(move |&id| &problem.cities()[id])
    }

    /// Checks that the tour holds every id in `0..n` exactly once.
    pub fn is_permutation(&self, n: usize) -> bool {
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &id in &self.order {
            if id >= n || seen[id] {
                return false;
            }
            seen[id] = true;
        }
        true
    }

    /// Cycle crossover with `other`, producing two unevaluated children.
    pub fn crossover(&self, other: &Tour) -> (Tour, Tour) {
        let (c1, c2) = cycle_crossover(&self.order, &other.order);
        (Tour::new(c1), Tour::new(c2))
    }

    /// Inversion mutation: reverses a random segment straddling the midpoint.
    ///
    /// Invalidates the cached fitness.
    pub fn mutate<R: Rng>(&mut self, rng: &mut R) {
        invert_mutation(&mut self.order, rng);
        self.fitness = None;
    }

    /// Reverses `[ini, fin)` and invalidates the cached fitness.
    pub fn invert(&mut self, ini: usize, fin: usize) {
        invert_segment(&mut self.order, ini, fin);
        self.fitness = None;
    }

    /// Total order by fitness, ascending.
    pub fn cmp_fitness(a: &Tour, b: &Tour) -> Ordering {
        a.fitness().total_cmp(&b.fitness())
    }
}

/// Sorts tours by fitness, best first.
pub fn sort_by_fitness(tours: &mut [Tour]) {
    tours.sort_by(Tour::cmp_fitness);
}

/// Near-equality of two fitness values under [`FITNESS_EPSILON`].
pub fn fitness_eq(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= FITNESS_EPSILON * scale
}

impl std::fmt::Display for Tour {
    /// Formats the closed route, e.g. `[ 0, 2, 1, 0 ]`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for id in &self.order {
            write!(f, " {id},")?;
        }
        match self.order.first() {
            Some(first) => write!(f, " {first} ]"),
            None => write!(f, " ]"),
        }
    }
}
