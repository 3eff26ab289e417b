//! Genetic-algorithm optimizer for the Euclidean Traveling Salesman Problem.
//!
//! Searches for a short closed tour through a set of cities in the plane
//! with population-based stochastic search:
//!
//! - **Tours**: permutations of city ids, evaluated through a memoized
//!   pairwise [`DistanceCache`] owned by the [`TspProblem`].
//! - **Initial population**: a random window of consecutive lexicographic
//!   permutations, diversified by two mutation passes.
//! - **Operators**: cycle crossover (keeps every child a valid permutation)
//!   and inversion mutation of a segment straddling the midpoint.
//! - **Selection**: two-round tournament (default), truncation, or
//!   rank-based exponential sampling.
//! - **Termination**: generation budget, or convergence once one best
//!   fitness dominates the per-generation history.
//!
//! # Example
//!
//! ```
//! use u_tsp::ga::{GaConfig, GaRunner};
//! use u_tsp::TspProblem;
//!
//! let mut problem =
//!     TspProblem::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])?;
//! let config = GaConfig::default()
//!     .with_population_size(4)
//!     .with_mutation_rate(0.3)
//!     .with_max_generations(50)
//!     .with_seed(42);
//! let result = GaRunner::run(&mut problem, &config)?;
//! assert!(result.best.is_permutation(4));
//! # Ok::<(), u_tsp::TspError>(())
//! ```

pub mod city;
pub mod distance;
pub mod error;
pub mod ga;
pub mod io;
pub mod problem;
pub mod random;
pub mod tour;

pub use city::City;
pub use distance::DistanceCache;
pub use error::{TspError, TspResult};
pub use problem::TspProblem;
pub use tour::Tour;
