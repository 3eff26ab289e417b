//! Genetic Algorithm engine for the TSP.
//!
//! Tours are evolved by cycle crossover and inversion mutation, and the
//! next generation is chosen by a pluggable [`Selection`] strategy. The
//! loop stops when its generation budget runs out or when one best fitness
//! dominates the recorded history.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, selection)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best tour found, with per-generation history
//! - [`LexPermutations`]: Lazy lexicographic permutation enumerator
//!
//! # Submodules
//!
//! - [`operators`]: Cycle crossover, inversion mutation, population helpers
//! - [`population`]: Initial population from a random lexicographic window
//!
//! # References
//!
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem"

mod config;
pub mod operators;
pub mod population;
mod runner;
mod selection;

pub use config::GaConfig;
pub use population::LexPermutations;
pub use runner::{has_converged, GaResult, GaRunner, Termination};
pub use selection::{fitness_stats, select_best, select_rank_exp, select_tournament, Selection};
