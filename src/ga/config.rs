//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use super::population::factorial;
use super::selection::Selection;
use crate::error::{TspError, TspResult};
use crate::problem::MIN_CITIES;

/// Configuration for the TSP genetic algorithm.
///
/// # Defaults
///
/// The defaults reproduce the classic setup for a few dozen cities:
///
/// ```
/// use u_tsp::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 40);
/// assert_eq!(config.max_generations, 200);
/// assert_eq!(config.selection, Selection::Tournament);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp::ga::{GaConfig, Selection};
///
/// let config = GaConfig::default()
///     .with_population_size(100)
///     .with_selection(Selection::Truncation)
///     .with_mutation_rate(0.3)
///     .with_seed(7);
/// assert!(config.validate(38).is_ok());
/// ```
///
/// Rates are not clamped by the builder: out-of-range values are reported
/// by [`validate`](Self::validate).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of tours kept after each selection.
    ///
    /// Must be smaller than `num_cities!` so the initial window of
    /// permutations exists.
    pub population_size: usize,

    /// Maximum number of generations, the initial one included.
    pub max_generations: usize,

    /// Survivor selection strategy.
    pub selection: Selection,

    /// Probability of crossing a pair of parents (0.0–1.0).
    pub crossover_rate: f64,

    /// Probability of mutating each tour per generation (0.0–1.0).
    pub mutation_rate: f64,

    /// Minimum best-history length before the convergence rule applies.
    ///
    /// Once the history holds this many entries, the run stops when a
    /// single best fitness accounts for more than half of them.
    /// Set to 0 to disable convergence-based termination.
    pub convergence_window: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            max_generations: 200,
            selection: Selection::default(),
            crossover_rate: 0.9,
            mutation_rate: 0.5,
            convergence_window: 10,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the convergence window (0 to disable).
    pub fn with_convergence_window(mut self, window: usize) -> Self {
        self.convergence_window = window;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration against a problem of `num_cities`.
    ///
    /// # Errors
    ///
    /// - [`TspError::TooFewCities`] if `num_cities < 3`
    /// - [`TspError::ProbabilityOutOfRange`] for a rate outside `[0, 1]`
    /// - [`TspError::InvalidConfig`] for a zero population or generation count
    /// - [`TspError::PopulationTooLarge`] if `population_size >= num_cities!`
    pub fn validate(&self, num_cities: usize) -> TspResult<()> {
        if num_cities < MIN_CITIES {
            return Err(TspError::TooFewCities(num_cities));
        }
        check_probability("crossover_rate", self.crossover_rate)?;
        check_probability("mutation_rate", self.mutation_rate)?;
        if self.population_size == 0 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.max_generations == 0 {
            return Err(TspError::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if let Some(space) = factorial(num_cities) {
            if self.population_size as u128 >= space {
                return Err(TspError::PopulationTooLarge {
                    population_size: self.population_size,
                    num_cities,
                });
            }
        }
        Ok(())
    }
}

fn check_probability(name: &'static str, value: f64) -> TspResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(TspError::ProbabilityOutOfRange { name, value })
    }
}
