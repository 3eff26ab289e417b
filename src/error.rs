//! Error types for the TSP optimizer.
//!
//! Every error is detected eagerly, before the evolution loop starts.
//! Nothing is silently corrected: an out-of-range probability or an
//! oversized population aborts the run with a descriptive message.

use thiserror::Error;

/// Result type alias for optimizer operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for problem construction, configuration, and I/O.
#[derive(Debug, Error)]
pub enum TspError {
    // ===== Configuration Errors =====
    /// The initial population cannot be drawn from the permutation space.
    #[error(
        "population_size {population_size} must be smaller than {num_cities}! \
         (the number of distinct tours)"
    )]
    PopulationTooLarge {
        /// Requested population size.
        population_size: usize,
        /// Number of cities in the problem.
        num_cities: usize,
    },

    /// A probability parameter lies outside `[0, 1]`.
    #[error("{name} must be in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Any other invalid configuration parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ===== Input Errors =====
    /// A tour needs at least three distinct cities.
    #[error("at least 3 cities are required, got {0}")]
    TooFewCities(usize),

    /// A coordinate is NaN or infinite.
    #[error("city {id} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Id of the offending city.
        id: usize,
    },

    /// City ids must match their position in the city list.
    #[error("city at index {index} has id {id}")]
    IdMismatch {
        /// Position in the city list.
        index: usize,
        /// Id found at that position.
        id: usize,
    },

    /// A malformed line in a coordinate file.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TspError {
    /// Returns `true` for errors caused by the run configuration.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            TspError::PopulationTooLarge { .. }
                | TspError::ProbabilityOutOfRange { .. }
                | TspError::InvalidConfig(_)
        )
    }

    /// Returns `true` for errors caused by the city data.
    pub fn is_input(&self) -> bool {
        !self.is_config()
    }
}
