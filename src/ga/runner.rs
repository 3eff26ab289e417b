//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → selection → recombination → mutation → re-selection →
//! best tracking → convergence check → repeat.

use super::config::GaConfig;
use super::operators::{mutate_population, recombine_population};
use super::population::generate;
use super::selection::fitness_stats;
use crate::error::TspResult;
use crate::problem::TspProblem;
use crate::random::rng_from_seed;
use crate::tour::{fitness_eq, sort_by_fitness, Tour};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// One best fitness dominated the recorded history.
    Converged,
    /// The generation budget was consumed.
    Exhausted,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best tour recorded during the entire run.
    pub best: Tour,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations executed, the initial one included.
    pub generations: usize,

    /// How the run ended.
    pub termination: Termination,

    /// Best fitness of each generation, in order.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    /// Returns true if the run stopped on the convergence rule.
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_tsp::ga::{GaConfig, GaRunner};
/// use u_tsp::TspProblem;
///
/// let mut problem = TspProblem::from_coordinates(&[
///     (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.5, 1.5),
/// ])?;
/// let config = GaConfig::default().with_population_size(10).with_seed(42);
/// let result = GaRunner::run(&mut problem, &config)?;
/// assert!(result.best.is_permutation(5));
/// # Ok::<(), u_tsp::TspError>(())
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns the configuration or input error found by
    /// [`GaConfig::validate`] before any generation runs.
    pub fn run(problem: &mut TspProblem, config: &GaConfig) -> TspResult<GaResult> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops
    /// before the next generation and returns the best tour found so far.
    pub fn run_with_cancel(
        problem: &mut TspProblem,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> TspResult<GaResult> {
        config.validate(problem.num_cities())?;

        let mut rng = rng_from_seed(config.seed);
        let target = config.population_size;

        // 1. Initial population, sorted, best recorded
        let mut population = generate(problem, target, &mut rng)?;
        sort_by_fitness(&mut population);
        let mut history: Vec<Tour> = Vec::with_capacity(config.max_generations);
        history.push(best_of(&population).clone());
        let mut fitness_history = Vec::with_capacity(config.max_generations);
        fitness_history.push(history[0].fitness());

        let mut survivors = config.selection.select(population, target, &mut rng);
        sort_by_fitness(&mut survivors);
        debug!("generation 1: best {:.6}", fitness_history[0]);

        let mut generations = 1;
        let mut termination = Termination::Exhausted;

        // 2. Evolutionary loop
        while generations < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    termination = Termination::Cancelled;
                    break;
                }
            }
            generations += 1;

            let offspring = recombine_population(&survivors, config.crossover_rate, &mut rng);
            let offspring_count = offspring.len();
            survivors.extend(offspring);
            mutate_population(&mut survivors, config.mutation_rate, &mut rng);
            problem.evaluate_population(&mut survivors);

            survivors = config.selection.select(survivors, target, &mut rng);
            sort_by_fitness(&mut survivors);

            let gen_best = best_of(&survivors).clone();
            fitness_history.push(gen_best.fitness());
            history.push(gen_best);

            if log::log_enabled!(log::Level::Debug) {
                let (sd, mean) = fitness_stats(&survivors);
                debug!(
                    "generation {generations}: best {:.6}, mean {mean:.6}, sd {sd:.6}, {offspring_count} offspring",
                    fitness_history[generations - 1]
                );
            }

            // 3. Convergence check
            if has_converged(&fitness_history, config.convergence_window) {
                termination = Termination::Converged;
                break;
            }
        }

        // 4. Best ever recorded
        let best = history
            .into_iter()
            .min_by(Tour::cmp_fitness)
            .expect("history holds the initial best");

        info!(
            "{termination:?} after {generations} generations: best {:.6}",
            best.fitness()
        );

        Ok(GaResult {
            best_fitness: best.fitness(),
            best,
            generations,
            termination,
            fitness_history,
        })
    }
}

/// Convergence rule over the per-generation best fitness values.
///
/// Once `history` holds at least `window` entries, reports convergence when
/// the most frequent value (under [`fitness_eq`]) occurs in more than half
/// of them. A `window` of 0 disables the rule.
pub fn has_converged(history: &[f64], window: usize) -> bool {
    if window == 0 || history.len() < window {
        return false;
    }
    most_frequent_count(history) * 2 > history.len()
}

/// Size of the largest group of near-equal values.
fn most_frequent_count(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut best = 0;
    let mut start = 0;
    for i in 0..sorted.len() {
        if !fitness_eq(sorted[start], sorted[i]) {
            start = i;
        }
        best = best.max(i - start + 1);
    }
    best
}

/// The best tour of a sorted, non-empty population.
fn best_of(population: &[Tour]) -> &Tour {
    population
        .first()
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::ga::Selection;

    fn unit_square() -> TspProblem {
        TspProblem::from_coordinates(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
            .expect("valid square")
    }

    fn circle(n: usize) -> TspProblem {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                // Scramble input order so the identity tour is not optimal.
                let k = (i * 5) % n;
                let a = 2.0 * std::f64::consts::PI * k as f64 / n as f64;
                (a.cos(), a.sin())
            })
            .collect();
        TspProblem::from_coordinates(&coords).expect("valid circle")
    }

    // ---- Convergence rule ----

    #[test]
    fn test_converged_on_identical_history() {
        let history = vec![7.5; 10];
        assert!(has_converged(&history, 10));
    }

    #[test]
    fn test_not_converged_below_window() {
        let history = vec![7.5; 9];
        assert!(!has_converged(&history, 10));
        assert!(!has_converged(&vec![7.5; 50], 0));
    }

    #[test]
    fn test_majority_required() {
        // 5 of 10: not more than half.
        let mut history = vec![3.0; 5];
        history.extend([4.0, 5.0, 6.0, 7.0, 8.0]);
        assert!(!has_converged(&history, 10));
        // 6 of 11.
        history.push(3.0);
        assert!(has_converged(&history, 10));
    }

    #[test]
    fn test_near_equal_values_group() {
        let history: Vec<f64> = (0..10).map(|i| 12.0 + i as f64 * 1e-13).collect();
        assert!(has_converged(&history, 10));
    }

    #[test]
    fn test_sub_unit_differences_are_distinct() {
        // Values closer than 1.0 but clearly different must not group.
        let history: Vec<f64> = (0..10).map(|i| 4.0 + i as f64 * 0.1).collect();
        assert_eq!(most_frequent_count(&history), 1);
        assert!(!has_converged(&history, 10));
    }

    // ---- Full runs ----

    #[test]
    fn test_unit_square_finds_perimeter() {
        let mut problem = unit_square();
        let config = GaConfig::default()
            .with_population_size(4)
            .with_crossover_rate(0.9)
            .with_mutation_rate(0.3)
            .with_max_generations(50)
            .with_seed(42);

        let result = GaRunner::run(&mut problem, &config).expect("valid run");

        assert!(
            (result.best_fitness - 4.0).abs() < 1e-9,
            "expected the perimeter, got {}",
            result.best_fitness
        );
        let order = result.best.order();
        assert!(result.best.is_permutation(4));
        // Read cyclically, every step moves to an adjacent corner.
        let cities = problem.cities();
        for i in 0..4 {
            let a = &cities[order[i]];
            let b = &cities[order[(i + 1) % 4]];
            assert!((a.euclidean(b) - 1.0).abs() < 1e-12, "tour {order:?}");
        }
    }

    #[test]
    fn test_rejects_oversized_population_before_running() {
        let mut problem =
            TspProblem::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).expect("valid");
        let config = GaConfig::default().with_population_size(10).with_seed(1);
        let err = GaRunner::run(&mut problem, &config).unwrap_err();
        assert!(matches!(err, TspError::PopulationTooLarge { .. }));
        // Nothing was evaluated.
        assert_eq!(problem.cache().computations(), 0);
    }

    #[test]
    fn test_triangle_converges() {
        // Every 3-city tour has the same length.
        let mut problem =
            TspProblem::from_coordinates(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]).expect("valid");
        let config = GaConfig::default()
            .with_population_size(4)
            .with_max_generations(1000)
            .with_seed(42);

        let result = GaRunner::run(&mut problem, &config).expect("valid run");

        assert_eq!(result.termination, Termination::Converged);
        assert!(result.converged());
        assert_eq!(result.generations, 10);
        assert!((result.best_fitness - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_exhausted_without_convergence_window() {
        let mut problem = circle(7);
        let config = GaConfig::default()
            .with_population_size(12)
            .with_max_generations(30)
            .with_convergence_window(0)
            .with_seed(3);

        let result = GaRunner::run(&mut problem, &config).expect("valid run");

        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.generations, 30);
        assert_eq!(result.fitness_history.len(), 30);
    }

    #[test]
    fn test_best_is_minimum_of_history() {
        let mut problem = circle(9);
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(80)
            .with_seed(11);

        let result = GaRunner::run(&mut problem, &config).expect("valid run");

        let min = result
            .fitness_history
            .iter()
            .cloned()
            .fold(f64::INFINITY, f64::min);
        assert_eq!(result.best_fitness, min);
        assert!(result.best.is_permutation(9));
        assert_eq!(result.best.fitness(), result.best_fitness);
    }

    #[test]
    fn test_all_selection_strategies() {
        for selection in [
            Selection::Tournament,
            Selection::Truncation,
            Selection::RankExponential,
        ] {
            let mut problem = circle(8);
            let config = GaConfig::default()
                .with_population_size(16)
                .with_max_generations(40)
                .with_selection(selection)
                .with_seed(42);

            let result = GaRunner::run(&mut problem, &config).expect("valid run");

            assert!(
                result.best.is_permutation(8),
                "selection {selection:?} returned an invalid tour"
            );
            assert!(result.best_fitness.is_finite());
            assert!(result.generations >= 1);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = GaConfig::default()
            .with_population_size(15)
            .with_max_generations(60)
            .with_seed(99);

        let a = GaRunner::run(&mut circle(11), &config).expect("valid run");
        let b = GaRunner::run(&mut circle(11), &config).expect("valid run");

        assert_eq!(a.best.order(), b.best.order());
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(a.generations, b.generations);
    }

    #[test]
    fn test_cancellation_before_first_iteration() {
        let mut problem = circle(8);
        let config = GaConfig::default()
            .with_population_size(10)
            .with_max_generations(10_000)
            .with_convergence_window(0)
            .with_seed(42);

        let cancel = Arc::new(AtomicBool::new(true));
        let result =
            GaRunner::run_with_cancel(&mut problem, &config, Some(cancel)).expect("valid run");

        assert_eq!(result.termination, Termination::Cancelled);
        assert_eq!(result.generations, 1);
        assert!(result.best.is_permutation(8));
    }

    #[test]
    fn test_single_generation_budget() {
        let mut problem = circle(6);
        let config = GaConfig::default()
            .with_population_size(8)
            .with_max_generations(1)
            .with_seed(5);

        let result = GaRunner::run(&mut problem, &config).expect("valid run");

        assert_eq!(result.generations, 1);
        assert_eq!(result.termination, Termination::Exhausted);
        assert_eq!(result.fitness_history.len(), 1);
    }
}
