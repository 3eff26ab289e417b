//! # u-tsp CLI
//!
//! Reads city coordinates, evolves a short closed tour, and writes the
//! tour's coordinates in visiting order.

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use u_tsp::ga::{GaConfig, GaRunner, Selection};
use u_tsp::io::{load_problem, save_tour};

/// Command-line interface for u-tsp
#[derive(Parser)]
#[command(name = "u-tsp")]
#[command(about = "Genetic-algorithm optimizer for the Traveling Salesman Problem")]
#[command(long_about = "Evolves a short closed tour through the cities of INPUT:
  u-tsp cities.txt                     # defaults: population 40, 200 generations
  u-tsp cities.txt -o best.dat --seed 7
  u-tsp cities.txt --selection rank-exp -v

INPUT holds one city per line: two whitespace-separated coordinates.")]
#[command(version)]
struct Cli {
    /// Coordinate file, one `x y` pair per line
    input: String,

    /// Output file for the best tour's coordinates
    #[arg(short, long, default_value = "recorrido-optimo.data")]
    output: String,

    /// Population size (must be smaller than the number of cities factorial)
    #[arg(long, default_value_t = 40)]
    population: usize,

    /// Crossover probability
    #[arg(long, default_value_t = 0.9)]
    crossover: f64,

    /// Mutation probability
    #[arg(long, default_value_t = 0.5)]
    mutation: f64,

    /// Maximum number of generations
    #[arg(long, default_value_t = 200)]
    generations: usize,

    /// Survivor selection strategy: tournament, truncation or rank-exp
    #[arg(long, default_value = "tournament")]
    selection: Selection,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    let mut problem =
        load_problem(&cli.input).with_context(|| format!("failed to load {}", cli.input))?;

    let mut config = GaConfig::default()
        .with_population_size(cli.population)
        .with_crossover_rate(cli.crossover)
        .with_mutation_rate(cli.mutation)
        .with_max_generations(cli.generations)
        .with_selection(cli.selection);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = GaRunner::run(&mut problem, &config).context("optimization failed")?;

    println!("Best tour found:");
    println!("{} -- cost {:.6}", result.best, result.best_fitness);
    println!(
        "{:?} after {} generations",
        result.termination, result.generations
    );

    save_tour(&result.best, &problem, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output))?;
    eprintln!("Saved tour coordinates to {}", cli.output);

    Ok(())
}
