//! Knight tour CLI - Run the evolutionary search from JSON configuration.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;

use knight_tour::schema::{BOARD_SIZE, SearchConfig, Square, StopReason};
use knight_tour::search::SearchEngine;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--help" {
        eprintln!("Usage: {} [config.json] [max-generations]", args[0]);
        eprintln!();
        eprintln!("Search for a knight's tour with a genetic algorithm.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json      Path to search configuration file (optional)");
        eprintln!("  max-generations  Generation cap (default: unbounded)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    // Load configuration
    let mut config = match args.get(1) {
        Some(path) => {
            let config_path = PathBuf::from(path);
            let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => SearchConfig::default(),
    };

    if let Some(cap) = args.get(2) {
        let cap: u64 = cap.parse().unwrap_or_else(|e| {
            eprintln!("Error parsing max-generations: {}", e);
            std::process::exit(1);
        });
        config.max_generations = Some(cap);
    }

    if let Err(e) = config.validate() {
        eprintln!("Invalid config: {}", e);
        std::process::exit(1);
    }

    println!("Knight's Tour Search");
    println!("====================");
    println!("Population:      {}", config.population_size);
    println!("Tournament size: {}", config.tournament_size);
    println!("Mutation rate:   {}", config.mutation_rate);
    match config.max_generations {
        Some(cap) => println!("Generation cap:  {}", cap),
        None => println!("Generation cap:  none (runs until a tour is found)"),
    }
    if let Some(seed) = config.random_seed {
        println!("Seed:            {}", seed);
    }
    println!();

    // Run search, reporting whenever the best fitness improves
    let mut engine = SearchEngine::new(config);
    let last_best = Cell::new(0u32);
    let result = engine.run_with_callback(|progress| {
        if progress.best_fitness > last_best.get() {
            last_best.set(progress.best_fitness);
            println!(
                "  Generation {:>7}: best={:>2}/64, avg={:.1}",
                progress.generation, progress.best_fitness, progress.avg_fitness
            );
        }
    });

    println!();
    match result.stats.stop_reason {
        StopReason::TourFound => {
            println!(
                "Tour found in generation {} ({} squares):",
                result.best.generation, result.best.fitness
            );
            println!();
            print_tour(&result.best.path);
        }
        StopReason::MaxGenerations => {
            println!(
                "No tour within {} generations; best walk covered {} squares.",
                result.stats.generations, result.best.fitness
            );
        }
        StopReason::Cancelled => {
            println!("Search cancelled.");
        }
    }

    println!();
    println!(
        "Time: {:.2}s ({:.0} decodes/s over {} generations)",
        result.stats.elapsed_seconds,
        result.stats.decodes_per_second,
        result.stats.generations
    );
}

/// Render the walk as a board of visit numbers.
fn print_tour(path: &[Square]) {
    let mut order = [[0usize; BOARD_SIZE]; BOARD_SIZE];
    for (i, square) in path.iter().enumerate() {
        order[square.row as usize][square.col as usize] = i + 1;
    }

    for row in order {
        let cells: Vec<String> = row
            .iter()
            .map(|&n| {
                if n == 0 {
                    " .".to_string()
                } else {
                    format!("{:>2}", n)
                }
            })
            .collect();
        println!("  {}", cells.join(" "));
    }
}

fn print_example_config() {
    let config = SearchConfig {
        max_generations: Some(1_000_000),
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
