//! Evolutionary search module for discovering knight's tours.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Genome Operations** (`genome`): Random generation, crossover, and mutation
//! - **Path Simulator** (`simulator`): Genome decoding with in-place repair
//! - **Population** (`population`): Evaluation, tournament selection, turnover
//! - **Search Engine** (`engine`): The generation-by-generation driver loop
//!
//! # Example
//!
//! ```rust,no_run
//! use knight_tour::schema::SearchConfig;
//! use knight_tour::search::SearchEngine;
//!
//! let config = SearchConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = SearchEngine::new(config);
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {}",
//!         progress.generation, progress.generation_best);
//! });
//!
//! if result.best.fitness == 64 {
//!     println!("Tour found: {:?}", result.best.path);
//! }
//! ```
//!
//! # Algorithm
//!
//! Each individual carries a 63-gene genome of knight move directions. The
//! simulator walks the genome from the corner square, repairing illegal
//! moves in place; fitness is the number of squares visited before the walk
//! gets stuck. Generations are bred with 10-way tournament selection,
//! fixed-point crossover, and per-gene mutation. The search is heuristic:
//! it may run indefinitely without converging, so the engine supports a
//! generation cap and cooperative cancellation.

mod engine;
mod genome;
mod population;
mod simulator;

pub use engine::{ProgressCallback, SearchEngine};
pub use genome::{CROSSOVER_POINT, GenomeRng, crossover};
pub use population::{Individual, Population};
pub use simulator::{Walk, decode_path};
