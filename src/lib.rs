//! Knight's tour search by genetic algorithm.
//!
//! This crate searches for a knight's tour on an 8x8 board - a sequence of
//! knight moves visiting all 64 squares without repetition - using an
//! evolutionary optimizer rather than exact graph algorithms.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Board geometry, genome, and search configuration types
//! - `search`: The optimizer (decoding, selection, crossover, mutation)
//!
//! # Example
//!
//! ```rust,no_run
//! use knight_tour::{SearchConfig, SearchEngine};
//!
//! let config = SearchConfig {
//!     population_size: 50,
//!     max_generations: Some(100_000),
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//! config.validate().expect("valid config");
//!
//! let mut engine = SearchEngine::new(config);
//! let result = engine.run();
//!
//! println!(
//!     "best fitness {} after {} generations",
//!     result.best.fitness, result.stats.generations
//! );
//! ```

pub mod schema;
pub mod search;

// Re-export commonly used types
pub use schema::{SearchConfig, SearchResult, Square, StopReason};
pub use search::{Population, SearchEngine};
