//! Search engine: drives the population generation by generation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info};

use crate::schema::{
    NUM_SQUARES, SearchConfig, SearchHistory, SearchProgress, SearchResult, SearchStats,
    StopReason, TourSnapshot,
};

use super::genome::GenomeRng;
use super::population::{Individual, Population};

/// Progress callback type.
pub type ProgressCallback = Box<dyn Fn(&SearchProgress) + Send + Sync>;

/// Runs the evolutionary search until a full tour is found, the generation
/// cap is hit, or the run is cancelled.
///
/// The population itself keeps no elitism; the engine snapshots the
/// best-so-far walk at generation boundaries so the winner is not lost to
/// the generation turnover.
pub struct SearchEngine {
    config: SearchConfig,
    population: Population,
    history: SearchHistory,
    best: Option<TourSnapshot>,
    best_fitness: u32,
    cancelled: Arc<AtomicBool>,
}

impl SearchEngine {
    /// Create an engine from a configuration.
    ///
    /// The configuration should be validated first; population invariants
    /// (even size, tournament size) are enforced by assertion.
    pub fn new(config: SearchConfig) -> Self {
        let seed = config.random_seed.unwrap_or_else(rand::random);
        debug!("search seeded with {seed}");
        let rng = GenomeRng::new(seed);
        let population = Population::from_config(&config, rng);

        Self {
            config,
            population,
            history: SearchHistory::default(),
            best: None,
            best_fitness: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get cancellation handle. Cancellation takes effect at the next
    /// generation boundary.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Run the search, invoking `callback` once per generation with the
    /// best individual's fitness and visited-square sequence.
    pub fn run_with_callback<F>(&mut self, callback: F) -> SearchResult
    where
        F: Fn(&SearchProgress),
    {
        let start_time = Instant::now();

        let stop_reason = loop {
            self.population.run_generation();
            let (generation_best, best) = self.population.evaluate();

            self.history.best_fitness.push(generation_best);
            self.history.avg_fitness.push(self.population.avg_fitness());

            if generation_best > self.best_fitness {
                self.best_fitness = generation_best;
                self.best = best.map(|individual| TourSnapshot {
                    fitness: generation_best,
                    path: individual.path().to_vec(),
                    generation: self.population.generation(),
                });
                debug!(
                    "generation {}: best fitness {}",
                    self.population.generation(),
                    generation_best
                );
            }

            callback(&self.progress(generation_best, best));

            if generation_best as usize == NUM_SQUARES {
                info!(
                    "full tour found in generation {}",
                    self.population.generation()
                );
                break StopReason::TourFound;
            }
            if self.cancelled.load(Ordering::Relaxed) {
                break StopReason::Cancelled;
            }
            if let Some(limit) = self.config.max_generations
                && self.population.generation() >= limit
            {
                break StopReason::MaxGenerations;
            }

            self.population.create_next_generation();
        };

        let elapsed = start_time.elapsed().as_secs_f64();
        let generations = self.population.generation();
        let total_decodes = generations * self.population.len() as u64;

        SearchResult {
            best: self
                .best
                .clone()
                .expect("at least one generation was evaluated"),
            stats: SearchStats {
                generations,
                total_decodes,
                best_fitness: self.best_fitness,
                elapsed_seconds: elapsed,
                decodes_per_second: total_decodes as f64 / elapsed,
                stop_reason,
            },
            history: self.history.clone(),
        }
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> SearchResult {
        self.run_with_callback(|_| {})
    }

    fn progress(&self, generation_best: u32, best: Option<&Individual>) -> SearchProgress {
        SearchProgress {
            generation: self.population.generation(),
            best_fitness: self.best_fitness,
            generation_best,
            avg_fitness: self.population.avg_fitness(),
            best_path: best.map(|individual| individual.path().to_vec()).unwrap_or_default(),
        }
    }
}
