//! Search configuration and result types for the evolutionary tour search.

use serde::{Deserialize, Serialize};

use super::Square;

/// Top-level configuration for the genetic search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of individuals per generation. Must be even: crossover always
    /// produces pairs.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Number of individuals sampled (with replacement) per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
    /// Per-gene mutation probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f32,
    /// Generation cap. `None` runs until a tour is found or the search is
    /// cancelled; the core itself has no termination guarantee.
    #[serde(default)]
    pub max_generations: Option<u64>,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            tournament_size: default_tournament_size(),
            mutation_rate: default_mutation_rate(),
            max_generations: None,
            random_seed: None,
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_tournament_size() -> usize {
    10
}
fn default_mutation_rate() -> f32 {
    0.01
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be at least 2")]
    PopulationTooSmall,
    #[error("Population size must be even, got {0}")]
    PopulationOdd(usize),
    #[error("Tournament size must be at least 2, got {0}")]
    TournamentTooSmall(usize),
    #[error("Mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f32),
}

impl SearchConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::PopulationOdd(self.population_size));
        }
        if self.tournament_size < 2 {
            return Err(ConfigError::TournamentTooSmall(self.tournament_size));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::InvalidMutationRate(self.mutation_rate));
        }
        Ok(())
    }
}

/// Per-generation progress reported to the driver's callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Current generation (starts at 1).
    pub generation: u64,
    /// Best fitness seen across the whole run so far.
    pub best_fitness: u32,
    /// Best fitness within the current generation.
    pub generation_best: u32,
    /// Mean fitness of the current generation.
    pub avg_fitness: f32,
    /// Visited-square sequence of the current generation's best individual.
    pub best_path: Vec<Square>,
}

/// Why the search loop stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// An individual visited all 64 squares.
    TourFound,
    /// Generation cap hit without a full tour.
    MaxGenerations,
    /// User cancelled.
    Cancelled,
}

/// Best walk captured at a generation boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourSnapshot {
    /// Number of squares visited.
    pub fitness: u32,
    /// The visited-square sequence, starting at (0, 0).
    pub path: Vec<Square>,
    /// Generation the walk was decoded in.
    pub generation: u64,
}

/// Fitness trajectory over the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHistory {
    /// Best fitness per generation.
    pub best_fitness: Vec<u32>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f32>,
}

/// Summary statistics for a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Generations evaluated.
    pub generations: u64,
    /// Total genome decodes performed.
    pub total_decodes: u64,
    /// Best fitness reached.
    pub best_fitness: u32,
    /// Wall-clock duration of the run.
    pub elapsed_seconds: f64,
    /// Decode throughput.
    pub decodes_per_second: f64,
    /// Why the run stopped.
    pub stop_reason: StopReason,
}

/// Final outcome of a search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Best walk discovered. A full tour iff `best.fitness == 64`.
    pub best: TourSnapshot,
    /// Run statistics.
    pub stats: SearchStats,
    /// Fitness trajectory.
    pub history: SearchHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn test_reference_constants() {
        let config = SearchConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.tournament_size, 10);
        assert_eq!(config.mutation_rate, 0.01);
    }

    #[test]
    fn test_odd_population_rejected() {
        let config = SearchConfig {
            population_size: 51,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PopulationOdd(51))
        ));
    }

    #[test]
    fn test_mutation_rate_bounds() {
        let config = SearchConfig {
            mutation_rate: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMutationRate(_))
        ));
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = SearchConfig {
            random_seed: Some(42),
            max_generations: Some(1000),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.random_seed, Some(42));
        assert_eq!(back.max_generations, Some(1000));
        assert_eq!(back.population_size, config.population_size);
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: SearchConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.max_generations, None);
    }
}
