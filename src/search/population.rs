//! Population management: evaluation, selection, and generation turnover.

use log::trace;
use rayon::prelude::*;

use crate::schema::{Genome, SearchConfig, Square};

use super::genome::{GenomeRng, crossover};
use super::simulator::{Walk, decode_path};

/// A genome together with its decoded walk.
///
/// The walk and fitness are derived state, recomputed every generation; they
/// are unset until [`Population::run_generation`] has run for the current
/// generation.
#[derive(Debug, Clone)]
pub struct Individual {
    /// The genome. Exclusively owned; decoding writes repairs into it.
    pub genome: Genome,
    /// Decoded walk, `None` until the individual has been decoded.
    pub walk: Option<Walk>,
}

impl Individual {
    /// Wrap a genome with no derived state.
    pub fn new(genome: Genome) -> Self {
        Self { genome, walk: None }
    }

    /// Decode the genome, replacing any previous walk.
    pub fn decode(&mut self) {
        self.walk = Some(decode_path(&mut self.genome));
    }

    /// Squares visited, or 0 before the first decode.
    pub fn fitness(&self) -> u32 {
        self.walk.as_ref().map_or(0, Walk::fitness)
    }

    /// The visited-square sequence; empty before the first decode.
    pub fn path(&self) -> &[Square] {
        match &self.walk {
            Some(walk) => &walk.squares,
            None => &[],
        }
    }
}

/// A fixed-size collection of individuals plus a generation counter.
///
/// The size stays constant across generations and must be even, since
/// crossover always produces pairs. No individual survives into the next
/// generation.
pub struct Population {
    individuals: Vec<Individual>,
    generation: u64,
    tournament_size: usize,
    mutation_rate: f32,
    rng: GenomeRng,
}

impl Population {
    /// Build `size` individuals with independently random genomes, using the
    /// reference tournament size and mutation rate.
    pub fn new(size: usize, rng: GenomeRng) -> Self {
        let defaults = SearchConfig::default();
        Self::with_params(size, defaults.tournament_size, defaults.mutation_rate, rng)
    }

    /// Build a population from a validated configuration.
    pub fn from_config(config: &SearchConfig, rng: GenomeRng) -> Self {
        Self::with_params(
            config.population_size,
            config.tournament_size,
            config.mutation_rate,
            rng,
        )
    }

    fn with_params(
        size: usize,
        tournament_size: usize,
        mutation_rate: f32,
        mut rng: GenomeRng,
    ) -> Self {
        assert!(size >= 2 && size % 2 == 0, "population size must be even");
        assert!(tournament_size >= 2, "tournament needs at least 2 samples");

        let individuals = (0..size)
            .map(|_| Individual::new(rng.random_genome()))
            .collect();

        Self {
            individuals,
            generation: 1,
            tournament_size,
            mutation_rate,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Current generation number, starting at 1.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Decode every individual's genome for the current generation.
    ///
    /// Decoding draws no randomness and each individual's state is
    /// exclusively owned, so the per-individual work runs in parallel
    /// without affecting determinism.
    pub fn run_generation(&mut self) {
        self.individuals
            .par_iter_mut()
            .for_each(|individual| individual.decode());
    }

    /// Mean fitness of the current generation.
    pub fn avg_fitness(&self) -> f32 {
        if self.individuals.is_empty() {
            return 0.0;
        }
        let total: u32 = self.individuals.iter().map(Individual::fitness).sum();
        total as f32 / self.individuals.len() as f32
    }

    /// Find the best individual by a linear scan.
    ///
    /// Strict comparison keeps the first-seen individual on ties. Returns
    /// `(0, None)` if called before any generation has been decoded.
    pub fn evaluate(&self) -> (u32, Option<&Individual>) {
        let mut max_fitness = 0;
        let mut best = None;
        for individual in &self.individuals {
            let fitness = individual.fitness();
            if fitness > max_fitness {
                max_fitness = fitness;
                best = Some(individual);
            }
        }
        (max_fitness, best)
    }

    /// Pick two parents from one tournament.
    ///
    /// Samples `tournament_size` individuals uniformly with replacement and
    /// tracks the two highest-fitness entries in a single pass, with strict
    /// comparisons so earlier samples win ties. The two returned indices may
    /// coincide if the tournament degenerates.
    pub fn tournament_select(&mut self) -> (usize, usize) {
        let mut parent1: Option<usize> = None;
        let mut parent2: Option<usize> = None;

        for _ in 0..self.tournament_size {
            let idx = self.rng.pick_index(self.individuals.len());
            let fitness = self.individuals[idx].fitness();

            match parent1 {
                Some(p1) if self.individuals[p1].fitness() >= fitness => match parent2 {
                    Some(p2) if self.individuals[p2].fitness() >= fitness => {}
                    _ => parent2 = Some(idx),
                },
                _ => {
                    parent2 = parent1;
                    parent1 = Some(idx);
                }
            }
        }

        let best = parent1.expect("tournament samples at least one individual");
        (best, parent2.unwrap_or(best))
    }

    /// Replace the population with the next generation.
    ///
    /// Builds size/2 tournament pairs, crosses each pair over, mutates each
    /// child once at creation and once more in a sweep over the completed
    /// generation (the double application is part of the reference
    /// behavior). All current walks are discarded; nothing survives the
    /// turnover.
    pub fn create_next_generation(&mut self) {
        let mut next = Vec::with_capacity(self.individuals.len());

        for _ in 0..self.individuals.len() / 2 {
            let (p1, p2) = self.tournament_select();
            trace!(
                "pairing {} (fit {}) with {} (fit {})",
                p1,
                self.individuals[p1].fitness(),
                p2,
                self.individuals[p2].fitness()
            );

            let (mut child1, mut child2) =
                crossover(&self.individuals[p1].genome, &self.individuals[p2].genome);
            self.rng.mutate(&mut child1, self.mutation_rate);
            self.rng.mutate(&mut child2, self.mutation_rate);
            next.push(Individual::new(child1));
            next.push(Individual::new(child2));
        }

        // Second mutation sweep over the new generation.
        for individual in &mut next {
            self.rng.mutate(&mut individual.genome, self.mutation_rate);
        }

        self.individuals = next;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{GENOME_LENGTH, NUM_SQUARES, START_SQUARE, Square};

    fn fixed_walk(length: usize) -> Walk {
        // Evaluation only reads the length; fabricate squares accordingly.
        let squares = (0..length)
            .map(|i| Square::new((i / 8) as i8, (i % 8) as i8))
            .collect();
        Walk { squares }
    }

    #[test]
    fn test_new_population_shape() {
        let population = Population::new(50, GenomeRng::new(42));
        assert_eq!(population.len(), 50);
        assert_eq!(population.generation(), 1);
        for individual in population.individuals() {
            assert_eq!(individual.genome.len(), GENOME_LENGTH);
            assert_eq!(individual.fitness(), 0);
            assert!(individual.path().is_empty());
        }
    }

    #[test]
    fn test_evaluate_before_decode_is_empty() {
        let population = Population::new(10, GenomeRng::new(42));
        let (max_fitness, best) = population.evaluate();
        assert_eq!(max_fitness, 0);
        assert!(best.is_none());
    }

    #[test]
    fn test_run_generation_sets_fitness() {
        let mut population = Population::new(20, GenomeRng::new(42));
        population.run_generation();

        for individual in population.individuals() {
            let walk = individual.walk.as_ref().unwrap();
            assert_eq!(individual.fitness() as usize, walk.squares.len());
            assert!((1..=NUM_SQUARES).contains(&walk.squares.len()));
            assert_eq!(walk.squares[0], START_SQUARE);
        }

        let (max_fitness, best) = population.evaluate();
        assert!(max_fitness >= 1);
        assert_eq!(best.unwrap().fitness(), max_fitness);
    }

    #[test]
    fn test_evaluate_prefers_first_on_ties() {
        let mut population = Population::new(4, GenomeRng::new(42));
        for (individual, len) in population.individuals.iter_mut().zip([12, 47, 47, 3]) {
            individual.walk = Some(fixed_walk(len));
        }

        let (max_fitness, best) = population.evaluate();
        assert_eq!(max_fitness, 47);
        // First-seen tie-break: index 1, not index 2.
        assert!(std::ptr::eq(best.unwrap(), &population.individuals()[1]));
    }

    #[test]
    fn test_tournament_returns_members_in_fitness_order() {
        let mut population = Population::new(10, GenomeRng::new(42));
        population.run_generation();

        for _ in 0..50 {
            let (p1, p2) = population.tournament_select();
            assert!(p1 < population.len());
            assert!(p2 < population.len());
            assert!(
                population.individuals()[p1].fitness() >= population.individuals()[p2].fitness()
            );
        }
    }

    #[test]
    fn test_next_generation_replaces_population() {
        let mut population = Population::new(20, GenomeRng::new(42));
        population.run_generation();
        population.create_next_generation();

        assert_eq!(population.len(), 20);
        assert_eq!(population.generation(), 2);
        for individual in population.individuals() {
            assert_eq!(individual.genome.len(), GENOME_LENGTH);
            assert!(individual.genome.genes.iter().all(|&g| g < 8));
            // Derived state is discarded with the old generation.
            assert!(individual.walk.is_none());
            assert_eq!(individual.fitness(), 0);
        }
    }

    #[test]
    fn test_generations_are_deterministic_for_a_seed() {
        let run = |seed: u64| {
            let mut population = Population::new(20, GenomeRng::new(seed));
            let mut trajectory = Vec::new();
            for _ in 0..5 {
                population.run_generation();
                let (max_fitness, _) = population.evaluate();
                trajectory.push((max_fitness, population.avg_fitness().to_bits()));
                population.create_next_generation();
            }
            trajectory
        };

        assert_eq!(run(7), run(7));
        assert_ne!(run(7), run(8));
    }
}
