//! Genome operations for evolutionary search.
//!
//! Provides random generation, crossover, and mutation.

use rand::prelude::*;

use crate::schema::{GENOME_LENGTH, Genome, KNIGHT_MOVES};

/// Gene position at which crossover splits the parents. Fixed, not
/// randomized: children take 32 genes from one parent and 31 from the other.
pub const CROSSOVER_POINT: usize = 32;

/// Random number generator wrapper for genome operations.
///
/// All randomness in the search flows through this wrapper, so a fixed seed
/// reproduces the full fitness trajectory of a run.
pub struct GenomeRng {
    rng: StdRng,
}

impl GenomeRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create with random seed.
    pub fn random() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generate a genome of uniformly sampled direction indices.
    ///
    /// No legality constraints apply here; illegal moves are resolved by the
    /// decoder.
    pub fn random_genome(&mut self) -> Genome {
        let genes = (0..GENOME_LENGTH)
            .map(|_| self.random_direction())
            .collect();
        Genome::new(genes)
    }

    /// Mutate a genome in place: each gene is independently resampled with
    /// probability `rate`.
    pub fn mutate(&mut self, genome: &mut Genome, rate: f32) {
        for gene in &mut genome.genes {
            if self.rng.r#gen::<f32>() < rate {
                *gene = (self.rng.gen_range(0..KNIGHT_MOVES.len())) as u8;
            }
        }
    }

    /// Uniform direction index in `[0, 8)`.
    fn random_direction(&mut self) -> u8 {
        self.rng.gen_range(0..KNIGHT_MOVES.len()) as u8
    }

    /// Uniform index in `[0, n)`. Used for tournament sampling.
    pub fn pick_index(&mut self, n: usize) -> usize {
        self.rng.gen_range(0..n)
    }
}

/// Single-point crossover of two parent genomes.
///
/// `child1` takes the first 32 genes of `a` and the last 31 of `b`;
/// `child2` takes the first 32 genes of `b` and the last 31 of `a`.
/// Parents are left unmodified.
pub fn crossover(a: &Genome, b: &Genome) -> (Genome, Genome) {
    let splice = |head: &Genome, tail: &Genome| {
        let mut genes = Vec::with_capacity(GENOME_LENGTH);
        genes.extend_from_slice(&head.genes[..CROSSOVER_POINT]);
        genes.extend_from_slice(&tail.genes[CROSSOVER_POINT..]);
        Genome::new(genes)
    };
    (splice(a, b), splice(b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_genome_shape() {
        let mut rng = GenomeRng::new(42);
        let genome = rng.random_genome();
        assert_eq!(genome.len(), GENOME_LENGTH);
        assert!(genome.genes.iter().all(|&g| g < 8));
    }

    #[test]
    fn test_random_genome_deterministic() {
        let mut a = GenomeRng::new(7);
        let mut b = GenomeRng::new(7);
        assert_eq!(a.random_genome(), b.random_genome());
    }

    #[test]
    fn test_crossover_slices() {
        let mut rng = GenomeRng::new(42);
        let a = rng.random_genome();
        let b = rng.random_genome();

        let (c1, c2) = crossover(&a, &b);

        assert_eq!(c1.genes[..CROSSOVER_POINT], a.genes[..CROSSOVER_POINT]);
        assert_eq!(c1.genes[CROSSOVER_POINT..], b.genes[CROSSOVER_POINT..]);
        assert_eq!(c2.genes[..CROSSOVER_POINT], b.genes[..CROSSOVER_POINT]);
        assert_eq!(c2.genes[CROSSOVER_POINT..], a.genes[CROSSOVER_POINT..]);
        assert_eq!(c1.len(), GENOME_LENGTH);
        assert_eq!(c2.len(), GENOME_LENGTH);
    }

    #[test]
    fn test_crossover_leaves_parents_unmodified() {
        let mut rng = GenomeRng::new(42);
        let a = rng.random_genome();
        let b = rng.random_genome();
        let (a_copy, b_copy) = (a.clone(), b.clone());

        let _ = crossover(&a, &b);

        assert_eq!(a, a_copy);
        assert_eq!(b, b_copy);
    }

    #[test]
    fn test_mutate_rate_zero_is_identity() {
        let mut rng = GenomeRng::new(42);
        let mut genome = rng.random_genome();
        let original = genome.clone();

        rng.mutate(&mut genome, 0.0);

        assert_eq!(genome, original);
    }

    #[test]
    fn test_mutate_rate_one_resamples_every_gene() {
        let mut rng = GenomeRng::new(42);
        let mut genome = rng.random_genome();
        let original = genome.clone();

        rng.mutate(&mut genome, 1.0);

        // Every gene was resampled; a fresh draw collides with the old value
        // 1 in 8 times, so across 63 genes nearly all should differ.
        let unchanged = genome
            .genes
            .iter()
            .zip(&original.genes)
            .filter(|(a, b)| a == b)
            .count();
        assert!(unchanged < GENOME_LENGTH / 2, "unchanged = {unchanged}");
    }

    #[test]
    fn test_mutate_keeps_genes_in_range() {
        let mut rng = GenomeRng::new(1);
        let mut genome = rng.random_genome();
        rng.mutate(&mut genome, 1.0);
        assert!(genome.genes.iter().all(|&g| g < 8));
    }
}
