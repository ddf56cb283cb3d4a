//! Genome representation for the evolutionary search.

use serde::{Deserialize, Serialize};

use super::{KNIGHT_MOVES, NUM_SQUARES};

/// Number of genes in a genome.
///
/// A full tour visits all 64 squares via 63 moves from the fixed start
/// square, so the genome encodes one fewer move than squares.
pub const GENOME_LENGTH: usize = NUM_SQUARES - 1;

/// A candidate tour encoded as a sequence of move-direction indices.
///
/// Each gene is an index into [`KNIGHT_MOVES`]. Genes carry no legality
/// constraints; illegal moves are repaired (or the walk cut short) during
/// decoding. A genome is owned by exactly one individual and is replaced
/// wholesale by crossover and mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genome {
    pub genes: Vec<u8>,
}

impl Genome {
    /// Wrap a gene sequence, checking the length invariant.
    pub fn new(genes: Vec<u8>) -> Self {
        assert_eq!(
            genes.len(),
            GENOME_LENGTH,
            "genome must hold exactly one gene per move"
        );
        debug_assert!(genes.iter().all(|&g| (g as usize) < KNIGHT_MOVES.len()));
        Self { genes }
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_full_length() {
        let genome = Genome::new(vec![0; GENOME_LENGTH]);
        assert_eq!(genome.len(), GENOME_LENGTH);
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_short_genome() {
        Genome::new(vec![0; GENOME_LENGTH - 1]);
    }
}
