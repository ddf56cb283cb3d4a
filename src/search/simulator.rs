//! Genome decoding: turn a gene sequence into a walked path over the board.
//!
//! Decoding applies a repair rule to illegal moves and writes successful
//! repairs back into the genome, so repaired moves are inherited by
//! offspring through crossover.

use crate::schema::{Genome, KNIGHT_MOVES, NUM_SQUARES, START_SQUARE, Square};

/// A decoded walk: the squares visited, in order, starting at (0, 0).
#[derive(Debug, Clone)]
pub struct Walk {
    pub squares: Vec<Square>,
}

impl Walk {
    /// Fitness is the number of squares visited, in `[1, 64]`.
    pub fn fitness(&self) -> u32 {
        self.squares.len() as u32
    }

    /// True when every square on the board was visited.
    pub fn is_tour(&self) -> bool {
        self.squares.len() == NUM_SQUARES
    }
}

/// Decode a genome into a walk, repairing illegal moves in place.
///
/// Walks the genes from the start square. A move is legal iff it stays on
/// the board and targets an unvisited square. When a gene encodes an illegal
/// move, the alternate directions `(d+1)%8 ..= (d+6)%8` are tried in that
/// fixed order and the first legal one overwrites the gene; `(d+7)%8` is
/// never tried. When no direction is legal the walk ends there and the
/// remaining genes are left untouched.
///
/// Never fails: every genome decodes to a path of length at least 1.
pub fn decode_path(genome: &mut Genome) -> Walk {
    let mut squares = Vec::with_capacity(NUM_SQUARES);
    let mut visited = 1u64 << START_SQUARE.index();
    let mut current = START_SQUARE;
    squares.push(current);

    for i in 0..genome.len() {
        let gene = genome.genes[i];
        let chosen = step(current, gene, visited).map(|sq| (gene, sq)).or_else(|| {
            repair_directions(gene).find_map(|d| step(current, d, visited).map(|sq| (d, sq)))
        });

        let Some((direction, next)) = chosen else {
            break;
        };

        genome.genes[i] = direction;
        visited |= 1u64 << next.index();
        squares.push(next);
        current = next;
    }

    Walk { squares }
}

/// Attempt a single move; `None` if it leaves the board or revisits a square.
fn step(from: Square, direction: u8, visited: u64) -> Option<Square> {
    let next = from.offset(KNIGHT_MOVES[direction as usize])?;
    (visited & (1u64 << next.index()) == 0).then_some(next)
}

/// The six alternate directions tried when a gene is illegal.
///
/// `(d+7) % 8` is deliberately absent from the scan.
fn repair_directions(d: u8) -> impl Iterator<Item = u8> {
    (1..7u8).map(move |k| (d + k) % 8)
}
