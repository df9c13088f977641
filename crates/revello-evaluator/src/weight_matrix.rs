//! Expansion of a 10-gene genome into a symmetric 8x8 positional weight
//! matrix, plus the static evaluation built on it.
//!
//! Reversi positions are symmetric under horizontal and vertical mirroring
//! and under transposition, so only one octant of the board carries
//! independent weights. The ten genes number the upper triangle of the
//! top-left quadrant:
//!
//! ```text
//! 0 1 2 3
//! 1 4 5 6
//! 2 5 7 8
//! 3 6 8 9
//! ```
//!
//! and every cell folds into that triangle, giving the full pattern
//! `0 1 2 3 3 2 1 0 / 1 4 5 6 6 5 4 1 / ...` mirrored on both axes.

use revello_engine::{BOARD_SIZE, Board, Player, Position};

use crate::genome::Genome;

/// Start of each upper-triangle row in the gene numbering.
const TRIANGLE_OFFSET: [usize; BOARD_SIZE / 2] = [0, 4, 7, 9];

/// Maps a board cell to its gene index under the 8-fold symmetry.
fn gene_index(row: usize, col: usize) -> usize {
    let row = row.min(BOARD_SIZE - 1 - row);
    let col = col.min(BOARD_SIZE - 1 - col);
    let (low, high) = if row <= col { (row, col) } else { (col, row) };
    TRIANGLE_OFFSET[low] + (high - low)
}

/// Positional weights for every board cell, derived from a genome.
///
/// Building the matrix is a pure function: structurally equal genomes
/// always expand to identical matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightMatrix {
    weights: [[f64; BOARD_SIZE]; BOARD_SIZE],
}

impl WeightMatrix {
    #[must_use]
    pub fn from_genome(genome: &Genome) -> Self {
        let genes = genome.genes();
        let weights =
            std::array::from_fn(|row| std::array::from_fn(|col| genes[gene_index(row, col)]));
        Self { weights }
    }

    #[must_use]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        self.weights[row][col]
    }

    /// Static evaluation of `board` from `viewpoint`'s perspective.
    ///
    /// Each cell contributes its weight times the stone encoding (dark +1,
    /// light -1, empty 0); the sum is flipped so a favorable position for
    /// `viewpoint` always scores positive.
    #[must_use]
    pub fn evaluate(&self, board: &Board, viewpoint: Player) -> f64 {
        let mut sum = 0.0;
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(stone) = board.cell(Position { row, col }) {
                    sum += self.weights[row][col] * stone.sign();
                }
            }
        }
        sum * viewpoint.sign()
    }
}
