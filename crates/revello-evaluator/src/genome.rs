use serde::{Deserialize, Serialize};

/// Number of genes in a strategy genome.
///
/// Ten values cover one board octant; the board's 4-fold symmetry expands
/// them to all 64 cells (see [`crate::weight_matrix`]).
pub const GENOME_LEN: usize = 10;

/// A candidate strategy: ten real-valued positional weights.
///
/// The length is part of the type, so a malformed genome cannot be
/// constructed; persisted genomes serialize as a bare 10-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome {
    genes: [f64; GENOME_LEN],
}

impl Genome {
    #[must_use]
    pub const fn new(genes: [f64; GENOME_LEN]) -> Self {
        Self { genes }
    }

    /// Builds a genome by applying `f` to each gene index.
    #[must_use]
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> f64,
    {
        Self {
            genes: std::array::from_fn(f),
        }
    }

    #[must_use]
    pub fn genes(&self) -> &[f64; GENOME_LEN] {
        &self.genes
    }

    pub fn genes_mut(&mut self) -> &mut [f64; GENOME_LEN] {
        &mut self.genes
    }
}
