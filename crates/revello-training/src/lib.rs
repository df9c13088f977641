//! Genetic-algorithm training for Reversi strategy genomes.
//!
//! Fitness here is not a formula: two genomes are compared by expanding
//! them to weight matrices and playing a complete depth-limited game
//! between them (`revello-evaluator`). The trainer keeps a population of
//! genomes, selects survivors with a pairwise knockout bracket, recombines
//! them with BLX-alpha crossover, mutates, normalizes, and persists every
//! generation through the [`store::GenerationStore`] abstraction.
//!
//! # Generation cycle
//!
//! 1. Benchmark the top parent against a fixed random strategy (diagnostic)
//! 2. Crossover: parents survive verbatim, each parent pair adds 2 offspring
//! 3. Mutation: at most one mutation event per individual
//! 4. Normalization: zero-mean genes, max |gene| scaled to 100
//! 5. Selection: FIFO knockout down to the configured parent count
//! 6. Persist the generation record, then advance
//!
//! Interrupted runs resume from the highest persisted generation.

pub mod genetic;
pub mod genome;
pub mod store;
