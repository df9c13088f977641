//! Strategy evaluation and game-tree search.
//!
//! This crate turns a compact [`genome::Genome`] into a positional
//! [`weight_matrix::WeightMatrix`], searches the game tree with it
//! ([`search::Searcher`]), and plays complete games between two matrices
//! ([`match_runner::play_match`]). The genetic algorithm in
//! `revello-training` uses match outcomes as its fitness signal.
//!
//! # Architecture
//!
//! ```text
//! Genome (10 weights)
//!     ↓ expands to
//! WeightMatrix (8x8, symmetric)
//!     ↓ scores leaves of
//! Searcher (fixed-depth minimax)
//!     ↓ picks moves for
//! play_match (full game, winner by stone count)
//! ```

pub use self::{genome::*, match_runner::*, search::*, weight_matrix::*};

pub mod genome;
pub mod match_runner;
pub mod search;
pub mod weight_matrix;
