//! Reversi rules engine: board representation, legal-move enumeration,
//! move application, and terminal judgment.
//!
//! The engine is deterministic and free of I/O. Evaluation and search live
//! in `revello-evaluator`; this crate only knows how the game is played.

pub use self::board::*;

pub mod board;
