//! Complete games between two weight matrices.
//!
//! [`play_match`] alternates fixed-depth searches for each side until the
//! board is terminal, then judges the winner by stone count. The loop is
//! fully deterministic: the same matrices and depth always produce the
//! same game. Observers receive every move, pass, and the final position,
//! which is how the human-observation mode renders a game without the
//! engine knowing anything about output.

use revello_engine::{Board, Outcome, Player, Position};

use crate::{search::Searcher, weight_matrix::WeightMatrix};

/// Receives match events; the display sink for observed games.
///
/// All hooks default to no-ops, and `()` implements the trait for silent
/// matches.
pub trait MatchObserver {
    /// A move was played; `board` is the position after the move.
    fn on_move(&mut self, _board: &Board, _mover: Player, _position: Position, _score: f64) {}

    /// The side to move had no legal move and passed.
    fn on_pass(&mut self, _board: &Board, _player: Player) {}

    /// The game reached a terminal position.
    fn on_finish(&mut self, _board: &Board, _outcome: Outcome) {}
}

impl MatchObserver for () {}

/// Plays one full game, dark moving first.
///
/// Each turn runs a fixed-depth search for the side to move; a side with
/// no legal move passes without touching the board. The winner is decided
/// by final stone count alone.
pub fn play_match(
    dark: &WeightMatrix,
    light: &WeightMatrix,
    depth: u32,
    observer: &mut dyn MatchObserver,
) -> Outcome {
    let mut board = Board::INITIAL;
    let mut to_move = Player::Dark;
    while !board.is_terminal() {
        let weights = match to_move {
            Player::Dark => dark,
            Player::Light => light,
        };
        let searcher = Searcher::new(weights, depth);
        match searcher.best_move(&board, to_move) {
            Some((score, position)) => {
                board = board.apply_move(to_move, position);
                observer.on_move(&board, to_move, position, score);
            }
            None => observer.on_pass(&board, to_move),
        }
        to_move = to_move.opponent();
    }
    let outcome = board.outcome();
    observer.on_finish(&board, outcome);
    outcome
}
