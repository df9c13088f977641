use std::fmt;

use arrayvec::ArrayVec;

/// Side length of the board.
pub const BOARD_SIZE: usize = 8;

/// The eight ray directions a placed stone captures along.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// Scratch capacity for a ray walk: the cursor can traverse up to
// `BOARD_SIZE - 1` opponent stones from an edge cell to the far edge
// before the walk terminates (a captured run is at most `BOARD_SIZE - 2`).
const MAX_RUN: usize = BOARD_SIZE - 1;

/// One of the two stone colors. Dark moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Player {
    #[display("dark")]
    Dark,
    #[display("light")]
    Light,
}

impl Player {
    /// Returns the other side.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Player::Dark => Player::Light,
            Player::Light => Player::Dark,
        }
    }

    /// Numeric cell encoding used by evaluation: dark +1, light -1.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Player::Dark => 1.0,
            Player::Light => -1.0,
        }
    }

    fn glyph(self) -> char {
        match self {
            Player::Dark => '●',
            Player::Light => '○',
        }
    }
}

/// A cell coordinate, row then column, both in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Self { row, col }
    }

    /// Moves one cell along `direction`, or `None` when leaving the board.
    fn step(self, (row_delta, col_delta): (isize, isize)) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let col = self.col.checked_add_signed(col_delta)?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some(Self { row, col })
    }
}

/// Final result of a finished game, decided by stone count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Outcome {
    #[display("dark wins")]
    DarkWin,
    #[display("light wins")]
    LightWin,
    #[display("draw")]
    Draw,
}

/// An 8x8 Reversi position.
///
/// `Board` is a plain `Copy` value; hypothetical moves never mutate the
/// source position. `apply_move` hands back a fresh board, which is what
/// makes the recursive search's sibling branches independent for free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The standard opening position. Dark, who moves first, holds (3,4)
    /// and (4,3); light holds the other diagonal of the center square.
    pub const INITIAL: Self = {
        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        cells[3][4] = Some(Player::Dark);
        cells[4][3] = Some(Player::Dark);
        cells[3][3] = Some(Player::Light);
        cells[4][4] = Some(Player::Light);
        Self { cells }
    };

    /// Returns the stone at `position`, or `None` for an empty cell.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Player> {
        self.cells[position.row][position.col]
    }

    /// Counts `player`'s stones.
    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell == Some(player))
            .count()
    }

    fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Opponent stones captured when `player` plays `from` along one ray:
    /// a contiguous opponent run terminated by one of `player`'s own
    /// stones. The board edge or an empty cell yields no capture.
    fn captured_run(
        &self,
        player: Player,
        from: Position,
        direction: (isize, isize),
    ) -> ArrayVec<Position, MAX_RUN> {
        let mut run = ArrayVec::new();
        let mut cursor = from;
        loop {
            let Some(next) = cursor.step(direction) else {
                return ArrayVec::new();
            };
            match self.cell(next) {
                None => return ArrayVec::new(),
                Some(stone) if stone == player => return run,
                Some(_) => {
                    run.push(next);
                    cursor = next;
                }
            }
        }
    }

    fn is_legal_move(&self, player: Player, position: Position) -> bool {
        self.cell(position).is_none()
            && DIRECTIONS
                .iter()
                .any(|&direction| !self.captured_run(player, position, direction).is_empty())
    }

    /// Enumerates every legal move for `player`.
    ///
    /// A move is legal exactly when it flips at least one opposing stone;
    /// there is no other legality rule.
    #[must_use]
    pub fn available_moves(&self, player: Player) -> ArrayVec<Position, 64> {
        let mut moves = ArrayVec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let position = Position { row, col };
                if self.is_legal_move(player, position) {
                    moves.push(position);
                }
            }
        }
        moves
    }

    fn has_any_move(&self, player: Player) -> bool {
        (0..BOARD_SIZE).any(|row| {
            (0..BOARD_SIZE).any(|col| self.is_legal_move(player, Position { row, col }))
        })
    }

    /// Plays `position` for `player`, returning the resulting board.
    ///
    /// Capture scans read this (pre-move) board; flips land on the copy.
    /// Applying an illegal move places the stone and flips nothing.
    #[must_use]
    pub fn apply_move(&self, player: Player, position: Position) -> Board {
        let mut next = *self;
        next.cells[position.row][position.col] = Some(player);
        for direction in DIRECTIONS {
            for flipped in self.captured_run(player, position, direction) {
                next.cells[flipped.row][flipped.col] = Some(player);
            }
        }
        next
    }

    /// The game is over when the board is full or neither side has a
    /// legal move.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.is_full() || (!self.has_any_move(Player::Dark) && !self.has_any_move(Player::Light))
    }

    /// Result by stone count; equal counts are a draw.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        match self.count(Player::Dark).cmp(&self.count(Player::Light)) {
            std::cmp::Ordering::Greater => Outcome::DarkWin,
            std::cmp::Ordering::Less => Outcome::LightWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Builds a board from ASCII art for testing.
    /// `X` is a dark stone, `O` a light stone, `.` an empty cell.
    /// Rows are given top to bottom and must be exactly 8 cells wide.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert_eq!(
            lines.len(),
            BOARD_SIZE,
            "expected {} rows, got {}",
            BOARD_SIZE,
            lines.len()
        );

        for (row, line) in lines.iter().enumerate() {
            let stones: Vec<char> = line
                .chars()
                .filter(|c| *c == 'X' || *c == 'O' || *c == '.')
                .collect();
            assert_eq!(
                stones.len(),
                BOARD_SIZE,
                "each row must have exactly {} cells, got {} at row {}",
                BOARD_SIZE,
                stones.len(),
                row
            );
            for (col, &stone) in stones.iter().enumerate() {
                cells[row][col] = match stone {
                    'X' => Some(Player::Dark),
                    'O' => Some(Player::Light),
                    _ => None,
                };
            }
        }
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                match cell {
                    Some(player) => write!(f, "{}", player.glyph())?,
                    None => write!(f, "-")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_board() {
        let board = Board::INITIAL;
        assert_eq!(board.cell(Position::new(3, 4)), Some(Player::Dark));
        assert_eq!(board.cell(Position::new(4, 3)), Some(Player::Dark));
        assert_eq!(board.cell(Position::new(3, 3)), Some(Player::Light));
        assert_eq!(board.cell(Position::new(4, 4)), Some(Player::Light));
        assert_eq!(board.count(Player::Dark), 2);
        assert_eq!(board.count(Player::Light), 2);
        assert!(!board.is_terminal());
    }

    #[test]
    fn test_opening_moves_for_dark() {
        let moves = Board::INITIAL.available_moves(Player::Dark);
        let expected = [
            Position::new(2, 3),
            Position::new(3, 2),
            Position::new(4, 5),
            Position::new(5, 4),
        ];
        assert_eq!(moves.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_every_available_move_flips_a_stone() {
        let board = Board::INITIAL;
        for player in [Player::Dark, Player::Light] {
            for position in board.available_moves(player) {
                let next = board.apply_move(player, position);
                assert!(
                    next.count(player) >= board.count(player) + 2,
                    "move {position} for {player} must place and flip"
                );
            }
        }
    }

    #[test]
    fn test_illegal_move_flips_nothing() {
        let board = Board::INITIAL;
        // (5, 5) touches only light stones diagonally with no dark anchor.
        let position = Position::new(5, 5);
        assert!(!board.available_moves(Player::Dark).contains(&position));
        let next = board.apply_move(Player::Dark, position);
        assert_eq!(next.count(Player::Dark), board.count(Player::Dark) + 1);
        assert_eq!(next.count(Player::Light), board.count(Player::Light));
    }

    #[test]
    fn test_apply_move_flips_single_run() {
        let board = Board::INITIAL;
        let next = board.apply_move(Player::Dark, Position::new(2, 3));
        assert_eq!(next.cell(Position::new(3, 3)), Some(Player::Dark));
        assert_eq!(next.count(Player::Dark), 4);
        assert_eq!(next.count(Player::Light), 1);
    }

    #[test]
    fn test_apply_move_flips_multiple_directions() {
        let board = Board::from_ascii(
            "
            ........
            ........
            ..OOX...
            ..OX....
            ...X....
            ........
            ........
            ........
            ",
        );
        // Placing at (2, 1) captures along the row and the diagonal.
        let next = board.apply_move(Player::Dark, Position::new(2, 1));
        assert_eq!(next.cell(Position::new(2, 2)), Some(Player::Dark));
        assert_eq!(next.cell(Position::new(2, 3)), Some(Player::Dark));
        assert_eq!(next.cell(Position::new(3, 2)), Some(Player::Dark));
        assert_eq!(next.count(Player::Light), 0);
    }

    #[test]
    fn test_run_ending_at_edge_is_not_captured() {
        let board = Board::from_ascii(
            "
            OO......
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        // The opponent run hits the board edge before a dark anchor.
        assert!(!board.is_legal_move(Player::Dark, Position::new(0, 2)));
        let next = board.apply_move(Player::Dark, Position::new(0, 2));
        assert_eq!(next.count(Player::Light), 2);
    }

    #[test]
    fn test_run_ending_at_empty_cell_is_not_captured() {
        let board = Board::from_ascii(
            "
            ........
            .O.X....
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        assert!(!board.is_legal_move(Player::Dark, Position::new(1, 0)));
    }

    #[test]
    fn test_move_conservation() {
        // Play a handful of plies and check counts never move backwards.
        let mut board = Board::INITIAL;
        let mut player = Player::Dark;
        for _ in 0..8 {
            let moves = board.available_moves(player);
            let Some(&position) = moves.first() else {
                player = player.opponent();
                continue;
            };
            let next = board.apply_move(player, position);
            assert!(next.count(player) > board.count(player));
            assert!(next.count(player.opponent()) <= board.count(player.opponent()));
            board = next;
            player = player.opponent();
        }
    }

    #[test]
    fn test_terminal_when_full() {
        let board = Board::from_ascii(
            "
            XXXXXXXX
            XXXXXXXX
            XXXXXXXX
            XXXXXXXX
            OOOOOOOO
            OOOOOOOO
            OOOOOOOO
            XXXXXXXX
            ",
        );
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), Outcome::DarkWin);
    }

    #[test]
    fn test_terminal_when_neither_side_can_move() {
        // One color only: no capture is possible for either side, so the
        // game is over even though most of the board is empty.
        let board = Board::from_ascii(
            "
            XX......
            XX......
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        assert!(board.available_moves(Player::Dark).is_empty());
        assert!(board.available_moves(Player::Light).is_empty());
        assert!(board.is_terminal());
        assert_eq!(board.outcome(), Outcome::DarkWin);
    }

    #[test]
    fn test_draw_outcome() {
        let board = Board::from_ascii(
            "
            XXXXXXXX
            XXXXXXXX
            XXXXXXXX
            XXXXXXXX
            OOOOOOOO
            OOOOOOOO
            OOOOOOOO
            OOOOOOOO
            ",
        );
        assert_eq!(board.outcome(), Outcome::Draw);
    }

    #[test]
    fn test_display_glyphs() {
        let rendered = Board::INITIAL.to_string();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), BOARD_SIZE);
        assert_eq!(rows[0], "--------");
        assert_eq!(rows[3], "---○●---");
        assert_eq!(rows[4], "---●○---");
    }
}
