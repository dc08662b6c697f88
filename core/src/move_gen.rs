use crate::board::Board;
use crate::game_state::GameState;
use crate::types::{Player, Square, DIRECTIONS};

/// Upper bound on queen destinations from any square of a 6x6 board.
const MAX_DESTINATIONS: usize = 32;

/// A list of destination squares with a fixed capacity to avoid allocations.
#[derive(Clone, Copy, Debug)]
pub struct MoveList {
    squares: [Square; MAX_DESTINATIONS],
    count: usize,
}

impl MoveList {
    /// Creates an empty move list.
    pub const fn new() -> Self {
        Self {
            squares: [Player::One.start_square(); MAX_DESTINATIONS],
            count: 0,
        }
    }

    /// Adds a destination to the list.
    pub fn push(&mut self, square: Square) {
        debug_assert!(self.count < MAX_DESTINATIONS, "Move list overflow");
        self.squares[self.count] = square;
        self.count += 1;
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Square> {
        self.squares[..self.count].iter()
    }

    pub fn as_slice(&self) -> &[Square] {
        &self.squares[..self.count]
    }

    pub fn contains(&self, square: Square) -> bool {
        self.as_slice().contains(&square)
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    fn sort(&mut self) {
        self.squares[..self.count].sort_unstable();
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates every legal destination for a token on `from`.
///
/// Walks the eight rays until the first non-empty cell or the edge. The
/// result is in ascending square order, the same order as scanning the
/// grid x-major and testing `Board::is_move_valid` on every cell.
pub fn generate_destinations(board: &Board, from: Square) -> MoveList {
    let mut moves = MoveList::new();

    for &(dx, dy) in &DIRECTIONS {
        let mut current = from;
        while let Some(next) = current.offset(dx, dy) {
            if !board.is_empty(next) {
                break;
            }
            moves.push(next);
            current = next;
        }
    }

    moves.sort();
    moves
}

/// Generates every legal destination for the side to move.
/// Empty once the game is finished.
pub fn generate_legal_moves(state: &GameState) -> MoveList {
    if state.is_finished() {
        return MoveList::new();
    }
    generate_destinations(state.board(), state.position(state.side_to_move()))
}
