/// Array-based board representation and the movement rules that only
/// depend on cell contents.
use crate::types::*;
use thiserror::Error;

/// Reasons a move is refused.
/// A rejection never mutates any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("the game is already over")]
    GameOver,
    #[error("destination {0} is off the board")]
    OutOfBounds(Coord),
    #[error("destination {0} is not empty")]
    Occupied(Square),
    #[error("{0} is not a straight or diagonal line")]
    NotQueenLine(Move),
    #[error("path {0} is obstructed")]
    PathBlocked(Move),
}

/// 6x6 grid of cells, indexed by `Square::index()`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Creates the starting layout: Player One at (0,0), Player Two at (5,5).
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for player in Player::ALL {
            board.set_cell(player.start_square(), Cell::Occupied(player));
        }
        board
    }

    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square.index() as usize]
    }

    pub fn set_cell(&mut self, square: Square, cell: Cell) {
        self.cells[square.index() as usize] = cell;
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.cell(square).is_empty()
    }

    /// Finds the square holding the given player's token by scanning.
    pub fn find_player(&self, player: Player) -> Option<Square> {
        Square::all().find(|&sq| self.cell(sq) == Cell::Occupied(player))
    }

    /// Counts occupied cells for the given player.
    pub fn count_tokens(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Occupied(player))
            .count()
    }

    /// Counts blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Blocked).count()
    }

    /// Checks a queen move from `from` to `to` against the movement rules.
    ///
    /// Rules are applied in order: bounds, empty destination, straight or
    /// diagonal line with non-zero length, and every cell strictly between
    /// the endpoints empty. Blocked cells obstruct just like tokens.
    pub fn check_move(&self, from: Square, to: Coord) -> Result<Square, MoveRejected> {
        let dest = to.to_square().ok_or(MoveRejected::OutOfBounds(to))?;

        if !self.is_empty(dest) {
            return Err(MoveRejected::Occupied(dest));
        }

        let mv = Move::new(from, dest);
        let dx = dest.x() as i8 - from.x() as i8;
        let dy = dest.y() as i8 - from.y() as i8;

        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            return Err(MoveRejected::NotQueenLine(mv));
        }
        if dx == 0 && dy == 0 {
            return Err(MoveRejected::NotQueenLine(mv));
        }

        let step_x = dx.signum();
        let step_y = dy.signum();
        let steps = dx.abs().max(dy.abs());

        let origin = Coord::from(from);
        for step in 1..steps {
            let between = origin.offset(step * step_x, step * step_y);
            // Intermediate cells are always on the board for an in-bounds line.
            if let Some(sq) = between.to_square() {
                if !self.is_empty(sq) {
                    return Err(MoveRejected::PathBlocked(mv));
                }
            }
        }

        Ok(dest)
    }

    /// Pure legality predicate.
    pub fn is_move_valid(&self, from: Square, to: Coord) -> bool {
        self.check_move(from, to).is_ok()
    }

    /// Number of empty in-bounds cells at distance one.
    pub fn mobility(&self, square: Square) -> u8 {
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| square.offset(dx, dy))
            .filter(|&sq| self.is_empty(sq))
            .count() as u8
    }

    /// True when none of the eight neighbours is an empty in-bounds cell.
    ///
    /// Every queen move passes through an adjacent cell first, so this is
    /// exactly "has no legal move".
    pub fn is_boxed_in(&self, square: Square) -> bool {
        self.mobility(square) == 0
    }

    /// Moves `player`'s token, blocking the vacated cell.
    /// Does NOT check legality; the caller validates first.
    pub fn relocate(&mut self, player: Player, from: Square, to: Square) {
        debug_assert_eq!(self.cell(from), Cell::Occupied(player));
        debug_assert!(self.is_empty(to));
        self.set_cell(from, Cell::Blocked);
        self.set_cell(to, Cell::Occupied(player));
    }

    /// Exact inverse of `relocate` with the same arguments.
    pub fn restore(&mut self, player: Player, from: Square, to: Square) {
        debug_assert_eq!(self.cell(from), Cell::Blocked);
        debug_assert_eq!(self.cell(to), Cell::Occupied(player));
        self.set_cell(to, Cell::Empty);
        self.set_cell(from, Cell::Occupied(player));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
