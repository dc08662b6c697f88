//! Complete game state: board, token positions, turn and outcome.
//! This module provides the main interface for driving a game.
use crate::board::{Board, MoveRejected};
use crate::types::*;
use tracing::{debug, info};

/// Whether the game is still being played.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum GameStatus {
    InProgress,
    Finished { winner: Player },
}

/// Complete state of a game.
///
/// Token positions are tracked alongside the board for constant-time lookup
/// and are kept consistent with it by every mutation.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GameState {
    board: Board,
    positions: [Square; 2],
    turn: Player,
    status: GameStatus,
}

impl GameState {
    /// Creates a new game: Player One on (0,0), Player Two on (5,5),
    /// Player One to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting_position(),
            positions: [Player::One.start_square(), Player::Two.start_square()],
            turn: Player::One,
            status: GameStatus::InProgress,
        }
    }

    /// Builds a state from parts, deriving the status from the side to move.
    /// Callers guarantee that `positions` match the tokens on `board`.
    pub(crate) fn from_parts(board: Board, positions: [Square; 2], turn: Player) -> Self {
        let mut state = Self {
            board,
            positions,
            turn,
            status: GameStatus::InProgress,
        };
        state.update_status();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, square: Square) -> Cell {
        self.board.cell(square)
    }

    /// Returns the square the given player's token is on.
    pub fn position(&self, player: Player) -> Square {
        self.positions[player.index()]
    }

    pub fn side_to_move(&self) -> Player {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<Player> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    /// Returns true if `to` is a legal destination for a token on `from`.
    pub fn is_move_valid(&self, from: Square, to: Coord) -> bool {
        self.board.is_move_valid(from, to)
    }

    /// Returns true if the token on `position` has no empty neighbour.
    pub fn is_terminal_for(&self, position: Square) -> bool {
        self.board.is_boxed_in(position)
    }

    /// Validates a move of the side to move without applying it.
    pub fn check_move(&self, to: Coord) -> Result<Square, MoveRejected> {
        if self.is_finished() {
            return Err(MoveRejected::GameOver);
        }
        self.board.check_move(self.position(self.turn), to)
    }

    /// Moves the side to move's token to `to`.
    ///
    /// On success the vacated square is blocked, the turn passes to the other
    /// player, and the game finishes if that player is boxed in. On failure
    /// nothing changes.
    pub fn attempt_move(&mut self, to: Coord) -> Result<(), MoveRejected> {
        let dest = self.check_move(to)?;
        let mover = self.turn;
        let from = self.position(mover);

        self.board.relocate(mover, from, dest);
        self.positions[mover.index()] = dest;
        self.turn = mover.opponent();
        debug!(player = %mover, %from, to = %dest, "move committed");

        self.update_status();
        Ok(())
    }

    /// Boolean form of `attempt_move`.
    pub fn commit_move(&mut self, to: Coord) -> bool {
        self.attempt_move(to).is_ok()
    }

    /// Applies a move to a copy of the state, leaving `self` untouched.
    pub fn apply_move(&self, to: Square) -> Result<Self, MoveRejected> {
        let mut new_state = self.clone();
        new_state.attempt_move(Coord::from(to))?;
        Ok(new_state)
    }

    /// Ends the game because `loser` has no legal move.
    ///
    /// Used when a mover discovers it cannot move before the engine has
    /// noticed, e.g. an agent asked to play from a hand-built position.
    pub fn forfeit(&mut self, loser: Player) {
        if self.is_finished() {
            return;
        }
        let winner = loser.opponent();
        self.status = GameStatus::Finished { winner };
        info!(%winner, "game over, {} cannot move", loser);
    }

    fn update_status(&mut self) {
        if self.status == GameStatus::InProgress && self.is_terminal_for(self.position(self.turn)) {
            let winner = self.turn.opponent();
            self.status = GameStatus::Finished { winner };
            info!(%winner, "game over, {} is boxed in", self.turn);
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts a new game in the fixed initial layout.
pub fn new_game() -> GameState {
    GameState::new()
}
