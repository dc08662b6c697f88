pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use isolation_core::{Coord, GameState, MoveRejected, Square};

/// A source of moves for one side.
///
/// The engine never knows which mover produced a destination; drivers ask
/// an agent for a square and commit it through `GameState`.
pub trait Agent {
    /// Choose a destination for the side to move, or None if it has none.
    fn best_move(&mut self, state: &GameState) -> Option<Square>;

    fn name(&self) -> &str;
}

/// Asks `agent` for a destination and commits it.
///
/// Returns Ok(None) when the agent has nothing to play; the game is then
/// ended against the side to move.
pub fn play_turn<A: Agent + ?Sized>(
    agent: &mut A,
    state: &mut GameState,
) -> Result<Option<Square>, MoveRejected> {
    if state.is_finished() {
        return Err(MoveRejected::GameOver);
    }

    match agent.best_move(state) {
        Some(to) => {
            state.attempt_move(Coord::from(to))?;
            Ok(Some(to))
        }
        None => {
            state.forfeit(state.side_to_move());
            Ok(None)
        }
    }
}

pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;
