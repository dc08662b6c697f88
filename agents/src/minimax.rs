use crate::{
    search::{search_with_limits, SearchLimits, MAX_DEPTH},
    Agent,
};
use isolation_core::{GameState, Square};

/// Mover backed by the fixed-depth minimax search.
pub struct MinimaxAgent {
    name: String,
    limits: SearchLimits,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            limits: SearchLimits::depth(depth),
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::new(MAX_DEPTH)
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, state: &GameState) -> Option<Square> {
        if state.is_finished() {
            return None;
        }
        search_with_limits(state, self.limits).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
