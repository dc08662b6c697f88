use crate::game_state::GameState;
use crate::move_gen::generate_legal_moves;
use crate::types::Square;

/// Perft (move path enumeration) results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    /// Positions reached at the requested depth.
    pub nodes: u64,
    /// Games that finished before or at the requested depth.
    pub finished: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.finished += other.finished;
    }
}

/// Counts move paths of exactly `depth` plies from `state`.
/// A finished game contributes nothing beyond its own depth.
pub fn perft(state: &GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(state);

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for &to in moves.iter() {
        if let Ok(new_state) = state.apply_move(to) {
            nodes += perft(&new_state, depth - 1);
        }
    }

    nodes
}

/// Per-destination breakdown of `perft`.
pub fn perft_divide(state: &GameState, depth: u8) -> Vec<(Square, u64)> {
    let moves = generate_legal_moves(state);
    let mut results = Vec::with_capacity(moves.len());

    for &to in moves.iter() {
        if let Ok(new_state) = state.apply_move(to) {
            let nodes = if depth <= 1 {
                1
            } else {
                perft(&new_state, depth - 1)
            };
            results.push((to, nodes));
        }
    }

    results
}

/// Performs perft with a count of games ending along the way.
pub fn perft_detailed(state: &GameState, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for &to in generate_legal_moves(state).iter() {
        let Ok(new_state) = state.apply_move(to) else {
            continue;
        };

        if new_state.is_finished() {
            results.finished += 1;
        }

        if depth == 1 {
            results.nodes += 1;
        } else {
            results.add(&perft_detailed(&new_state, depth - 1));
        }
    }

    results
}
