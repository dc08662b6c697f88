use crate::evaluation::mobility_score;
use isolation_core::{
    generate_destinations, Board, Coord, GameState, MoveRejected, Player, Square,
};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, trace};

/// Plies searched below each root move by the in-game AI. Depth 4 is too
/// slow for interactive play without pruning.
pub const MAX_DEPTH: u8 = 3;

/// Sentinel score. `-INFINITY` seeds a max fold, `INFINITY` a min fold.
pub const INFINITY: i32 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Square>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
}

impl SearchLimits {
    pub fn depth(depth: u8) -> Self {
        Self { max_depth: depth }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(MAX_DEPTH)
    }
}

/// Errors from asking the engine's player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AiError {
    /// The engine's player has no legal destination and has lost.
    #[error("no legal move left, {winner} wins")]
    NoLegalMove { winner: Player },
    #[error("it is not the engine's turn")]
    NotAiTurn,
    #[error(transparent)]
    Rejected(#[from] MoveRejected),
}

/// Record of one hypothetical move, enough to reverse it exactly.
#[derive(Debug, Clone, Copy)]
struct Undo {
    player: Player,
    from: Square,
    to: Square,
}

/// Private scratch copy of the board and token positions.
///
/// Copied once per search; every hypothetical move is applied in place and
/// reversed before its siblings are tried, so the authoritative state is
/// never touched.
struct SearchBoard {
    board: Board,
    positions: [Square; 2],
    root: Player,
}

impl SearchBoard {
    fn new(state: &GameState) -> Self {
        Self {
            board: state.board().clone(),
            positions: [state.position(Player::One), state.position(Player::Two)],
            root: state.side_to_move(),
        }
    }

    fn position(&self, player: Player) -> Square {
        self.positions[player.index()]
    }

    fn apply(&mut self, player: Player, to: Square) -> Undo {
        let from = self.position(player);
        self.board.relocate(player, from, to);
        self.positions[player.index()] = to;
        Undo { player, from, to }
    }

    fn undo(&mut self, undo: Undo) {
        self.board.restore(undo.player, undo.from, undo.to);
        self.positions[undo.player.index()] = undo.from;
    }

    /// Mobility score from the searching player's side.
    fn evaluate(&self) -> i32 {
        mobility_score(&self.board, self.positions, self.root)
    }
}

struct SearchInfo {
    max_depth: u8,
    nodes: u64,
}

pub fn search(state: &GameState, depth: u8) -> SearchResult {
    search_with_limits(state, SearchLimits::depth(depth))
}

/// Finds the best destination for the side to move.
///
/// Every root destination is scored by `minimax` with the opponent to move
/// next. Ties keep the first destination in grid order. `best_move` is None
/// only when the side to move has no legal destination.
pub fn search_with_limits(state: &GameState, limits: SearchLimits) -> SearchResult {
    let start = Instant::now();
    let mut scratch = SearchBoard::new(state);
    let mut info = SearchInfo {
        max_depth: limits.max_depth,
        nodes: 0,
    };

    let root = scratch.root;
    let candidates = generate_destinations(&scratch.board, scratch.position(root));
    let mut best: Option<(i32, Square)> = None;

    for &to in candidates.iter() {
        let undo = scratch.apply(root, to);
        let score = minimax(&mut scratch, 0, false, &mut info);
        scratch.undo(undo);

        trace!(%to, score, "root move scored");

        match best {
            Some((best_score, _)) if score <= best_score => {}
            _ => best = Some((score, to)),
        }
    }

    let result = SearchResult {
        best_move: best.map(|(_, to)| to),
        score: best.map_or(-INFINITY, |(score, _)| score),
        depth: limits.max_depth,
        nodes: info.nodes,
    };

    debug!(
        player = %root,
        best_move = ?result.best_move,
        score = result.score,
        nodes = result.nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "search finished"
    );

    result
}

/// Exhaustive minimax without pruning.
///
/// `maximizing` means the searching player moves at this ply. Only the
/// searching player's own square ends the recursion early. When the opponent
/// is stuck the min fold has no candidates and returns the `INFINITY` seed,
/// so a move that boxes the opponent in scores as a certain win.
fn minimax(scratch: &mut SearchBoard, depth: u8, maximizing: bool, info: &mut SearchInfo) -> i32 {
    info.nodes += 1;

    if depth >= info.max_depth || scratch.board.is_boxed_in(scratch.position(scratch.root)) {
        return scratch.evaluate();
    }

    let mover = if maximizing {
        scratch.root
    } else {
        scratch.root.opponent()
    };

    let moves = generate_destinations(&scratch.board, scratch.position(mover));

    if maximizing {
        let mut best_score = -INFINITY;
        for &to in moves.iter() {
            let undo = scratch.apply(mover, to);
            best_score = best_score.max(minimax(scratch, depth + 1, false, info));
            scratch.undo(undo);
        }
        best_score
    } else {
        let mut best_score = INFINITY;
        for &to in moves.iter() {
            let undo = scratch.apply(mover, to);
            best_score = best_score.min(minimax(scratch, depth + 1, true, info));
            scratch.undo(undo);
        }
        best_score
    }
}

/// Picks the engine's destination at the fixed in-game depth.
/// Does not modify `state`.
pub fn choose_move(state: &GameState) -> Option<Square> {
    search(state, MAX_DEPTH).best_move
}

/// Lets the engine play Player Two's turn.
///
/// On success the chosen destination has been committed. If Player Two has
/// nowhere to go the game is ended in Player One's favour and
/// `AiError::NoLegalMove` is returned.
pub fn ai_move(state: &mut GameState) -> Result<Square, AiError> {
    if state.side_to_move() != Player::Two {
        return Err(AiError::NotAiTurn);
    }

    match choose_move(state) {
        Some(to) => {
            state.attempt_move(Coord::from(to))?;
            Ok(to)
        }
        None => {
            state.forfeit(Player::Two);
            Err(AiError::NoLegalMove {
                winner: Player::One,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use isolation_core::{generate_legal_moves, positions, GameStatus};

    fn sq(x: u8, y: u8) -> Square {
        Square::new(x, y).unwrap()
    }

    #[test]
    fn test_search_does_not_mutate_state() {
        let state = GameState::from_notation(positions::CENTRE).unwrap();
        let before = state.clone();
        let result = search(&state, MAX_DEPTH);
        assert!(result.best_move.is_some());
        assert_eq!(state, before);
    }

    #[test]
    fn test_scratch_undo_restores_exactly() {
        let state = GameState::from_notation(positions::CENTRE).unwrap();
        let mut scratch = SearchBoard::new(&state);

        let first = scratch.apply(Player::One, sq(0, 2));
        let second = scratch.apply(Player::Two, sq(5, 5));
        scratch.undo(second);
        scratch.undo(first);

        assert_eq!(&scratch.board, state.board());
        assert_eq!(scratch.position(Player::One), state.position(Player::One));
        assert_eq!(scratch.position(Player::Two), state.position(Player::Two));
    }

    #[test]
    fn test_single_legal_move_is_chosen() {
        let mut state = GameState::from_notation(positions::SINGLE_EXIT).unwrap();
        assert_eq!(choose_move(&state), Some(sq(4, 5)));
        assert_eq!(ai_move(&mut state), Ok(sq(4, 5)));
        assert_eq!(state.position(Player::Two), sq(4, 5));
        assert_eq!(state.side_to_move(), Player::One);
    }

    #[test]
    fn test_no_legal_move() {
        let mut state = GameState::from_notation(positions::BOXED_IN).unwrap();
        assert_eq!(choose_move(&state), None);
        assert_eq!(
            ai_move(&mut state),
            Err(AiError::NoLegalMove {
                winner: Player::One
            })
        );
        assert_eq!(state.status(), GameStatus::Finished { winner: Player::One });
    }

    #[test]
    fn test_not_ai_turn() {
        let mut state = GameState::new();
        assert_eq!(ai_move(&mut state), Err(AiError::NotAiTurn));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_search_is_deterministic() {
        let mut state = GameState::new();
        assert!(state.commit_move(Coord::new(1, 1)));

        let first = search(&state, MAX_DEPTH);
        let second = search(&state, MAX_DEPTH);
        assert_eq!(first, second);
        assert_eq!(choose_move(&state), first.best_move);
    }

    #[test]
    fn test_best_move_is_legal() {
        let mut state = GameState::new();
        assert!(state.commit_move(Coord::new(2, 2)));

        let best = choose_move(&state).unwrap();
        assert!(generate_legal_moves(&state).contains(best));
    }

    #[test]
    fn test_depth_zero_is_greedy_on_mobility() {
        // With no lookahead each root move is scored by the resulting
        // mobility difference alone, so the first maximum wins.
        let state = GameState::from_notation(positions::CENTRE).unwrap();
        let result = search(&state, 0);

        let mut expected: Option<(i32, Square)> = None;
        for &to in generate_legal_moves(&state).iter() {
            let next = state.apply_move(to).unwrap();
            let score = crate::Evaluatable::evaluate_for(&next, Player::One);
            if expected.map_or(true, |(best, _)| score > best) {
                expected = Some((score, to));
            }
        }

        assert_eq!(result.best_move, expected.map(|(_, to)| to));
        assert_eq!(Some(result.score), expected.map(|(score, _)| score));
    }

    #[test]
    fn test_depth_one_scores_opponent_best_reply() {
        // Player Two's only destination is (4,5), which leaves it one empty
        // neighbour at (3,4). Player One's best reply is a square with all
        // eight neighbours empty, such as (2,2), so the root scores 1 - 8.
        let state = GameState::from_notation(positions::SINGLE_EXIT).unwrap();
        let result = search(&state, 1);
        assert_eq!(result.best_move, Some(sq(4, 5)));
        assert_eq!(result.score, -7);
    }

    #[test]
    fn test_boxing_in_opponent_scores_infinity() {
        // Player One on (2,0) has a single exit at (3,0), which Player Two
        // reaches diagonally through (4,1).
        let state = GameState::from_notation(positions::CORNERED).unwrap();
        let result = search(&state, MAX_DEPTH);
        assert_eq!(result.best_move, Some(sq(3, 0)));
        assert_eq!(result.score, INFINITY);
        assert_eq!(choose_move(&state), Some(sq(3, 0)));
    }

    #[test]
    fn test_stuck_opponent_returns_min_seed() {
        let mut state = GameState::from_notation(positions::CORNERED).unwrap();
        let mut scratch = SearchBoard::new(&state);
        let mut info = SearchInfo {
            max_depth: MAX_DEPTH,
            nodes: 0,
        };

        let undo = scratch.apply(Player::Two, sq(3, 0));
        assert_eq!(minimax(&mut scratch, 0, false, &mut info), INFINITY);
        assert_eq!(info.nodes, 1);
        scratch.undo(undo);

        assert_eq!(ai_move(&mut state), Ok(sq(3, 0)));
        assert_eq!(state.winner(), Some(Player::Two));
    }

    #[test]
    fn test_node_count_grows_with_depth() {
        let state = GameState::new();
        let shallow = search(&state, 1);
        let deep = search(&state, 2);
        assert!(deep.nodes > shallow.nodes);
        assert_eq!(shallow.depth, 1);
    }
}
