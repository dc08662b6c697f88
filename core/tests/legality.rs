//! Property tests for move legality and state transitions.

use isolation_core::{generate_destinations, generate_legal_moves, Coord, GameState, Square};
use proptest::prelude::*;

/// Plays a game forward, choosing each move by index from `choices`.
fn play_out(choices: &[u8]) -> GameState {
    let mut state = GameState::new();
    for &choice in choices {
        let moves = generate_legal_moves(&state);
        if moves.is_empty() {
            break;
        }
        let to = moves.as_slice()[choice as usize % moves.len()];
        assert!(state.commit_move(Coord::from(to)));
    }
    state
}

fn any_state() -> impl Strategy<Value = GameState> {
    prop::collection::vec(any::<u8>(), 0..24).prop_map(|choices| play_out(&choices))
}

fn off_board_coord() -> impl Strategy<Value = Coord> {
    prop_oneof![
        (-20i8..0, -20i8..20),
        (6i8..20, -20i8..20),
        (-20i8..20, -20i8..0),
        (-20i8..20, 6i8..20),
    ]
    .prop_map(|(x, y)| Coord::new(x, y))
}

proptest! {
    #[test]
    fn off_board_destinations_are_rejected(state in any_state(), to in off_board_coord()) {
        for square in Square::all() {
            prop_assert!(!state.is_move_valid(square, to));
        }
    }

    #[test]
    fn non_queen_displacements_are_rejected(state in any_state(), from in 0u8..36, to in 0u8..36) {
        let from = Square::from_index(from).unwrap();
        let to = Square::from_index(to).unwrap();
        let dx = to.x() as i8 - from.x() as i8;
        let dy = to.y() as i8 - from.y() as i8;

        if dx != 0 && dy != 0 && dx.abs() != dy.abs() {
            prop_assert!(!state.is_move_valid(from, Coord::from(to)));
        }
        if dx == 0 && dy == 0 {
            prop_assert!(!state.is_move_valid(from, Coord::from(to)));
        }
    }

    #[test]
    fn rejected_attempts_never_mutate(state in any_state(), x in -3i8..9, y in -3i8..9) {
        let mut attempt = state.clone();
        if attempt.attempt_move(Coord::new(x, y)).is_err() {
            prop_assert_eq!(attempt, state);
        }
    }

    #[test]
    fn successful_commit_flips_turn(state in any_state(), choice in any::<u8>()) {
        let moves = generate_legal_moves(&state);
        prop_assume!(!moves.is_empty());

        let mover = state.side_to_move();
        let to = moves.as_slice()[choice as usize % moves.len()];
        let mut next = state.clone();

        prop_assert!(next.commit_move(Coord::from(to)));
        prop_assert_eq!(next.side_to_move(), mover.opponent());
        prop_assert_eq!(next.position(mover), to);
        prop_assert!(!next.board().is_empty(state.position(mover)));
        prop_assert_eq!(next.board().count_tokens(mover), 1);
    }

    #[test]
    fn generated_destinations_match_validity_scan(state in any_state(), from in 0u8..36) {
        let from = Square::from_index(from).unwrap();
        let generated: Vec<Square> = generate_destinations(state.board(), from).iter().copied().collect();
        let scanned: Vec<Square> = Square::all()
            .filter(|&to| state.is_move_valid(from, Coord::from(to)))
            .collect();
        prop_assert_eq!(generated, scanned);
    }

    #[test]
    fn finished_exactly_when_side_to_move_is_stuck(state in any_state()) {
        let stuck = generate_destinations(state.board(), state.position(state.side_to_move())).is_empty();
        prop_assert_eq!(state.is_finished(), stuck);
        if let Some(winner) = state.winner() {
            prop_assert_eq!(winner, state.side_to_move().opponent());
        }
    }

    #[test]
    fn notation_round_trips(state in any_state()) {
        let parsed = GameState::from_notation(&state.to_notation()).unwrap();
        prop_assert_eq!(parsed, state);
    }
}

#[test]
fn blocked_diagonal_scenario() {
    let mut state = GameState::new();
    // Route Player Two through (2,2) so it ends up blocked.
    assert!(state.commit_move(Coord::new(0, 5)));
    assert!(state.commit_move(Coord::new(2, 2)));
    assert!(state.commit_move(Coord::new(0, 4)));
    assert!(state.commit_move(Coord::new(2, 3)));

    let origin = Square::new(0, 0).unwrap();
    assert!(!state.board().is_empty(Square::new(2, 2).unwrap()));
    assert!(!state.is_move_valid(origin, Coord::new(4, 4)));
}
