//! Property tests for the search over positions reached by random play.

use isolation_agents::{search, Evaluatable};
use isolation_core::{generate_legal_moves, Coord, GameState};
use proptest::prelude::*;

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

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn search_returns_legal_move_and_leaves_state(choices in prop::collection::vec(any::<u8>(), 0..16), depth in 0u8..3) {
        let state = play_out(&choices);
        let before = state.clone();
        let result = search(&state, depth);

        prop_assert_eq!(&state, &before);
        let moves = generate_legal_moves(&state);
        match result.best_move {
            Some(to) => prop_assert!(moves.contains(to)),
            None => prop_assert!(moves.is_empty()),
        }
    }

    #[test]
    fn repeated_searches_agree(choices in prop::collection::vec(any::<u8>(), 0..16)) {
        let state = play_out(&choices);
        prop_assert_eq!(search(&state, 2), search(&state, 2));
    }

    #[test]
    fn evaluation_is_antisymmetric(choices in prop::collection::vec(any::<u8>(), 0..24)) {
        let state = play_out(&choices);
        prop_assert_eq!(state.evaluate(), -state.evaluate_for(isolation_core::Player::One));
    }
}
