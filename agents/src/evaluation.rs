use isolation_core::{Board, GameState, Player, Square};

/// Mobility heuristic: empty neighbours of `perspective` minus those of
/// its opponent.
pub fn mobility_score(board: &Board, positions: [Square; 2], perspective: Player) -> i32 {
    let ours = board.mobility(positions[perspective.index()]);
    let theirs = board.mobility(positions[perspective.opponent().index()]);
    i32::from(ours) - i32::from(theirs)
}

/// Positions that can be scored by the mobility heuristic.
pub trait Evaluatable {
    /// Score from Player Two's side: positive favours Two, negative One.
    fn evaluate(&self) -> i32 {
        self.evaluate_for(Player::Two)
    }

    /// Score from the given player's side.
    fn evaluate_for(&self, player: Player) -> i32;
}

impl Evaluatable for GameState {
    fn evaluate_for(&self, player: Player) -> i32 {
        let positions = [self.position(Player::One), self.position(Player::Two)];
        mobility_score(self.board(), positions, player)
    }
}
