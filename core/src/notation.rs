use crate::board::Board;
use crate::game_state::GameState;
use crate::types::{Cell, Player, Square, BOARD_SIZE};
use std::fmt;
use thiserror::Error;

/// Compact text notation for positions.
///
/// Six rows (x = 0 first) of six cells each, separated by '/', then a space
/// and the side to move. Cells are '.' empty, '#' blocked, '1' or '2' tokens.
/// Starting position: "1...../....../....../....../....../.....2 1"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid notation format: {0}")]
    InvalidFormat(String),
    #[error("invalid cell character: '{0}'")]
    InvalidCell(char),
    #[error("invalid side to move: {0}")]
    InvalidSide(String),
    #[error("expected exactly one token for {player}, found {count}")]
    TokenCount { player: Player, count: usize },
}

impl GameState {
    /// Parses a position. The status is derived: the game is finished if the
    /// side to move is already boxed in.
    pub fn from_notation(notation: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = notation.split_whitespace().collect();

        if parts.len() != 2 {
            return Err(NotationError::InvalidFormat(format!(
                "Expected 2 fields, got {}",
                parts.len()
            )));
        }

        let board = parse_board(parts[0])?;

        let turn = match parts[1] {
            "1" => Player::One,
            "2" => Player::Two,
            other => return Err(NotationError::InvalidSide(other.to_string())),
        };

        let mut positions = [Player::One.start_square(), Player::Two.start_square()];
        for player in Player::ALL {
            let count = board.count_tokens(player);
            match board.find_player(player) {
                Some(square) if count == 1 => positions[player.index()] = square,
                _ => return Err(NotationError::TokenCount { player, count }),
            }
        }

        Ok(GameState::from_parts(board, positions, turn))
    }

    /// Converts the position to notation.
    pub fn to_notation(&self) -> String {
        format!(
            "{} {}",
            board_to_notation(self.board()),
            self.side_to_move().to_char()
        )
    }
}

/// Parses the board portion of the notation.
fn parse_board(board_str: &str) -> Result<Board, NotationError> {
    let rows: Vec<&str> = board_str.split('/').collect();

    if rows.len() != BOARD_SIZE as usize {
        return Err(NotationError::InvalidFormat(format!(
            "Expected {} rows, got {}",
            BOARD_SIZE,
            rows.len()
        )));
    }

    let mut board = Board::empty();

    for (x, row) in rows.iter().enumerate() {
        let cells: Vec<char> = row.chars().collect();
        if cells.len() != BOARD_SIZE as usize {
            return Err(NotationError::InvalidFormat(format!(
                "Row {} has {} cells, expected {}",
                x,
                cells.len(),
                BOARD_SIZE
            )));
        }

        for (y, &ch) in cells.iter().enumerate() {
            let cell = Cell::from_char(ch).ok_or(NotationError::InvalidCell(ch))?;
            if let Some(square) = Square::new(x as u8, y as u8) {
                board.set_cell(square, cell);
            }
        }
    }

    Ok(board)
}

fn board_to_notation(board: &Board) -> String {
    let mut out = String::with_capacity(42);

    for x in 0..BOARD_SIZE {
        if x > 0 {
            out.push('/');
        }
        for y in 0..BOARD_SIZE {
            if let Some(square) = Square::new(x, y) {
                out.push(board.cell(square).to_char());
            }
        }
    }

    out
}

/// Renders the board as a grid with coordinates, x down and y across.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for y in 0..BOARD_SIZE {
            write!(f, " {}", y)?;
        }
        writeln!(f)?;

        for x in 0..BOARD_SIZE {
            write!(f, "{} ", x)?;
            for y in 0..BOARD_SIZE {
                if let Some(square) = Square::new(x, y) {
                    write!(f, " {}", self.cell(square).to_char())?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Reference positions used by tests and the command line.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "1...../....../....../....../....../.....2 1";

    /// Mid-game position with both tokens in the centre.
    pub const CENTRE: &str = "#...../.#..#./..1.../...2#./.#..../...... 1";

    /// Player Two, to move, has exactly one legal destination: (4,5).
    pub const SINGLE_EXIT: &str = "1...../....../....../.....#/....#./....#2 2";

    /// Player Two, to move, can take Player One's only exit at (3,0).
    pub const CORNERED: &str = "###.../####../1#..../.###.#/..##../..2..# 2";

    /// Player Two, to move, is walled into its corner.
    pub const BOXED_IN: &str = "1...../....../....../....../....##/....#2 2";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_starting_position() {
        let state = GameState::from_notation(positions::STARTING).unwrap();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_round_trip() {
        for notation in [positions::STARTING, positions::CENTRE, positions::CORNERED] {
            let state = GameState::from_notation(notation).unwrap();
            assert_eq!(state.to_notation(), notation);
        }
    }

    #[test]
    fn test_parse_tracks_positions() {
        let state = GameState::from_notation(positions::CENTRE).unwrap();
        assert_eq!(state.position(Player::One), Square::new(2, 2).unwrap());
        assert_eq!(state.position(Player::Two), Square::new(3, 3).unwrap());
        assert_eq!(state.side_to_move(), Player::One);
        assert_eq!(state.board().count_blocked(), 5);
    }

    #[test]
    fn test_notation_after_move() {
        let mut state = GameState::new();
        assert!(state.commit_move(crate::types::Coord::new(1, 1)));
        assert_eq!(
            state.to_notation(),
            "#...../.1..../....../....../....../.....2 2"
        );
    }

    #[test]
    fn test_invalid_notation() {
        assert!(matches!(
            GameState::from_notation("invalid"),
            Err(NotationError::InvalidFormat(_))
        ));
        assert!(matches!(
            GameState::from_notation("1...../....../.....2 1"),
            Err(NotationError::InvalidFormat(_))
        ));
        assert_eq!(
            GameState::from_notation("1..x../....../....../....../....../.....2 1"),
            Err(NotationError::InvalidCell('x'))
        );
        assert!(matches!(
            GameState::from_notation("1...../....../....../....../....../.....2 3"),
            Err(NotationError::InvalidSide(_))
        ));
        assert_eq!(
            GameState::from_notation("1...../....../....../....../....../...... 1"),
            Err(NotationError::TokenCount {
                player: Player::Two,
                count: 0
            })
        );
        assert_eq!(
            GameState::from_notation("11..../....../....../....../....../.....2 1"),
            Err(NotationError::TokenCount {
                player: Player::One,
                count: 2
            })
        );
    }

    #[test]
    fn test_display_grid() {
        let rendered = GameState::new().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "   0 1 2 3 4 5");
        assert_eq!(lines[1], "0  1 . . . . .");
        assert_eq!(lines[6], "5  . . . . . 2");
    }
}
