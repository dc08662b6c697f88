use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side length of the board.
pub const BOARD_SIZE: u8 = 6;

/// Total number of squares on the board.
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// The eight queen directions at distance one, as (dx, dy).
pub const DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// Represents one of the two players.
/// Player One is conventionally the human, Player Two the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// Returns the other player.
    pub const fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the index used for per-player arrays (0 or 1).
    pub const fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// Returns the square this player's token starts on.
    pub const fn start_square(self) -> Square {
        match self {
            Player::One => Square(0),
            Player::Two => Square(NUM_SQUARES as u8 - 1),
        }
    }

    /// Returns the notation character for this player ('1' or '2').
    pub const fn to_char(self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }

    /// Parses a player from its notation character.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Player::One),
            '2' => Some(Player::Two),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.to_char())
    }
}

/// Contents of a single cell.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    /// Vacated by a token; unusable for the rest of the game.
    Blocked,
    Occupied(Player),
}

impl Cell {
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub const fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Blocked => '#',
            Cell::Occupied(player) => player.to_char(),
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Blocked),
            _ => match Player::from_char(c) {
                Some(player) => Some(Cell::Occupied(player)),
                None => None,
            },
        }
    }
}

/// An unvalidated grid coordinate.
/// Destinations coming from a driver may lie outside the board, so
/// validation takes a `Coord` and only then narrows it to a `Square`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by (dx, dy).
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub const fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE as i8 && self.y >= 0 && self.y < BOARD_SIZE as i8
    }

    /// Narrows to a square, or None if off the board.
    pub const fn to_square(self) -> Option<Square> {
        if self.in_bounds() {
            Some(Square(self.x as u8 * BOARD_SIZE + self.y as u8))
        } else {
            None
        }
    }
}

impl From<Square> for Coord {
    fn from(square: Square) -> Self {
        Coord::new(square.x() as i8, square.y() as i8)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square on the board.
/// Index is `x * 6 + y`, so ascending index order is x-major grid order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from its two grid coordinates.
    /// Returns None if either coordinate is out of range.
    pub const fn new(x: u8, y: u8) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Square(x * BOARD_SIZE + y))
        } else {
            None
        }
    }

    /// Creates a square from index (0-35).
    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < NUM_SQUARES {
            Some(Square(index))
        } else {
            None
        }
    }

    pub const fn x(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    pub const fn y(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Iterates over every square in x-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES as u8).map(Square)
    }

    /// Returns the in-bounds neighbour in direction (dx, dy), if any.
    pub const fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        Coord::new(self.x() as i8 + dx, self.y() as i8 + dy).to_square()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("expected two coordinates like \"3 4\" or \"3,4\", got {0:?}")]
    InvalidFormat(String),
    #[error("invalid coordinate: {0:?}")]
    InvalidNumber(String),
    #[error("coordinate out of range 0-5: {0:?}")]
    OutOfRange(String),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Accepts "x y", "x,y" and "(x, y)".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        if parts.len() != 2 {
            return Err(ParseSquareError::InvalidFormat(s.to_string()));
        }

        let x: u8 = parts[0]
            .parse()
            .map_err(|_| ParseSquareError::InvalidNumber(parts[0].to_string()))?;
        let y: u8 = parts[1]
            .parse()
            .map_err(|_| ParseSquareError::InvalidNumber(parts[1].to_string()))?;

        Square::new(x, y).ok_or_else(|| ParseSquareError::OutOfRange(s.to_string()))
    }
}

/// A move of one token.
/// Only used transiently, as input to validation and in search output.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
