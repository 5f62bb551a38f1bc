use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseSquareError {
    InvalidFile(char),
    InvalidRank(char),
    NotEnoughCharacters(u8),
    Unexpected(char),
}
impl Display for ParseSquareError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParseSquareError::InvalidFile(file) => write!(
                f,
                "found `{file}`, characters from `a` to `h` were expected instead"
            )?,
            ParseSquareError::InvalidRank(rank) => write!(
                f,
                "found `{rank}`, characters from `1` to `8` were expected instead"
            )?,
            ParseSquareError::NotEnoughCharacters(len) => write!(
                f,
                "provided string have length of {len} characters, 2 were expected"
            )?,
            ParseSquareError::Unexpected(c) => write!(f, "unexpected `{c}`")?,
        }
        Ok(())
    }
}
impl Error for ParseSquareError {}

/// A coordinate on the 8×8 board. File 0 is the a-file, rank 0 is rank 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    file: u8,
    rank: u8,
}
impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8);
        debug_assert!(rank < 8);
        Square { file, rank }
    }
    pub fn new_checked(file: u8, rank: u8) -> Option<Self> {
        if file >= 8 || rank >= 8 {
            None
        } else {
            Some(Square::new(file, rank))
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseSquareError> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseSquareError::InvalidFile(file)),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return Err(ParseSquareError::InvalidRank(rank)),
        };
        Ok(Square::new(file, rank))
    }
    pub fn file(self) -> u8 {
        self.file
    }
    pub fn rank(self) -> u8 {
        self.rank
    }
    /// The adjacent square in the given compass direction, or `None` past
    /// the edge of the board. Never wraps.
    pub fn step(self, direction: Direction) -> Option<Self> {
        let (file, rank) = direction.delta();
        self.offset(file, rank)
    }
    pub fn offset(self, file: i8, rank: i8) -> Option<Self> {
        Square::new_checked(
            self.file.checked_add_signed(file)?,
            self.rank.checked_add_signed(rank)?,
        )
    }
    fn index(self) -> u8 {
        self.rank * 8 + self.file
    }
}
impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let file = (self.file + b'a') as char;
        let rank = self.rank + 1;
        write!(f, "{file}{rank}")?;
        Ok(())
    }
}
impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacters(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseSquareError::NotEnoughCharacters(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseSquareError::Unexpected(c));
        }
        Square::from_chars(file, rank)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}
impl Direction {
    pub const ALL: [Self; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];
    pub const ROOK: [Self; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
    pub const BISHOP: [Self; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }
    /// The direction a pawn of this color advances.
    pub fn forward(color: Color) -> Self {
        match color {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        }
    }
    /// The two diagonal-forward directions a pawn of this color attacks,
    /// whether or not the squares are occupied.
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        match color {
            Color::White => [Direction::NorthWest, Direction::NorthEast],
            Color::Black => [Direction::SouthWest, Direction::SouthEast],
        }
    }
}

pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}
pub fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// A set of squares backed by a 64-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);
impl SquareSet {
    pub fn new() -> Self {
        SquareSet(0)
    }
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }
    pub fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
impl FromIterator<Square> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut set = SquareSet::new();
        for square in iter {
            set.insert(square);
        }
        set
    }
}

#[cfg(test)]
mod test {
    use crate::coord::{Direction, ParseSquareError, Square, SquareSet};

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn stepping_off_the_board_yields_none() {
        assert_eq!(sq("a1").step(Direction::West), None);
        assert_eq!(sq("a1").step(Direction::South), None);
        assert_eq!(sq("h8").step(Direction::NorthEast), None);
        assert_eq!(sq("a8").step(Direction::NorthWest), None);
        assert_eq!(sq("e4").step(Direction::North), Some(sq("e5")));
    }

    #[test]
    fn offset_never_wraps() {
        assert_eq!(sq("a4").offset(-1, 0), None);
        assert_eq!(sq("h4").offset(1, 0), None);
        assert_eq!(sq("b1").offset(-1, -2), None);
        assert_eq!(sq("g5").offset(1, 2), Some(sq("h7")));
    }

    #[test]
    fn parse_rejects_malformed_squares() {
        assert_eq!("i3".parse::<Square>(), Err(ParseSquareError::InvalidFile('i')));
        assert_eq!("a9".parse::<Square>(), Err(ParseSquareError::InvalidRank('9')));
        assert_eq!(
            "e".parse::<Square>(),
            Err(ParseSquareError::NotEnoughCharacters(1))
        );
        assert_eq!("e44".parse::<Square>(), Err(ParseSquareError::Unexpected('4')));
    }

    #[test]
    fn square_display_round_trips() {
        for s in ["a1", "h8", "e4", "c7"] {
            assert_eq!(sq(s).to_string(), s);
        }
    }

    #[test]
    fn square_set_membership() {
        let set: SquareSet = [sq("e4"), sq("a1")].into_iter().collect();
        assert!(set.contains(sq("e4")));
        assert!(set.contains(sq("a1")));
        assert!(!set.contains(sq("e5")));
        assert!(!set.is_empty());
    }
}
