use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
    pub fn from_code(c: char) -> Option<Self> {
        let kind = match c {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(kind)
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}
impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }
    /// Decode the two-character `color kind` code used by the board
    /// snapshot, e.g. `wq` for the white queen.
    pub fn from_code(color: char, kind: char) -> Result<Self, InvalidPieceCode> {
        let parsed = match color {
            'w' => Color::White,
            'b' => Color::Black,
            _ => return Err(InvalidPieceCode(color, kind)),
        };
        let kind = PieceKind::from_code(kind).ok_or(InvalidPieceCode(color, kind))?;
        Ok(Piece::new(parsed, kind))
    }
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.code().to_ascii_uppercase(),
            Color::Black => self.kind.code(),
        }
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InvalidPieceCode(pub char, pub char);
impl Display for InvalidPieceCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found `{}{}`, expected `w` or `b` followed by one of `p`, `n`, `b`, `r`, `q`, `k`",
            self.0, self.1
        )?;
        Ok(())
    }
}
impl Error for InvalidPieceCode {}

#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        piece::{Piece, PieceKind},
    };

    #[test]
    fn code_round_trips() {
        for color in [Color::White, Color::Black] {
            for kind in [
                PieceKind::Pawn,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Rook,
                PieceKind::Queen,
                PieceKind::King,
            ] {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_code(color.code(), kind.code()), Ok(piece));
            }
        }
    }

    #[test]
    fn invalid_codes_are_rejected() {
        assert!(Piece::from_code('x', 'q').is_err());
        assert!(Piece::from_code('w', 'z').is_err());
        assert!(Piece::from_code('0', '0').is_err());
    }
}
