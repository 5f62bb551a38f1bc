use std::fmt::{self, Display, Formatter};

use crate::{
    color::Color,
    coord::{Direction, Square, home_rank},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}
impl CastleSide {
    pub const ALL: [Self; 2] = [CastleSide::Kingside, CastleSide::Queenside];

    /// The direction from the king's home square toward the castling rook.
    pub fn direction(self) -> Direction {
        match self {
            CastleSide::Kingside => Direction::East,
            CastleSide::Queenside => Direction::West,
        }
    }
    pub fn rook_home(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        };
        Square::new(file, home_rank(color))
    }
    pub fn king_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        };
        Square::new(file, home_rank(color))
    }
    pub fn rook_target(self, color: Color) -> Square {
        let file = match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        };
        Square::new(file, home_rank(color))
    }
}
impl Display for CastleSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastleSide::Kingside => write!(f, "kingside")?,
            CastleSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}

pub fn king_home(color: Color) -> Square {
    Square::new(4, home_rank(color))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SideRights {
    kingside: bool,
    queenside: bool,
}
impl SideRights {
    fn get(self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }
    fn get_mut(&mut self, side: CastleSide) -> &mut bool {
        match side {
            CastleSide::Kingside => &mut self.kingside,
            CastleSide::Queenside => &mut self.queenside,
        }
    }
}

/// Which castling moves each color may still perform. Rights are only ever
/// revoked, never restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    white: SideRights,
    black: SideRights,
}
impl CastlingRights {
    pub fn all() -> Self {
        let both = SideRights {
            kingside: true,
            queenside: true,
        };
        CastlingRights {
            white: both,
            black: both,
        }
    }
    pub fn none() -> Self {
        let neither = SideRights {
            kingside: false,
            queenside: false,
        };
        CastlingRights {
            white: neither,
            black: neither,
        }
    }
    fn rights(&self, color: Color) -> &SideRights {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
    fn rights_mut(&mut self, color: Color) -> &mut SideRights {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
    pub fn allows(&self, color: Color, side: CastleSide) -> bool {
        self.rights(color).get(side)
    }
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        *self.rights_mut(color).get_mut(side) = true;
    }
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        *self.rights_mut(color).get_mut(side) = false;
    }
    pub fn revoke_both(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
    }
}
