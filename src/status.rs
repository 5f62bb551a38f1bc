use std::fmt::{self, Display, Formatter};

use crate::color::Color;

/// The derived state of a game, recomputed after every committed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check(Color),
    Checkmate(Color),
    Stalemate,
}
impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate(_) | GameStatus::Stalemate)
    }
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Checkmate(winner) => Some(winner),
            _ => None,
        }
    }
}
impl Display for GameStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Ongoing => write!(f, "ongoing")?,
            GameStatus::Check(color) => write!(f, "{color} is in check")?,
            GameStatus::Checkmate(winner) => write!(f, "checkmate, {winner} wins")?,
            GameStatus::Stalemate => write!(f, "stalemate")?,
        }
        Ok(())
    }
}

/// The answer to a status query from the view: who is to move, whether the
/// game is over, and whether it ended in checkmate rather than stalemate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub side_to_move: Color,
    pub game_over: bool,
    pub is_checkmate: bool,
}
