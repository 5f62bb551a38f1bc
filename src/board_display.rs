use std::fmt::{self, Display, Formatter};

use crate::{board::Board, color::Color, coord::Square, piece::Piece};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

/// Renders a board to the terminal with ANSI colors, oriented for `view`,
/// with `highlighted` squares marked and `info` lines flowing beside the
/// ranks.
pub struct BoardDisplay<'a, 'b> {
    pub board: &'a Board,
    pub view: Color,
    pub highlighted: &'a [Square],
    pub info: &'b str,
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut lines = self.info.lines().fuse();
        for rank in 0..8 {
            let rank = match self.view {
                Color::White => 7 - rank,
                Color::Black => rank,
            };
            for file in 0..8 {
                let file = match self.view {
                    Color::White => file,
                    Color::Black => 7 - file,
                };
                let square = Square::new(file, rank);
                let color = if self.highlighted.contains(&square) {
                    HIGHLIGHTED
                } else if (file + rank) % 2 == 0 {
                    BLACK
                } else {
                    WHITE
                };
                let figurine = self.board[square].map_or(' ', Piece::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", rank + 1)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        match self.view {
            Color::White => write!(f, "a b c d e f g h")?,
            Color::Black => write!(f, "h g f e d c b a")?,
        }
        if let Some(line) = lines.next() {
            write!(f, "   {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
