use std::fmt::{self, Display, Formatter};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashSet;

use crate::{
    board::Board,
    board_display::BoardDisplay,
    castling::CastleSide,
    color::Color,
    coord::Square,
    legality::legal_moves,
    piece::PieceKind,
};

impl From<chess::Square> for Square {
    fn from(value: chess::Square) -> Self {
        Square::new(
            value.get_file().to_index().try_into().unwrap(),
            value.get_rank().to_index().try_into().unwrap(),
        )
    }
}

/// FEN rendering of a board, for handing positions to the reference
/// move generator and for panic messages.
struct Fen<'a>(&'a Board);

impl Display for Fen<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let board = self.0;
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = board[Square::new(file, rank)] {
                    if empty > 0 {
                        write!(f, "{empty}")?;
                        empty = 0;
                    }
                    write!(f, "{}", piece.fen())?;
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        write!(f, " {}", board.side_to_move().code())?;
        let castling = board.castling();
        let mut rights = String::new();
        for (color, symbols) in [(Color::White, ['K', 'Q']), (Color::Black, ['k', 'q'])] {
            for (side, symbol) in CastleSide::ALL.into_iter().zip(symbols) {
                if castling.allows(color, side) {
                    rights.push(symbol);
                }
            }
        }
        if rights.is_empty() {
            write!(f, " -")?;
        } else {
            write!(f, " {rights}")?;
        }
        match board.last_move() {
            Some(last)
                if last.piece.kind == PieceKind::Pawn
                    && last.from.rank().abs_diff(last.to.rank()) == 2 =>
            {
                let passed = Square::new(last.to.file(), last.from.rank().midpoint(last.to.rank()));
                write!(f, " {passed}")?;
            }
            _ => write!(f, " -")?,
        }
        write!(f, " 0 1")
    }
}

fn destination_pairs(board: &Board) -> FxHashSet<(Square, Square)> {
    // auto-queening collapses each promotion square to a single move, so
    // compare origin-destination pairs rather than full moves
    legal_moves(board, board.side_to_move())
        .into_iter()
        .map(|movement| (movement.from, movement.to))
        .collect()
}
fn reference_pairs(board: &chess::Board) -> FxHashSet<(Square, Square)> {
    chess::MoveGen::new_legal(board)
        .map(|movement| (movement.get_source().into(), movement.get_dest().into()))
        .collect()
}

/// Plays endless random games, checking this crate's legal-move set
/// against the `chess` crate's on every position and panicking on the
/// first disagreement.
pub fn fuzz() -> ! {
    let mut board = Board::starting_position();
    let mut rng = SmallRng::from_os_rng();
    loop {
        let moves = legal_moves(&board, board.side_to_move());
        if moves.is_empty() {
            board = Board::starting_position();
            continue;
        }
        let fen = Fen(&board).to_string();
        let reference: chess::Board = fen.parse().unwrap();
        let pairs = destination_pairs(&board);
        let pairs2 = reference_pairs(&reference);
        if pairs != pairs2 {
            let display = BoardDisplay {
                board: &board,
                view: Color::White,
                highlighted: &[],
                info: "",
            };
            let extra: Vec<_> = pairs.difference(&pairs2).collect();
            let missing: Vec<_> = pairs2.difference(&pairs).collect();
            panic!("move sets disagree\nextra: {extra:?}\nmissing: {missing:?}\n{display}\n{fen}");
        }
        let movement = moves[rng.random_range(0..moves.len())];
        board.apply(&movement);
    }
}
