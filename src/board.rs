use std::ops::{Index, IndexMut};

use crate::{
    castling::{CastleSide, CastlingRights, king_home},
    color::Color,
    coord::{Direction, Square},
    movegen::{Move, Special},
    piece::{Piece, PieceKind},
    snapshot::Snapshot,
};

/// The position: all 64 squares plus the auxiliary state move generation
/// needs. The single source of truth for a game; move generation and
/// legality filtering read it, only [`Board::apply`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // [rank][file], rank 0 is rank 1
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    castling: CastlingRights,
    last_move: Option<Move>,
}
impl Board {
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let squares = [
            BACK_RANK.map(|kind| Some(Piece::new(Color::White, kind))),
            [Some(Piece::new(Color::White, PieceKind::Pawn)); 8],
            [None; 8],
            [None; 8],
            [None; 8],
            [None; 8],
            [Some(Piece::new(Color::Black, PieceKind::Pawn)); 8],
            BACK_RANK.map(|kind| Some(Piece::new(Color::Black, kind))),
        ];
        Board {
            squares,
            side_to_move: Color::White,
            castling: CastlingRights::all(),
            last_move: None,
        }
    }
    /// Seed a position from a snapshot. Castling rights are granted only
    /// where both the king and the rook still stand on their home squares;
    /// no en-passant capture is available until a move is played.
    pub fn from_snapshot(snapshot: &Snapshot, side_to_move: Color) -> Self {
        let mut board = Board {
            squares: snapshot.0,
            side_to_move,
            castling: CastlingRights::none(),
            last_move: None,
        };
        for color in [Color::White, Color::Black] {
            if board[king_home(color)] != Some(Piece::new(color, PieceKind::King)) {
                continue;
            }
            for side in CastleSide::ALL {
                if board[side.rook_home(color)] == Some(Piece::new(color, PieceKind::Rook)) {
                    board.castling.grant(color, side);
                }
            }
        }
        board
    }
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.squares)
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> &CastlingRights {
        &self.castling
    }
    pub fn last_move(&self) -> Option<&Move> {
        self.last_move.as_ref()
    }
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> {
        (0..8).flat_map(move |rank| {
            (0..8).filter_map(move |file| {
                let square = Square::new(file, rank);
                self[square]
                    .filter(|piece| piece.color == color)
                    .map(|piece| (square, piece))
            })
        })
    }
    pub fn king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }
    /// Walk from `from` in one direction and report whether `to` is reached
    /// with no occupied square strictly in between.
    pub fn trace_path(&self, from: Square, to: Square, direction: Direction) -> bool {
        let mut current = from;
        loop {
            let Some(next) = current.step(direction) else {
                return false;
            };
            if next == to {
                return true;
            }
            if self[next].is_some() {
                return false;
            }
            current = next;
        }
    }
    /// Commit a move produced by move generation against this position.
    /// Relocates the piece, clears the capture square, moves the rook on a
    /// castle, swaps the kind on a promotion, updates castling rights,
    /// records the move, and flips the side to move.
    pub fn apply(&mut self, movement: &Move) {
        if let Some(capture) = movement.capture_square {
            self[capture] = None;
        }
        let mut piece = self[movement.from].take();
        if let Some(Special::Promotion(kind)) = movement.special
            && let Some(piece) = &mut piece
        {
            piece.kind = kind;
        }
        self[movement.to] = piece;

        let color = movement.piece.color;
        match movement.special {
            Some(Special::Castle(side)) => {
                let rook = self[side.rook_home(color)].take();
                self[side.rook_target(color)] = rook;
            }
            Some(Special::Promotion(_)) | None => {}
        }
        match movement.piece.kind {
            PieceKind::King => self.castling.revoke_both(color),
            PieceKind::Rook => {
                for side in CastleSide::ALL {
                    if movement.from == side.rook_home(color) {
                        self.castling.revoke(color, side);
                    }
                }
            }
            _ => {}
        }
        // a rook captured on its home square loses the right even though
        // it never moved
        if let Some(captured) = movement.captured
            && captured.kind == PieceKind::Rook
        {
            for side in CastleSide::ALL {
                if movement.capture_square == Some(side.rook_home(captured.color)) {
                    self.castling.revoke(captured.color, side);
                }
            }
        }

        self.last_move = Some(*movement);
        self.side_to_move = !self.side_to_move;
    }
    /// Value-copy application, used to test candidate moves for king safety.
    pub fn clone_and_apply(&self, movement: &Move) -> Self {
        let mut new = self.clone();
        new.apply(movement);
        new
    }
}
impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.rank() as usize][index.file() as usize]
    }
}
impl IndexMut<Square> for Board {
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index.rank() as usize][index.file() as usize]
    }
}
