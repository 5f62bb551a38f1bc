use std::fmt::{self, Display, Formatter};

use crate::{
    board::Board,
    castling::{CastleSide, king_home},
    color::Color,
    coord::{Direction, Square, SquareSet, pawn_home_rank, promotion_rank},
    piece::{Piece, PieceKind},
};

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (-2, -1),
    (2, -1),
    (-2, 1),
    (2, 1),
    (-1, 2),
    (1, 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Special {
    Castle(CastleSide),
    Promotion(PieceKind),
}

/// A move, meaningful only relative to the position it was generated from.
///
/// The capture square differs from the destination only for en passant,
/// where the captured pawn stands beside the destination rather than on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub capture_square: Option<Square>,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub special: Option<Special>,
}
impl Move {
    fn quiet(piece: Piece, from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            capture_square: None,
            piece,
            captured: None,
            special: None,
        }
    }
    fn capture(piece: Piece, from: Square, to: Square, captured: Piece) -> Self {
        Move {
            from,
            to,
            capture_square: Some(to),
            piece,
            captured: Some(captured),
            special: None,
        }
    }
    pub fn is_en_passant(&self) -> bool {
        self.capture_square.is_some_and(|square| square != self.to)
    }
}
impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(Special::Promotion(kind)) = self.special {
            write!(f, "{}", kind.code())?;
        }
        Ok(())
    }
}

/// Every move for one color that obeys piece-movement rules alone, with no
/// regard for whether it leaves the mover's own king attacked.
pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    for (square, piece) in board.pieces(color) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(board, square, piece, &mut moves),
            PieceKind::Knight => {
                for (file, rank) in KNIGHT_OFFSETS {
                    if let Some(to) = square.offset(file, rank) {
                        push_step(board, piece, square, to, &mut moves);
                    }
                }
            }
            PieceKind::Bishop => slide_moves(board, square, piece, &Direction::BISHOP, &mut moves),
            PieceKind::Rook => slide_moves(board, square, piece, &Direction::ROOK, &mut moves),
            PieceKind::Queen => slide_moves(board, square, piece, &Direction::ALL, &mut moves),
            PieceKind::King => {
                for direction in Direction::ALL {
                    if let Some(to) = square.step(direction) {
                        push_step(board, piece, square, to, &mut moves);
                    }
                }
                castle_moves(board, square, piece, &mut moves);
            }
        }
    }
    moves
}

/// Every square the given color attacks: the capture pattern of each piece,
/// including both diagonal-forward squares of every pawn whether or not they
/// are occupied. Pawn pushes do not attack their destination.
pub fn attacked_squares(board: &Board, color: Color) -> SquareSet {
    let mut attacked = SquareSet::new();
    for (square, piece) in board.pieces(color) {
        match piece.kind {
            PieceKind::Pawn => {
                for direction in Direction::pawn_attacks(color) {
                    if let Some(to) = square.step(direction) {
                        attacked.insert(to);
                    }
                }
            }
            PieceKind::Knight => {
                for (file, rank) in KNIGHT_OFFSETS {
                    if let Some(to) = square.offset(file, rank) {
                        attacked.insert(to);
                    }
                }
            }
            PieceKind::Bishop => slide_attacks(board, square, &Direction::BISHOP, &mut attacked),
            PieceKind::Rook => slide_attacks(board, square, &Direction::ROOK, &mut attacked),
            PieceKind::Queen => slide_attacks(board, square, &Direction::ALL, &mut attacked),
            PieceKind::King => {
                for direction in Direction::ALL {
                    if let Some(to) = square.step(direction) {
                        attacked.insert(to);
                    }
                }
            }
        }
    }
    attacked
}

fn push_step(board: &Board, piece: Piece, from: Square, to: Square, moves: &mut Vec<Move>) {
    match board[to] {
        Some(occupant) if occupant.color == piece.color => {}
        Some(occupant) => moves.push(Move::capture(piece, from, to, occupant)),
        None => moves.push(Move::quiet(piece, from, to)),
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    moves: &mut Vec<Move>,
) {
    for direction in directions.iter().copied() {
        let mut current = from;
        while let Some(to) = current.step(direction) {
            match board[to] {
                Some(occupant) if occupant.color == piece.color => break,
                Some(occupant) => {
                    moves.push(Move::capture(piece, from, to, occupant));
                    break;
                }
                None => moves.push(Move::quiet(piece, from, to)),
            }
            current = to;
        }
    }
}

fn slide_attacks(board: &Board, from: Square, directions: &[Direction], attacked: &mut SquareSet) {
    for direction in directions.iter().copied() {
        let mut current = from;
        while let Some(to) = current.step(direction) {
            attacked.insert(to);
            if board[to].is_some() {
                break;
            }
            current = to;
        }
    }
}

fn pawn_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color;
    let forward = Direction::forward(color);
    if let Some(to) = from.step(forward)
        && board[to].is_none()
    {
        push_pawn(Move::quiet(piece, from, to), moves);
        if from.rank() == pawn_home_rank(color)
            && let Some(two) = to.step(forward)
            && board[two].is_none()
        {
            push_pawn(Move::quiet(piece, from, two), moves);
        }
    }
    for direction in Direction::pawn_attacks(color) {
        let Some(to) = from.step(direction) else {
            continue;
        };
        match board[to] {
            Some(target) if target.color != color => {
                push_pawn(Move::capture(piece, from, to, target), moves);
            }
            Some(_) => {}
            None => {
                // en passant: the immediately preceding move was an enemy
                // pawn double push landing beside this pawn; it is captured
                // as if it had advanced one square
                if let Some(last) = board.last_move()
                    && last.piece.kind == PieceKind::Pawn
                    && last.piece.color != color
                    && last.from.rank().abs_diff(last.to.rank()) == 2
                    && last.to == Square::new(to.file(), from.rank())
                {
                    push_pawn(
                        Move {
                            from,
                            to,
                            capture_square: Some(last.to),
                            piece,
                            captured: Some(last.piece),
                            special: None,
                        },
                        moves,
                    );
                }
            }
        }
    }
}

fn push_pawn(mut movement: Move, moves: &mut Vec<Move>) {
    if movement.to.rank() == promotion_rank(movement.piece.color) {
        // promotions always queen
        movement.special = Some(Special::Promotion(PieceKind::Queen));
    }
    moves.push(movement);
}

fn castle_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    let color = piece.color;
    if from != king_home(color) {
        return;
    }
    for side in CastleSide::ALL {
        if !board.castling().allows(color, side) {
            continue;
        }
        let rook_home = side.rook_home(color);
        if board[rook_home] != Some(Piece::new(color, PieceKind::Rook)) {
            continue;
        }
        if !board.trace_path(from, rook_home, side.direction()) {
            continue;
        }
        moves.push(Move {
            from,
            to: side.king_target(color),
            capture_square: None,
            piece,
            captured: None,
            special: Some(Special::Castle(side)),
        });
    }
}

#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord::Square,
        movegen::{Special, attacked_squares, pseudo_legal_moves},
        piece::PieceKind,
    };

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn twenty_moves_from_the_starting_position() {
        let board = Board::starting_position();
        assert_eq!(pseudo_legal_moves(&board, Color::White).len(), 20);
        assert_eq!(pseudo_legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn double_push_requires_both_squares_empty() {
        let mut board = Board::starting_position();
        board[sq("e3")] = board[sq("b8")].take();
        let moves = pseudo_legal_moves(&board, Color::White);
        assert!(!moves.iter().any(|movement| movement.from == sq("e2")));
    }

    #[test]
    fn pawn_pushes_do_not_attack() {
        let board = Board::starting_position();
        let attacked = attacked_squares(&board, Color::White);
        // push and double-push destinations are not attacked
        assert!(!attacked.contains(sq("d4")));
        assert!(!attacked.contains(sq("e4")));
        // the pawn diagonal is attacked even though no capture is possible
        assert!(attacked.contains(sq("d3")));
    }

    #[test]
    fn sliders_stop_at_the_first_occupied_square() {
        let mut board = Board::starting_position();
        board[sq("d4")] = board[sq("d1")].take();
        let destinations: Vec<_> = pseudo_legal_moves(&board, Color::White)
            .into_iter()
            .filter(|movement| movement.from == sq("d4"))
            .map(|movement| movement.to)
            .collect();
        assert!(destinations.contains(&sq("d5")));
        assert!(destinations.contains(&sq("d7"))); // capture
        assert!(!destinations.contains(&sq("d8"))); // behind the capture
        assert!(!destinations.contains(&sq("d2"))); // own pawn
    }

    #[test]
    fn promotion_always_queens() {
        let mut board = Board::starting_position();
        board[sq("b8")] = None;
        board[sq("b7")] = board[sq("b2")].take();
        let promotions: Vec<_> = pseudo_legal_moves(&board, Color::White)
            .into_iter()
            .filter(|movement| movement.from == sq("b7"))
            .collect();
        assert!(!promotions.is_empty());
        for movement in promotions {
            assert_eq!(
                movement.special,
                Some(Special::Promotion(PieceKind::Queen))
            );
        }
    }

    #[test]
    fn en_passant_is_captured_beside_the_destination() {
        let mut board = Board::starting_position();
        let play = |board: &mut Board, from: &str, to: &str| {
            let movement = pseudo_legal_moves(board, board.side_to_move())
                .into_iter()
                .find(|movement| movement.from == sq(from) && movement.to == sq(to))
                .unwrap();
            board.apply(&movement);
        };
        play(&mut board, "e2", "e4");
        play(&mut board, "a7", "a6");
        play(&mut board, "e4", "e5");
        play(&mut board, "d7", "d5");
        let capture = pseudo_legal_moves(&board, Color::White)
            .into_iter()
            .find(|movement| movement.from == sq("e5") && movement.to == sq("d6"))
            .expect("en passant should be generated");
        assert!(capture.is_en_passant());
        assert_eq!(capture.capture_square, Some(sq("d5")));
        assert_eq!(capture.captured.map(|piece| piece.kind), Some(PieceKind::Pawn));
    }

    #[test]
    fn en_passant_expires_after_one_move() {
        let mut board = Board::starting_position();
        let play = |board: &mut Board, from: &str, to: &str| {
            let movement = pseudo_legal_moves(board, board.side_to_move())
                .into_iter()
                .find(|movement| movement.from == sq(from) && movement.to == sq(to))
                .unwrap();
            board.apply(&movement);
        };
        play(&mut board, "e2", "e4");
        play(&mut board, "a7", "a6");
        play(&mut board, "e4", "e5");
        play(&mut board, "d7", "d5");
        play(&mut board, "h2", "h3");
        play(&mut board, "a6", "a5");
        assert!(
            !pseudo_legal_moves(&board, Color::White)
                .into_iter()
                .any(|movement| movement.from == sq("e5") && movement.to == sq("d6"))
        );
    }

    #[test]
    fn castling_candidates_require_an_empty_path_and_the_right() {
        let mut board = Board::starting_position();
        assert!(
            !pseudo_legal_moves(&board, Color::White)
                .iter()
                .any(|movement| matches!(movement.special, Some(Special::Castle(_))))
        );
        board[sq("f1")] = None;
        board[sq("g1")] = None;
        let castles: Vec<_> = pseudo_legal_moves(&board, Color::White)
            .into_iter()
            .filter(|movement| matches!(movement.special, Some(Special::Castle(_))))
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].to, sq("g1"));
    }
}
