use crate::{
    board::Board,
    color::Color,
    movegen::{Move, Special, attacked_squares, pseudo_legal_moves},
};

/// Pseudo-legal moves for `color` minus every move that would leave its own
/// king attacked. For castling the king's start and transit squares are
/// checked as well as the landing square.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    pseudo_legal_moves(board, color)
        .into_iter()
        .filter(|movement| is_king_safe(board, color, movement))
        .collect()
}

fn is_king_safe(board: &Board, color: Color, movement: &Move) -> bool {
    let scratch = board.clone_and_apply(movement);
    let attacked = attacked_squares(&scratch, !color);
    let Some(king) = scratch.king(color) else {
        debug_assert!(false, "no {color} king on the board");
        return false;
    };
    if attacked.contains(king) {
        return false;
    }
    if let Some(Special::Castle(side)) = movement.special {
        // the king may not castle out of, or through, an attacked square
        if attacked.contains(movement.from) {
            return false;
        }
        if let Some(transit) = movement.from.step(side.direction())
            && attacked.contains(transit)
        {
            return false;
        }
    }
    true
}

pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king(color) else {
        debug_assert!(false, "no {color} king on the board");
        return false;
    };
    attacked_squares(board, !color).contains(king)
}

/// No legal moves means checkmate or stalemate; the two are told apart
/// solely by whether the king is currently attacked.
pub fn has_no_legal_moves(board: &Board, color: Color) -> bool {
    legal_moves(board, color).is_empty()
}
