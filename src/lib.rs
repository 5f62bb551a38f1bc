//! A chess rules engine with a random-move automaton, exposed through a
//! narrow controller suited for driving a view.
#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod board_display;
pub mod castling;
pub mod color;
pub mod coord;
pub mod fuzz;
pub mod game;
pub mod legality;
mod misc;
pub mod movegen;
pub mod piece;
pub mod repl;
pub mod snapshot;
pub mod status;

pub use crate::{
    board::Board,
    castling::{CastleSide, CastlingRights},
    color::Color,
    coord::{Direction, Square},
    game::Game,
    movegen::{Move, Special},
    piece::{Piece, PieceKind},
    snapshot::Snapshot,
    status::{GameStatus, Status},
};
