use rand::{Rng, SeedableRng, rngs::SmallRng};
use rustc_hash::FxHashMap;

use crate::{
    board::Board,
    color::Color,
    coord::Square,
    legality::{is_in_check, legal_moves},
    movegen::Move,
    piece::Piece,
    snapshot::Snapshot,
    status::{GameStatus, Status},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Automation {
    white: bool,
    black: bool,
}
impl Automation {
    fn enabled(self, color: Color) -> bool {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

/// A single game. Owns the board exclusively; every public operation runs
/// to completion before the next is accepted, and a rejected move is a
/// no-op response rather than a fault.
#[derive(Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
    // the current side's legal moves, both as a list for uniform random
    // selection and indexed by origin for O(1) request validation
    legal: Vec<Move>,
    index: FxHashMap<Square, FxHashMap<Square, Move>>,
    automation: Automation,
    rng: SmallRng,
    move_log: Vec<Move>,
    captured: Vec<Piece>,
}
impl Game {
    pub fn new() -> Self {
        Game::with_rng(Board::starting_position(), SmallRng::from_os_rng())
    }
    /// A game whose automated moves are reproducible.
    pub fn from_seed(seed: u64) -> Self {
        Game::with_rng(Board::starting_position(), SmallRng::seed_from_u64(seed))
    }
    /// Start from an arbitrary position, usually seeded from a snapshot.
    pub fn from_board(board: Board) -> Self {
        Game::with_rng(board, SmallRng::from_os_rng())
    }
    fn with_rng(board: Board, rng: SmallRng) -> Self {
        let mut game = Game {
            board,
            status: GameStatus::Ongoing,
            legal: Vec::new(),
            index: FxHashMap::default(),
            automation: Automation::default(),
            rng,
            move_log: Vec::new(),
            captured: Vec::new(),
        };
        game.refresh();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }
    pub fn game_status(&self) -> GameStatus {
        self.status
    }
    pub fn status(&self) -> Status {
        Status {
            side_to_move: self.board.side_to_move(),
            game_over: self.status.is_over(),
            is_checkmate: matches!(self.status, GameStatus::Checkmate(_)),
        }
    }
    pub fn board_snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }
    /// The legal destinations of the piece on `from`, with full move
    /// detail, for highlighting and request validation.
    pub fn valid_moves(&self, from: Square) -> Option<&FxHashMap<Square, Move>> {
        self.index.get(&from)
    }
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Attempt the move `from` → `to` for the side to move. Returns `true`
    /// and commits it if it is in the current legal-move set, `false` with
    /// no side effects otherwise. A committed move may be answered
    /// immediately by an automated reply.
    pub fn request_move(&mut self, from: Square, to: Square) -> bool {
        if self.status.is_over() {
            return false;
        }
        let Some(movement) = self
            .index
            .get(&from)
            .and_then(|destinations| destinations.get(&to))
            .copied()
        else {
            return false;
        };
        self.commit(&movement);
        self.automated_reply();
        true
    }
    /// Toggle self-play to exactly one color, or none. Enabling automation
    /// for the side currently to move plays its move immediately. The
    /// flags survive [`Game::reset`].
    pub fn set_automation(&mut self, color: Option<Color>) {
        self.automation = Automation {
            white: color == Some(Color::White),
            black: color == Some(Color::Black),
        };
        self.automated_reply();
    }
    /// Reinitialize to the starting position. Automation flags persist, so
    /// an automated white answers with its opening move right away.
    pub fn reset(&mut self) {
        self.board = Board::starting_position();
        self.move_log.clear();
        self.captured.clear();
        self.refresh();
        self.automated_reply();
    }

    fn automated_reply(&mut self) {
        if !self.status.is_over() && self.automation.enabled(self.board.side_to_move()) {
            // always legal by construction, no retry needed
            let movement = self.legal[self.rng.random_range(0..self.legal.len())];
            self.commit(&movement);
        }
    }
    fn commit(&mut self, movement: &Move) {
        self.board.apply(movement);
        self.move_log.push(*movement);
        if let Some(captured) = movement.captured {
            self.captured.push(captured);
        }
        self.refresh();
    }
    fn refresh(&mut self) {
        let side = self.board.side_to_move();
        self.legal = legal_moves(&self.board, side);
        self.index.clear();
        for movement in &self.legal {
            self.index
                .entry(movement.from)
                .or_default()
                .insert(movement.to, *movement);
        }
        let check = is_in_check(&self.board, side);
        self.status = if self.legal.is_empty() {
            if check {
                GameStatus::Checkmate(!side)
            } else {
                GameStatus::Stalemate
            }
        } else if check {
            GameStatus::Check(side)
        } else {
            GameStatus::Ongoing
        };
    }
}
impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod test {
    use crate::{
        board::Board,
        color::Color,
        coord::Square,
        game::Game,
        piece::PieceKind,
        snapshot::Snapshot,
        status::GameStatus,
    };

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }
    fn play(game: &mut Game, from: &str, to: &str) {
        assert!(game.request_move(sq(from), sq(to)), "{from}{to} rejected");
    }

    #[test]
    fn fools_mate_ends_in_checkmate() {
        let mut game = Game::from_seed(0);
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        play(&mut game, "d8", "h4");
        assert_eq!(game.game_status(), GameStatus::Checkmate(Color::Black));
        let status = game.status();
        assert!(status.game_over);
        assert!(status.is_checkmate);
        // a finished game rejects every further request
        assert!(!game.request_move(sq("e2"), sq("e4")));
    }

    #[test]
    fn stalemate_is_game_over_without_checkmate() {
        let snapshot: Snapshot = "bk00000000000000--0000wq0000000000--00wk000000000000--\
                                  0000000000000000--0000000000000000--0000000000000000--\
                                  0000000000000000--0000000000000000"
            .parse()
            .unwrap();
        let game = Game::from_board(Board::from_snapshot(&snapshot, Color::Black));
        assert_eq!(game.game_status(), GameStatus::Stalemate);
        let status = game.status();
        assert!(status.game_over);
        assert!(!status.is_checkmate);
    }

    #[test]
    fn rejected_moves_change_nothing() {
        let mut game = Game::from_seed(0);
        let snapshot = game.board_snapshot().to_string();
        let status = game.status();
        assert!(!game.request_move(sq("e2"), sq("e5"))); // too far
        assert!(!game.request_move(sq("e7"), sq("e5"))); // not your turn
        assert!(!game.request_move(sq("d1"), sq("d3"))); // blocked
        assert_eq!(game.board_snapshot().to_string(), snapshot);
        assert_eq!(game.status(), status);
        assert!(game.move_log().is_empty());
    }

    #[test]
    fn captures_shrink_the_board_by_exactly_one() {
        let mut game = Game::from_seed(0);
        let count = |game: &Game| {
            let board = game.board();
            board.pieces(Color::White).count() + board.pieces(Color::Black).count()
        };
        assert_eq!(count(&game), 32);
        play(&mut game, "e2", "e4");
        assert_eq!(count(&game), 32);
        play(&mut game, "d7", "d5");
        assert_eq!(count(&game), 32);
        play(&mut game, "e4", "d5");
        assert_eq!(count(&game), 31);
        assert_eq!(game.captured_pieces().len(), 1);
        assert_eq!(game.captured_pieces()[0].kind, PieceKind::Pawn);
    }

    #[test]
    fn en_passant_removes_a_pawn_beside_the_destination() {
        let mut game = Game::from_seed(0);
        play(&mut game, "e2", "e4");
        play(&mut game, "a7", "a6");
        play(&mut game, "e4", "e5");
        play(&mut game, "d7", "d5");
        play(&mut game, "e5", "d6");
        assert_eq!(game.board()[sq("d5")], None);
        assert_eq!(
            game.board()[sq("d6")].map(|piece| piece.kind),
            Some(PieceKind::Pawn)
        );
        assert_eq!(game.captured_pieces().len(), 1);
    }

    #[test]
    fn no_en_passant_without_an_adjacent_double_push() {
        let mut game = Game::from_seed(0);
        play(&mut game, "e2", "e4");
        // en passant is not yet available to black
        assert!(
            game.move_log().len() == 1
                && !game
                    .valid_moves(sq("d7"))
                    .is_some_and(|destinations| destinations
                        .values()
                        .any(crate::movegen::Move::is_en_passant))
        );
        play(&mut game, "d7", "d5");
        // the white c-pawn sits on its home rank, not beside d5, so the
        // double push gives it nothing to capture
        assert!(game.valid_moves(sq("c2")).is_some_and(|destinations| {
            destinations.keys().all(|to| to.file() == 2)
        }));
        // while the e-pawn may take d5 normally
        assert!(
            game.valid_moves(sq("e4"))
                .is_some_and(|destinations| destinations.contains_key(&sq("d5")))
        );
    }

    #[test]
    fn a_rook_captured_in_place_revokes_castling_forever() {
        let snapshot: Snapshot = "00000000bk0000br--0000000000000000--0000000000000000--\
                                  0000000000000000--0000000000000000--0000000000000000--\
                                  0000000000000000--00000000wk0000wr"
            .parse()
            .unwrap();
        let mut game = Game::from_board(Board::from_snapshot(&snapshot, Color::Black));
        play(&mut game, "h8", "h1");
        assert!(
            !game
                .board()
                .castling()
                .allows(Color::White, crate::castling::CastleSide::Kingside)
        );
        // white never regains the right, even after the attacker leaves
        play(&mut game, "e1", "d2");
        play(&mut game, "h1", "h8");
        assert!(
            !game
                .board()
                .castling()
                .allows(Color::White, crate::castling::CastleSide::Kingside)
        );
    }

    #[test]
    fn automation_plays_a_deterministic_legal_reply() {
        let mut first = Game::from_seed(42);
        let mut second = Game::from_seed(42);
        for game in [&mut first, &mut second] {
            game.set_automation(Some(Color::Black));
            play(game, "e2", "e4");
        }
        // the automated black reply was committed and matches across games
        assert_eq!(first.move_log().len(), 2);
        assert_eq!(first.side_to_move(), Color::White);
        assert_eq!(first.move_log(), second.move_log());
    }

    #[test]
    fn enabling_automation_for_the_side_to_move_plays_immediately() {
        let mut game = Game::from_seed(7);
        assert!(game.move_log().is_empty());
        game.set_automation(Some(Color::White));
        assert_eq!(game.move_log().len(), 1);
        assert_eq!(game.side_to_move(), Color::Black);
        game.set_automation(None);
        assert_eq!(game.move_log().len(), 1);
    }

    #[test]
    fn automation_survives_reset() {
        let mut game = Game::from_seed(9);
        game.set_automation(Some(Color::Black));
        play(&mut game, "e2", "e4");
        assert_eq!(game.move_log().len(), 2);
        game.reset();
        assert!(game.move_log().is_empty());
        assert_eq!(
            game.board_snapshot(),
            Board::starting_position().snapshot()
        );
        // black is still automated after the reset
        play(&mut game, "d2", "d4");
        assert_eq!(game.move_log().len(), 2);
    }
}
