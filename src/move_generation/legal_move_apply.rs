//! In-place move execution and exact undo.
//!
//! `make_move` mutates the board, pushes the move and an `UndoState` snapshot,
//! and flips the turn. `undo_move` pops both stacks and reverses every board
//! side effect, so a make/undo pair leaves the state bit-identical.

use crate::game_state::chess_rules::{king_side_rook_home, queen_side_rook_home};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::Move;

/// Plies that must exist before the repetition window is inspected.
const REPETITION_WINDOW: usize = 10;

impl GameState {
    pub fn make_move(&mut self, mv: Move) {
        let mover = mv.piece_moved.color;

        self.undo_log.push(UndoState {
            prev_castling_rights: self.castling_rights,
            prev_en_passant_square: self.en_passant_square,
            prev_halfmove_clock: self.halfmove_clock,
            prev_fullmove_number: self.fullmove_number,
            prev_in_check: self.in_check,
            prev_threefold_repetition: self.threefold_repetition,
        });

        self.set_piece(mv.from, None);
        self.set_piece(mv.to, Some(mv.piece_moved));
        self.move_log.push(mv);
        self.side_to_move = mover.opposite();

        if mv.piece_moved.kind == PieceKind::King {
            self.king_locations[mover.index()] = mv.to;
        }

        if mv.is_pawn_promotion {
            self.set_piece(mv.to, Some(Piece::new(mover, PieceKind::Queen)));
        }

        if mv.is_en_passant {
            self.set_piece(mv.en_passant_victim_square(), None);
        }

        self.en_passant_square =
            if mv.piece_moved.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2 {
                Some(Square::new((mv.from.row + mv.to.row) / 2, mv.from.col))
            } else {
                None
            };

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.piece_at(rook_from);
            self.set_piece(rook_to, rook);
            self.set_piece(rook_from, None);
        }

        self.update_castling_rights(mv);

        if mv.piece_moved.kind == PieceKind::Pawn || mv.is_capture {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if mover == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.check_three_move_draw();
    }

    /// Reverts the last move. Does nothing on an empty history.
    pub fn undo_move(&mut self) {
        let (Some(mv), Some(undo)) = (self.move_log.pop(), self.undo_log.pop()) else {
            return;
        };
        let mover = mv.piece_moved.color;

        self.set_piece(mv.from, Some(mv.piece_moved));
        self.set_piece(mv.to, mv.piece_captured);
        self.side_to_move = mover;

        if mv.piece_moved.kind == PieceKind::King {
            self.king_locations[mover.index()] = mv.from;
        }

        if mv.is_en_passant {
            self.set_piece(mv.to, None);
            self.set_piece(mv.en_passant_victim_square(), mv.piece_captured);
        }

        if mv.is_castle {
            let (rook_from, rook_to) = castle_rook_squares(mv);
            let rook = self.piece_at(rook_to);
            self.set_piece(rook_from, rook);
            self.set_piece(rook_to, None);
        }

        self.castling_rights = undo.prev_castling_rights;
        self.en_passant_square = undo.prev_en_passant_square;
        self.halfmove_clock = undo.prev_halfmove_clock;
        self.fullmove_number = undo.prev_fullmove_number;
        self.in_check = undo.prev_in_check;
        self.threefold_repetition = undo.prev_threefold_repetition;

        self.checkmate = false;
        self.stalemate = false;
    }

    /// Fixed-window repetition heuristic: flags a draw once the last two
    /// moves of each side have been played three times in strict alternation.
    /// Transpositions and repeats with any other rhythm go unnoticed.
    pub fn check_three_move_draw(&mut self) {
        let log = &self.move_log;
        let n = log.len();
        if n < REPETITION_WINDOW {
            return;
        }

        let id = |back: usize| log[n - back].id();
        if id(1) == id(5) && id(5) == id(9) && id(2) == id(6) && id(6) == id(10) {
            self.threefold_repetition = true;
        }
    }

    fn update_castling_rights(&mut self, mv: Move) {
        let mover = mv.piece_moved.color;
        match mv.piece_moved.kind {
            PieceKind::King => self.castling_rights.revoke_all(mover),
            PieceKind::Rook => {
                if mv.from == queen_side_rook_home(mover) {
                    self.revoke_queen_side(mover);
                } else if mv.from == king_side_rook_home(mover) {
                    self.revoke_king_side(mover);
                }
            }
            _ => {}
        }

        // A home square that no longer holds its rook means the rook was captured.
        for color in [Color::White, Color::Black] {
            let rook = Some(Piece::new(color, PieceKind::Rook));
            if self.castling_rights.king_side(color) && self.piece_at(king_side_rook_home(color)) != rook {
                self.revoke_king_side(color);
            }
            if self.castling_rights.queen_side(color) && self.piece_at(queen_side_rook_home(color)) != rook {
                self.revoke_queen_side(color);
            }
        }
    }

    fn revoke_king_side(&mut self, color: Color) {
        match color {
            Color::White => self.castling_rights.white_king_side = false,
            Color::Black => self.castling_rights.black_king_side = false,
        }
    }

    fn revoke_queen_side(&mut self, color: Color) {
        match color {
            Color::White => self.castling_rights.white_queen_side = false,
            Color::Black => self.castling_rights.black_queen_side = false,
        }
    }
}

/// Rook origin and destination for a castling king move.
fn castle_rook_squares(mv: Move) -> (Square, Square) {
    let row = mv.to.row;
    if mv.to.col > mv.from.col {
        (Square::new(row, 7), Square::new(row, mv.to.col - 1))
    } else {
        (Square::new(row, 0), Square::new(row, mv.to.col + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::find_move_by_squares;
    use crate::utils::algebraic::algebraic_to_square;

    fn play(game: &mut GameState, lan: &str) -> Move {
        let from = algebraic_to_square(&lan[0..2]).expect("square should parse");
        let to = algebraic_to_square(&lan[2..4]).expect("square should parse");
        let legal = game.get_valid_moves();
        let mv = find_move_by_squares(&legal, from, to)
            .unwrap_or_else(|| panic!("{lan} should be legal in {}", game.get_fen()));
        game.make_move(mv);
        mv
    }

    #[test]
    fn make_then_undo_restores_everything() {
        let mut game = GameState::new_game();
        game.get_valid_moves();
        let before = game.clone();

        play(&mut game, "e2e4");
        assert_eq!(game.side_to_move, Color::Black);
        assert_eq!(game.en_passant_square, algebraic_to_square("e3").ok());
        game.undo_move();

        assert_eq!(game, before);
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut game = GameState::new_game();
        let before = game.clone();
        game.undo_move();
        assert_eq!(game, before);
    }

    #[test]
    fn en_passant_removes_the_passed_pawn() {
        let mut game = GameState::new_game();
        for lan in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            play(&mut game, lan);
        }
        let ep = play(&mut game, "e5d6");
        assert!(ep.is_en_passant);
        assert_eq!(game.piece_at(algebraic_to_square("d5").expect("square")), None);
        assert_eq!(
            game.piece_at(algebraic_to_square("d6").expect("square")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );

        game.undo_move();
        assert_eq!(
            game.piece_at(algebraic_to_square("d5").expect("square")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(game.piece_at(algebraic_to_square("d6").expect("square")), None);
        assert_eq!(game.en_passant_square, algebraic_to_square("d6").ok());
    }

    #[test]
    fn castling_moves_the_rook_and_undo_puts_it_back() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut game, "e1c1");
        let d1 = algebraic_to_square("d1").expect("square");
        let a1 = algebraic_to_square("a1").expect("square");
        assert_eq!(game.piece_at(d1), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(a1), None);
        assert!(!game.castling_rights.white_king_side);
        assert!(!game.castling_rights.white_queen_side);
        assert!(game.castling_rights.black_king_side);
        assert!(game.castling_rights.black_queen_side);

        game.undo_move();
        assert_eq!(game.piece_at(a1), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(game.piece_at(d1), None);
        assert_eq!(game.castling_rights, CastlingRights::ALL);
    }

    #[test]
    fn undo_restores_each_castling_right_separately() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        play(&mut game, "h1h2");
        play(&mut game, "a8a7");
        assert_eq!(
            game.castling_rights,
            CastlingRights {
                white_king_side: false,
                white_queen_side: true,
                black_king_side: true,
                black_queen_side: false,
            }
        );
        game.undo_move();
        assert!(game.castling_rights.black_queen_side);
        assert!(!game.castling_rights.white_king_side);
        game.undo_move();
        assert_eq!(game.castling_rights, CastlingRights::ALL);
    }

    #[test]
    fn rook_away_and_back_does_not_regain_the_right() {
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        for lan in ["h1h2", "a8b8", "h2h1", "b8a8"] {
            play(&mut game, lan);
        }
        assert!(!game.castling_rights.white_king_side);
        assert!(!game.castling_rights.black_queen_side);
        let legal = game.get_valid_moves();
        assert!(legal.iter().filter(|mv| mv.is_castle).all(|mv| mv.to.col == 2));
    }

    #[test]
    fn capturing_an_unmoved_rook_revokes_the_right() {
        // White bishop takes the rook on h8 without either black piece moving.
        let mut game =
            GameState::from_fen("r3k2r/8/8/8/8/8/1B6/4K3 w kq - 0 1").expect("FEN should parse");
        play(&mut game, "b2h8");
        assert!(!game.castling_rights.black_king_side);
        assert!(game.castling_rights.black_queen_side);
    }

    #[test]
    fn pawn_reaching_the_last_rank_becomes_a_queen() {
        let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let mv = play(&mut game, "a7a8");
        assert!(mv.is_pawn_promotion);
        let a8 = algebraic_to_square("a8").expect("square");
        assert_eq!(game.piece_at(a8), Some(Piece::new(Color::White, PieceKind::Queen)));
        game.undo_move();
        assert_eq!(game.piece_at(a8), None);
        assert_eq!(
            game.piece_at(algebraic_to_square("a7").expect("square")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn shuffling_knights_triggers_the_repetition_flag() {
        let mut game = GameState::new_game();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        for (ply, lan) in shuffle.iter().cycle().take(9).enumerate() {
            play(&mut game, lan);
            assert!(!game.threefold_repetition, "flag raised early at ply {ply}");
        }
        play(&mut game, "g8f6");
        assert!(game.threefold_repetition);

        game.undo_move();
        assert!(!game.threefold_repetition);
    }
}
