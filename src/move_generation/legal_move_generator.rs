//! Full legal move generation pipeline.
//!
//! Analyses pins and checks once per call, runs the per-piece generators with
//! that analysis, then narrows the result to check-resolving moves when the
//! side to move is in check. An empty result flags checkmate or stalemate.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{check_for_pins_and_checks, PinsAndChecks, RayHit};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::moves::chess_move::Move;

impl GameState {
    /// All legal moves for the side to move. Also refreshes `in_check`,
    /// `checkmate` and `stalemate`.
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        let color = self.side_to_move;
        let king = self.king_location(color);
        let analysis = check_for_pins_and_checks(self);

        let moves = if !analysis.in_check {
            self.possible_moves_with(&analysis)
        } else if analysis.is_double_check() {
            // Only the king can answer two checkers at once.
            let mut out = Vec::with_capacity(8);
            generate_king_moves(self, king, color, &analysis, &mut out);
            out
        } else {
            let mut out = self.possible_moves_with(&analysis);
            let resolving = self.check_resolution_squares(king, analysis.checks[0]);
            out.retain(|mv| {
                mv.piece_moved.kind == PieceKind::King
                    || resolving.contains(&mv.to)
                    || (mv.is_en_passant && resolving.contains(&mv.en_passant_victim_square()))
            });
            out
        };

        self.in_check = analysis.in_check;
        self.checkmate = moves.is_empty() && analysis.in_check;
        self.stalemate = moves.is_empty() && !analysis.in_check;
        moves
    }

    /// Pseudo-legal moves: pins are honoured but checks are not resolved.
    pub fn get_possible_moves(&self) -> Vec<Move> {
        let analysis = check_for_pins_and_checks(self);
        self.possible_moves_with(&analysis)
    }

    fn possible_moves_with(&self, analysis: &PinsAndChecks) -> Vec<Move> {
        let color = self.side_to_move;
        let mut out = Vec::with_capacity(64);

        for row in 0..8u8 {
            for col in 0..8u8 {
                let from = Square::new(row, col);
                let Some(piece) = self.piece_at(from) else {
                    continue;
                };
                if piece.color != color {
                    continue;
                }
                match piece.kind {
                    PieceKind::Pawn => generate_pawn_moves(self, from, color, analysis, &mut out),
                    PieceKind::Knight => generate_knight_moves(self, from, color, analysis, &mut out),
                    PieceKind::Bishop => generate_bishop_moves(self, from, color, analysis, &mut out),
                    PieceKind::Rook => generate_rook_moves(self, from, color, analysis, &mut out),
                    PieceKind::Queen => generate_queen_moves(self, from, color, analysis, &mut out),
                    PieceKind::King => generate_king_moves(self, from, color, analysis, &mut out),
                }
            }
        }

        out
    }

    /// Squares a non-king move may land on to answer a single check: the
    /// checker itself, plus the squares in between for a sliding checker.
    fn check_resolution_squares(&self, king: Square, check: RayHit) -> Vec<Square> {
        let checker_is_knight = matches!(
            self.piece_at(check.square),
            Some(Piece { kind: PieceKind::Knight, .. })
        );
        if checker_is_knight {
            return vec![check.square];
        }

        let mut squares = Vec::with_capacity(7);
        for distance in 1..8 {
            let Some(square) = king.offset(check.direction, distance) else {
                break;
            };
            squares.push(square);
            if square == check.square {
                break;
            }
        }
        squares
    }
}
