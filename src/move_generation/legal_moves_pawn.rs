//! Pawn pushes, captures and en passant.

use crate::game_state::chess_rules::{en_passant_row, pawn_start_row};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{pins_and_checks_on, PinsAndChecks};
use crate::move_generation::legal_move_shared::along_pin_line;
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    let pin = analysis.pin_direction(from);
    let pawn = Piece::new(color, PieceKind::Pawn);
    let forward = color.forward();

    let push = (forward, 0);
    let steps = if from.row == pawn_start_row(color) { 2 } else { 1 };
    for step in 1..=steps {
        let Some(to) = from.offset(push, step) else {
            break;
        };
        if !game_state.is_empty(to) {
            break;
        }
        if along_pin_line(pin, push) {
            out.push(Move::new(from, to, pawn, &game_state.board));
        }
    }

    for side in [-1, 1] {
        let diagonal = (forward, side);
        let Some(to) = from.offset(diagonal, 1) else {
            continue;
        };
        if !along_pin_line(pin, diagonal) {
            continue;
        }

        match game_state.piece_at(to) {
            Some(target) if target.color != color => {
                out.push(Move::new(from, to, pawn, &game_state.board));
            }
            Some(_) => {}
            None => {
                if from.row == en_passant_row(color)
                    && game_state.en_passant_square == Some(to)
                    && game_state.piece_at(Square::new(from.row, to.col))
                        == Some(Piece::new(color.opposite(), PieceKind::Pawn))
                    && !en_passant_exposes_king(game_state, from, to, color)
                {
                    out.push(Move::en_passant(from, to, pawn, &game_state.board));
                }
            }
        }
    }
}

/// En passant lifts two pawns off the board at once, which can uncover the
/// king in ways the single-piece pin analysis does not see (both pawns on the
/// king's rank, or the victim shielding a diagonal). Replay it on a scratch board.
fn en_passant_exposes_king(game_state: &GameState, from: Square, to: Square, color: Color) -> bool {
    let mut board = game_state.board;
    board[to.row as usize][to.col as usize] = board[from.row as usize][from.col as usize];
    board[from.row as usize][from.col as usize] = None;
    board[from.row as usize][to.col as usize] = None;

    pins_and_checks_on(&board, game_state.king_location(color), color).in_check
}
