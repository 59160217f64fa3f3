//! King steps and castling.
//!
//! Every candidate square is probed with the ray-cast check detector as if the
//! king already stood there, so king moves need no pin bookkeeping.

use crate::game_state::chess_rules::KING_RAY_DIRECTIONS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked_for, PinsAndChecks};
use crate::moves::chess_move::Move;

pub fn generate_king_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    let king = Piece::new(color, PieceKind::King);

    for direction in KING_RAY_DIRECTIONS {
        let Some(to) = from.offset(direction, 1) else {
            continue;
        };
        if matches!(game_state.piece_at(to), Some(target) if target.color == color) {
            continue;
        }
        if !is_square_attacked_for(game_state, to, color) {
            out.push(Move::new(from, to, king, &game_state.board));
        }
    }

    generate_castling_moves(game_state, from, color, analysis, out);
}

fn generate_castling_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    // Cannot castle out of check.
    if analysis.in_check {
        return;
    }

    let king = Piece::new(color, PieceKind::King);
    let rights = game_state.castling_rights;
    let square = |col: u8| Square::new(from.row, col);
    let safe = |col: u8| !is_square_attacked_for(game_state, square(col), color);

    if rights.king_side(color) && from.col == 4 {
        let f = from.col + 1;
        let g = from.col + 2;
        if game_state.is_empty(square(f)) && game_state.is_empty(square(g)) && safe(f) && safe(g) {
            out.push(Move::castle(from, square(g), king));
        }
    }

    if rights.queen_side(color) && from.col == 4 {
        let d = from.col - 1;
        let c = from.col - 2;
        let b = from.col - 3;
        if game_state.is_empty(square(d))
            && game_state.is_empty(square(c))
            && game_state.is_empty(square(b))
            && safe(d)
            && safe(c)
        {
            out.push(Move::castle(from, square(c), king));
        }
    }
}
