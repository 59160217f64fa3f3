//! MVV-LVA move ordering.
//!
//! Captures of valuable pieces by cheap attackers go first, then promotions,
//! with castling pushed ahead of everything. Ties keep generation order.

use std::cmp::Reverse;

use crate::game_state::chess_types::PieceKind;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::piece_value;

pub const PROMOTION_BONUS: i32 = piece_value(PieceKind::Queen);
pub const CASTLE_BONUS: i32 = 10_000;

#[inline]
pub fn move_order_score(mv: &Move) -> i32 {
    let mut score = 0;
    if let Some(victim) = mv.piece_captured {
        score += 10 * piece_value(victim.kind) - piece_value(mv.piece_moved.kind);
    }
    if mv.is_pawn_promotion {
        score += PROMOTION_BONUS;
    }
    if mv.is_castle {
        score += CASTLE_BONUS;
    }
    score
}

/// Sorts descending by `move_order_score`. The sort is stable.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(move_order_score(mv)));
}
