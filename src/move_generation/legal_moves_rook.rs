use crate::game_state::chess_rules::ROOK_DIRECTIONS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::PinsAndChecks;
use crate::move_generation::legal_move_shared::generate_sliding_moves;
use crate::moves::chess_move::Move;

pub fn generate_rook_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    let rook = Piece::new(color, PieceKind::Rook);
    generate_sliding_moves(game_state, from, rook, &ROOK_DIRECTIONS, analysis, out);
}
