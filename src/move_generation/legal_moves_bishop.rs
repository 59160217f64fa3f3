use crate::game_state::chess_rules::BISHOP_DIRECTIONS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::PinsAndChecks;
use crate::move_generation::legal_move_shared::generate_sliding_moves;
use crate::moves::chess_move::Move;

pub fn generate_bishop_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    let bishop = Piece::new(color, PieceKind::Bishop);
    generate_sliding_moves(game_state, from, bishop, &BISHOP_DIRECTIONS, analysis, out);
}
