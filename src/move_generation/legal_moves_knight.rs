use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::PinsAndChecks;
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(
    game_state: &GameState,
    from: Square,
    color: Color,
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    // A knight can never stay on its pin line.
    if analysis.pin_direction(from).is_some() {
        return;
    }

    let knight = Piece::new(color, PieceKind::Knight);
    for offset in KNIGHT_OFFSETS {
        let Some(to) = from.offset(offset, 1) else {
            continue;
        };
        match game_state.piece_at(to) {
            Some(target) if target.color == color => {}
            _ => out.push(Move::new(from, to, knight, &game_state.board)),
        }
    }
}
