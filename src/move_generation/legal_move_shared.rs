use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::PinsAndChecks;
use crate::moves::chess_move::Move;

/// Whether a piece with the given pin line may step along `direction`.
/// Pinned pieces keep every square on the pin line, on either side of themselves.
#[inline]
pub fn along_pin_line(pin: Option<Direction>, direction: Direction) -> bool {
    match pin {
        None => true,
        Some(pin) => pin == direction || pin == (-direction.0, -direction.1),
    }
}

/// Shared walker for bishops, rooks and queens: each ray runs until the board
/// edge, stops before a friendly piece and stops after capturing an enemy one.
pub fn generate_sliding_moves(
    game_state: &GameState,
    from: Square,
    piece: Piece,
    directions: &[Direction],
    analysis: &PinsAndChecks,
    out: &mut Vec<Move>,
) {
    let pin = analysis.pin_direction(from);

    for &direction in directions {
        if !along_pin_line(pin, direction) {
            continue;
        }

        for distance in 1..8 {
            let Some(to) = from.offset(direction, distance) else {
                break;
            };
            match game_state.piece_at(to) {
                None => out.push(Move::new(from, to, piece, &game_state.board)),
                Some(target) if target.color != piece.color => {
                    out.push(Move::new(from, to, piece, &game_state.board));
                    break;
                }
                Some(_) => break,
            }
        }
    }
}
