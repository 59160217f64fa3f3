//! Long algebraic move text (`e2e4`, `a7a8q`).
//!
//! Moves are never built from text alone: the two squares are matched
//! against a legal move list by identifier, the same way a driver matches two
//! clicked squares. A pair that matches nothing is not an error.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_types::Square;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = square_to_algebraic(mv.from);
    out.push_str(&square_to_algebraic(mv.to));
    if mv.is_pawn_promotion {
        out.push('q');
    }
    out
}

/// The legal move going from `from` to `to`, if there is one.
#[inline]
pub fn find_move_by_squares(legal_moves: &[Move], from: Square, to: Square) -> Option<Move> {
    let id = Move::id_for(from, to);
    legal_moves.iter().copied().find(|mv| mv.id() == id)
}

/// Parses `long_algebraic` and looks it up in `legal_moves`.
///
/// Malformed text is an error; a well-formed move that is not legal yields
/// `Ok(None)`. Promotions always produce a queen, so the promotion suffix is
/// accepted only as `q`.
pub fn long_algebraic_to_move(
    long_algebraic: &str,
    legal_moves: &[Move],
) -> Result<Option<Move>, ChessErrors> {
    let text = long_algebraic.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let found = find_move_by_squares(legal_moves, from, to);

    if text.len() == 5 {
        if !text[4..].eq_ignore_ascii_case("q") {
            return Err(ChessErrors::InvalidAlgebraicString(long_algebraic.to_owned()));
        }
        return Ok(found.filter(|mv| mv.is_pawn_promotion));
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameState;

    #[test]
    fn opening_push_round_trips() {
        let mut game = GameState::new_game();
        let legal = game.get_valid_moves();
        let mv = long_algebraic_to_move("e2e4", &legal)
            .expect("text should parse")
            .expect("move should be legal");
        assert_eq!(move_to_long_algebraic(&mv), "e2e4");
    }

    #[test]
    fn unmatched_squares_are_ignored() {
        let mut game = GameState::new_game();
        let legal = game.get_valid_moves();
        assert_eq!(long_algebraic_to_move("e2e5", &legal), Ok(None));
        let from = algebraic_to_square("a1").expect("square");
        let to = algebraic_to_square("a8").expect("square");
        assert_eq!(find_move_by_squares(&legal, from, to), None);
    }

    #[test]
    fn malformed_text_is_an_error() {
        let legal = GameState::new_game().get_valid_moves();
        assert!(long_algebraic_to_move("e2", &legal).is_err());
        assert!(long_algebraic_to_move("e2x4", &legal).is_err());
        assert!(long_algebraic_to_move("e7e8n", &legal).is_err());
    }

    #[test]
    fn promotion_is_written_with_a_queen_suffix() {
        let mut game = GameState::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("FEN should parse");
        let legal = game.get_valid_moves();
        let mv = long_algebraic_to_move("a7a8q", &legal)
            .expect("text should parse")
            .expect("promotion should be legal");
        assert!(mv.is_pawn_promotion);
        assert_eq!(move_to_long_algebraic(&mv), "a7a8q");
        assert_eq!(long_algebraic_to_move("a7a8", &legal).expect("text should parse"), Some(mv));
    }
}
