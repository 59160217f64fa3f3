//! Static evaluation: material plus piece-square tables.
//!
//! Search stays independent of the heuristic by going through the
//! `BoardScorer` trait. Scores are white-positive; the searcher multiplies by
//! its turn multiplier to get the side-to-move view.

use crate::game_state::{chess_types::*, game_state::GameState};

pub const CHECKMATE: i32 = 60_000;
pub const STALEMATE: i32 = 0;

pub trait BoardScorer {
    /// Score from white's perspective.
    fn score(&self, game_state: &GameState) -> i32;
}

#[inline]
pub const fn piece_value(piece: PieceKind) -> i32 {
    match piece {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 320,
        PieceKind::Bishop => 330,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20_000,
    }
}

// Positional bonuses from white's point of view, index = row * 8 + col
// with row 0 being the eighth rank.
#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 20, 30,  0,  0, 10, 30, 20,
];

const fn with_material(table: [i32; 64], piece: PieceKind) -> [i32; 64] {
    let mut out = table;
    let mut i = 0;
    while i < 64 {
        out[i] += piece_value(piece);
        i += 1;
    }
    out
}

/// Material plus position, indexed by `PieceKind::index()`.
pub const PIECE_SQUARE_TABLES: [[i32; 64]; 6] = [
    with_material(PAWN_TABLE, PieceKind::Pawn),
    with_material(KNIGHT_TABLE, PieceKind::Knight),
    with_material(BISHOP_TABLE, PieceKind::Bishop),
    with_material(ROOK_TABLE, PieceKind::Rook),
    with_material(QUEEN_TABLE, PieceKind::Queen),
    with_material(KING_TABLE, PieceKind::King),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PieceSquareScorer;

impl BoardScorer for PieceSquareScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        if game_state.checkmate {
            return match game_state.side_to_move {
                Color::White => -CHECKMATE,
                Color::Black => CHECKMATE,
            };
        }
        if game_state.stalemate {
            return STALEMATE;
        }

        let mut score = 0;
        for (row, rank) in game_state.board.iter().enumerate() {
            for (col, square) in rank.iter().enumerate() {
                let Some(piece) = square else {
                    continue;
                };
                let table = &PIECE_SQUARE_TABLES[piece.kind.index()];
                match piece.color {
                    Color::White => score += table[row * 8 + col],
                    // Tables are authored for white; mirror the row for black.
                    Color::Black => score -= table[(7 - row) * 8 + col],
                }
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let game = GameState::new_game();
        assert_eq!(PieceSquareScorer.score(&game), 0);
    }

    #[test]
    fn tables_include_material() {
        assert_eq!(PIECE_SQUARE_TABLES[PieceKind::Pawn.index()][8], 150);
        assert_eq!(PIECE_SQUARE_TABLES[PieceKind::King.index()][62], 20_030);
    }

    #[test]
    fn extra_queen_dominates() {
        let game = GameState::from_fen("3qk3/8/8/8/8/8/8/3QK2Q w - - 0 1").expect("FEN should parse");
        assert!(PieceSquareScorer.score(&game) > 800);
    }

    #[test]
    fn checkmate_scores_against_the_mated_side() {
        let mut game =
            GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN should parse");
        assert!(game.get_valid_moves().is_empty());
        assert_eq!(PieceSquareScorer.score(&game), CHECKMATE);
    }

    #[test]
    fn stalemate_scores_zero() {
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
        assert!(game.get_valid_moves().is_empty());
        assert_eq!(PieceSquareScorer.score(&game), STALEMATE);
    }
}
