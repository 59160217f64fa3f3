//! Canonical chess-rule constants.
//!
//! Starting position, home squares and the direction tables used by the ray
//! casting legality checks and the piece generators.

use crate::game_state::chess_types::{Color, Direction, Square};

pub const BOARD_SIZE: usize = 8;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rays cast outward from the king: four orthogonals first, then four diagonals.
pub const KING_RAY_DIRECTIONS: [Direction; 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
];

pub const ROOK_DIRECTIONS: [Direction; 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [(-1, 1), (-1, -1), (1, -1), (1, 1)];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (2, -1),
    (2, 1),
    (1, -2),
    (1, 2),
];

#[inline]
pub const fn is_orthogonal(direction: Direction) -> bool {
    direction.0 == 0 || direction.1 == 0
}

#[inline]
pub const fn back_row(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

#[inline]
pub const fn pawn_start_row(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row a pawn must stand on to capture en passant.
#[inline]
pub const fn en_passant_row(color: Color) -> u8 {
    match color {
        Color::White => 3,
        Color::Black => 4,
    }
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    Square::new(back_row(color), 4)
}

#[inline]
pub const fn king_side_rook_home(color: Color) -> Square {
    Square::new(back_row(color), 7)
}

#[inline]
pub const fn queen_side_rook_home(color: Color) -> Square {
    Square::new(back_row(color), 0)
}
