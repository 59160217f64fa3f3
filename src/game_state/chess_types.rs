//! Core value types shared by the rules engine and the searcher.
//!
//! The board is addressed by `(row, col)` with row 0 holding black's back rank
//! (rank 8) and row 7 holding white's back rank (rank 1). Directions are
//! expressed as `(d_row, d_col)` unit steps.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a pawn push for this color.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Board coordinate. `row` 0 is rank 8, `col` 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Steps `distance` times along `direction`, or `None` when that leaves the board.
    #[inline]
    pub fn offset(self, direction: Direction, distance: i8) -> Option<Square> {
        let row = self.row as i8 + direction.0 * distance;
        let col = self.col as i8 + direction.1 * distance;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

/// Unit step `(d_row, d_col)`. Knight offsets reuse the same shape.
pub type Direction = (i8, i8);

pub type Board = [[Option<Piece>; 8]; 8];

/// The four independent castling permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    #[inline]
    pub const fn king_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_side,
            Color::Black => self.black_king_side,
        }
    }

    #[inline]
    pub const fn queen_side(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queen_side,
            Color::Black => self.black_queen_side,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_king_side = false;
                self.white_queen_side = false;
            }
            Color::Black => {
                self.black_king_side = false;
                self.black_queen_side = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_on_board() {
        let corner = Square::new(0, 0);
        assert_eq!(corner.offset((-1, 0), 1), None);
        assert_eq!(corner.offset((1, 1), 7), Some(Square::new(7, 7)));
        assert_eq!(corner.offset((2, 1), 1), Some(Square::new(2, 1)));
    }

    #[test]
    fn revoking_one_color_leaves_the_other_intact() {
        let mut rights = CastlingRights::ALL;
        rights.revoke_all(Color::White);
        assert!(!rights.king_side(Color::White));
        assert!(!rights.queen_side(Color::White));
        assert!(rights.king_side(Color::Black));
        assert!(rights.queen_side(Color::Black));
    }
}
