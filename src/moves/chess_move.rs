//! Immutable move record.
//!
//! A `Move` remembers everything needed to undo it (moved and captured piece,
//! special-move flags). Equality and hashing use only the identifier derived
//! from the two squares, so a candidate built from two clicked squares matches
//! the generated move regardless of its side effects.

use std::hash::{Hash, Hasher};

use crate::game_state::chess_rules::back_row;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece_moved: Piece,
    pub piece_captured: Option<Piece>,
    pub is_capture: bool,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_pawn_promotion: bool,
}

impl Move {
    /// Ordinary move or capture; the captured piece is read from `board[to]`.
    pub fn new(from: Square, to: Square, piece_moved: Piece, board: &Board) -> Self {
        let piece_captured = board[to.row as usize][to.col as usize];
        Self::build(from, to, piece_moved, piece_captured, false, false)
    }

    /// En-passant capture; the victim sits beside `from` on the destination column.
    pub fn en_passant(from: Square, to: Square, piece_moved: Piece, board: &Board) -> Self {
        let piece_captured = board[from.row as usize][to.col as usize];
        Self::build(from, to, piece_moved, piece_captured, true, false)
    }

    pub fn castle(from: Square, to: Square, piece_moved: Piece) -> Self {
        Self::build(from, to, piece_moved, None, false, true)
    }

    fn build(
        from: Square,
        to: Square,
        piece_moved: Piece,
        piece_captured: Option<Piece>,
        is_en_passant: bool,
        is_castle: bool,
    ) -> Self {
        let is_pawn_promotion = piece_moved.kind == PieceKind::Pawn
            && to.row == back_row(piece_moved.color.opposite());
        Self {
            from,
            to,
            piece_moved,
            piece_captured,
            is_capture: piece_captured.is_some(),
            is_en_passant,
            is_castle,
            is_pawn_promotion,
        }
    }

    /// `r1 c1 r2 c2` packed as decimal digits.
    #[inline]
    pub fn id(&self) -> u16 {
        Self::id_for(self.from, self.to)
    }

    #[inline]
    pub fn id_for(from: Square, to: Square) -> u16 {
        from.row as u16 * 1000 + from.col as u16 * 100 + to.row as u16 * 10 + to.col as u16
    }

    /// Square emptied by an en-passant capture.
    #[inline]
    pub fn en_passant_victim_square(&self) -> Square {
        Square::new(self.from.row, self.to.col)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
