//! Errors returned by the text-facing surfaces of the crate.
//!
//! Move generation, make/undo and search never fail; only parsing of
//! algebraic squares, FEN, long algebraic moves and PGN can. `ChessErrors`
//! is the single error type for those paths. Each variant carries the
//! offending input so callers can report precise diagnostics.

use std::fmt;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A square such as `"e4"` could not be parsed.
    ///
    /// Payload: the original string.
    InvalidAlgebraicString(String),

    /// Unexpected character in the piece placement field of a FEN string.
    InvalidFenToken(char),

    /// FEN string with a malformed field.
    ///
    /// Payload: a description of the field that failed.
    InvalidFenString(String),

    /// A position must hold exactly one king per side.
    ///
    /// Payload: (color, number of kings found).
    KingCount(Color, usize),

    /// A long algebraic move was well formed but is not legal in the position.
    IllegalMove(String),

    /// A PGN tag pair could not be read.
    InvalidPgnHeader(String),
}

impl fmt::Display for ChessErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessErrors::InvalidAlgebraicString(s) => write!(f, "invalid algebraic string: {s}"),
            ChessErrors::InvalidFenToken(ch) => write!(f, "invalid FEN token: {ch}"),
            ChessErrors::InvalidFenString(s) => write!(f, "invalid FEN string: {s}"),
            ChessErrors::KingCount(color, count) => {
                write!(f, "expected exactly one {color:?} king, found {count}")
            }
            ChessErrors::IllegalMove(s) => write!(f, "illegal move: {s}"),
            ChessErrors::InvalidPgnHeader(s) => write!(f, "invalid PGN header: {s}"),
        }
    }
}

impl std::error::Error for ChessErrors {}
