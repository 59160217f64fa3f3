//! Core mutable board state.
//!
//! `GameState` owns the mailbox board, whose turn it is, the cached king
//! squares and the history stacks that make `make_move` / `undo_move` exact
//! inverses. Move generation lives in `move_generation::legal_move_generator`
//! and move execution in `move_generation::legal_move_apply`; both are `impl`
//! blocks on this type.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::moves::chess_move::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub side_to_move: Color,

    // [color] -> square, kept in sync by make/undo.
    pub king_locations: [Square; 2],

    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- History ---
    pub move_log: Vec<Move>,
    pub undo_log: Vec<UndoState>,

    // --- Set by get_valid_moves / make_move ---
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub threefold_repetition: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [[None; 8]; 8],
            side_to_move: Color::White,
            king_locations: [Square::new(7, 4), Square::new(0, 4)],
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            move_log: Vec::new(),
            undo_log: Vec::new(),
            in_check: false,
            checkmate: false,
            stalemate: false,
            threefold_repetition: false,
        }
    }
}

impl GameState {
    /// Empty board, white to move. Callers must place both kings.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, ChessErrors> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board[square.row as usize][square.col as usize] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn king_location(&self, color: Color) -> Square {
        self.king_locations[color.index()]
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.checkmate || self.stalemate || self.threefold_repetition
    }
}
