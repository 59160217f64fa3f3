use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `undo_move`, pushed in lockstep with the move log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoState {
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,
    pub prev_in_check: bool,
    pub prev_threefold_repetition: bool,
}
