//! Engine abstraction shared by the console driver and the benches.
//!
//! An engine receives the live game state together with the caller's legal
//! move list and answers with a move plus UCI-style `info string` lines.

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<Move>,
    pub info_lines: Vec<String>,
}

pub trait Engine {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Picks one of `legal_moves`. The state may be walked through
    /// make/undo pairs but must be left as it was found.
    fn choose_move(&mut self, game_state: &mut GameState, legal_moves: &[Move]) -> EngineOutput;
}
