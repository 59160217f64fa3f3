//! Uniform random-move engine.
//!
//! Used as a sparring partner in the console driver and to drive random
//! playouts in tests. A seed makes the sequence of picks reproducible.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, legal_moves: &[Move]) -> Option<Move> {
        legal_moves.choose(&mut self.rng).copied()
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "RayChess Random"
    }

    fn choose_move(&mut self, _game_state: &mut GameState, legal_moves: &[Move]) -> EngineOutput {
        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));
        out.best_move = self.pick(legal_moves);
        out
    }
}
