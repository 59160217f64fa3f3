//! Fixed-depth PVS engine.
//!
//! `Searcher::find_move` is the entry point used by the driver: it searches
//! the live state in place and always answers with one of the supplied moves.

use std::time::Instant;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, PieceSquareScorer};
use crate::search::principal_variation::{search_root, SearchConfig, SearchContext};
use crate::utils::long_algebraic::move_to_long_algebraic;

pub struct Searcher<S: BoardScorer = PieceSquareScorer> {
    config: SearchConfig,
    scorer: S,
}

impl Searcher<PieceSquareScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, PieceSquareScorer)
    }

    pub fn with_depth(depth: u8) -> Self {
        Self::new(SearchConfig { depth })
    }
}

impl Default for Searcher<PieceSquareScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> Searcher<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self { config, scorer }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Best move for the side to move, or the first of `legal_moves` when the
    /// search produces no candidate. `None` only for an empty list.
    pub fn find_move(&self, game_state: &mut GameState, legal_moves: &[Move]) -> Option<Move> {
        self.find_move_with_stats(game_state, legal_moves).0
    }

    /// `find_move` plus the context of the search that produced it.
    pub fn find_move_with_stats(
        &self,
        game_state: &mut GameState,
        legal_moves: &[Move],
    ) -> (Option<Move>, SearchContext) {
        let ctx = search_root(game_state, &self.scorer, self.config);
        let best_move = ctx
            .best_move
            .filter(|mv| legal_moves.contains(mv))
            .or_else(|| legal_moves.first().copied());
        (best_move, ctx)
    }
}

impl<S: BoardScorer> Engine for Searcher<S> {
    fn name(&self) -> &str {
        "RayChess PVS"
    }

    fn choose_move(&mut self, game_state: &mut GameState, legal_moves: &[Move]) -> EngineOutput {
        let started = Instant::now();
        let (best_move, ctx) = self.find_move_with_stats(game_state, legal_moves);
        let elapsed_ms = started.elapsed().as_millis();

        let mut out = EngineOutput {
            best_move,
            ..EngineOutput::default()
        };
        let score = ctx
            .best_score
            .map_or_else(|| "none".to_owned(), |score| format!("cp {score}"));
        out.info_lines.push(format!(
            "info depth {} score {} nodes {} time {}",
            self.config.depth, score, ctx.nodes, elapsed_ms
        ));
        if ctx.best_move.is_none() && best_move.is_some() {
            out.info_lines
                .push("info string pvs_engine fallback_to_first_move".to_owned());
        }
        if let Some(mv) = best_move {
            out.info_lines
                .push(format!("info string pvs_engine bestmove {}", move_to_long_algebraic(&mv)));
        }
        out
    }
}
