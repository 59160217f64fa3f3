//! Fixed-depth principal variation search with a captures-only quiescence
//! extension.
//!
//! Scores are fail-hard and side-to-move positive: every recursive call flips
//! the window and the turn multiplier and negates the returned score. The
//! search walks a single `GameState` through strictly nested
//! `make_move` / `undo_move` pairs, so the state is unchanged on return.

use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::search::board_scoring::{BoardScorer, CHECKMATE, STALEMATE};
use crate::search::move_ordering::order_moves;

pub const DEPTH: u8 = 5;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { depth: DEPTH }
    }
}

/// Per-call bookkeeping. Build a fresh one for every root search.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchContext {
    pub best_move: Option<Move>,
    pub best_score: Option<i32>,
    pub nodes: u64,
}

/// +1 when white is to move, -1 otherwise.
#[inline]
pub fn turn_multiplier_for(game_state: &GameState) -> i32 {
    match game_state.side_to_move {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Searches the side to move with a full `[-CHECKMATE, CHECKMATE]` window.
pub fn search_root<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    config: SearchConfig,
) -> SearchContext {
    let mut ctx = SearchContext::default();
    let turn_multiplier = turn_multiplier_for(game_state);
    principal_variation_search(
        game_state,
        scorer,
        &mut ctx,
        -CHECKMATE,
        CHECKMATE,
        config.depth,
        turn_multiplier,
        0,
    );
    ctx
}

#[allow(clippy::too_many_arguments)]
pub fn principal_variation_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    depth: u8,
    turn_multiplier: i32,
    ply: u8,
) -> i32 {
    if ply > 0 && game_state.threefold_repetition {
        ctx.nodes += 1;
        return STALEMATE;
    }

    if depth == 0 {
        return quiescence_search(game_state, scorer, ctx, alpha, beta, turn_multiplier, ply);
    }

    ctx.nodes += 1;
    let mut moves = game_state.get_valid_moves();
    if moves.is_empty() {
        return terminal_score(game_state, ply);
    }
    order_moves(&mut moves);

    let mut search_pv = true;
    for mv in moves {
        game_state.make_move(mv);
        let score = if search_pv {
            -principal_variation_search(
                game_state,
                scorer,
                ctx,
                -beta,
                -alpha,
                depth - 1,
                -turn_multiplier,
                ply + 1,
            )
        } else {
            let probe = -principal_variation_search(
                game_state,
                scorer,
                ctx,
                -alpha - 1,
                -alpha,
                depth - 1,
                -turn_multiplier,
                ply + 1,
            );
            if probe > alpha && probe < beta {
                -principal_variation_search(
                    game_state,
                    scorer,
                    ctx,
                    -beta,
                    -alpha,
                    depth - 1,
                    -turn_multiplier,
                    ply + 1,
                )
            } else {
                probe
            }
        };
        game_state.undo_move();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
            search_pv = false;
            if ply == 0 {
                ctx.best_move = Some(mv);
                ctx.best_score = Some(score);
            }
        }
    }

    alpha
}

/// Stand-pat search over captures only.
pub fn quiescence_search<S: BoardScorer>(
    game_state: &mut GameState,
    scorer: &S,
    ctx: &mut SearchContext,
    mut alpha: i32,
    beta: i32,
    turn_multiplier: i32,
    ply: u8,
) -> i32 {
    ctx.nodes += 1;
    if ply > 0 && game_state.threefold_repetition {
        return STALEMATE;
    }

    // Generating first refreshes the mate/stalemate flags, so a terminal
    // position at the horizon is never scored as a material count.
    let moves = game_state.get_valid_moves();
    if moves.is_empty() {
        return terminal_score(game_state, ply);
    }

    let stand_pat = scorer.score(game_state) * turn_multiplier;
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut captures: Vec<Move> = moves.into_iter().filter(|mv| mv.is_capture).collect();
    order_moves(&mut captures);

    for mv in captures {
        game_state.make_move(mv);
        let score = -quiescence_search(
            game_state,
            scorer,
            ctx,
            -beta,
            -alpha,
            -turn_multiplier,
            ply.saturating_add(1),
        );
        game_state.undo_move();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// Score of a node with no legal moves, from the side to move. Nearer mates
/// score further from zero.
#[inline]
fn terminal_score(game_state: &GameState, ply: u8) -> i32 {
    if game_state.checkmate {
        -(CHECKMATE - i32::from(ply))
    } else {
        STALEMATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::PieceKind;
    use crate::search::board_scoring::PieceSquareScorer;
    use crate::utils::long_algebraic::move_to_long_algebraic;

    fn search(fen: &str, depth: u8) -> (GameState, SearchContext) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let ctx = search_root(&mut game, &PieceSquareScorer, SearchConfig { depth });
        (game, ctx)
    }

    #[test]
    fn default_depth_is_five() {
        assert_eq!(SearchConfig::default().depth, 5);
    }

    #[test]
    fn finds_back_rank_mate_in_one() {
        let (_, ctx) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 3);
        let best = ctx.best_move.expect("a move should be found");
        assert_eq!(move_to_long_algebraic(&best), "a1a8");
        assert_eq!(ctx.best_score, Some(CHECKMATE - 1));
    }

    #[test]
    fn black_also_finds_mate_in_one() {
        // Mirror of the back-rank mate for black.
        let (_, ctx) = search("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1", 3);
        let best = ctx.best_move.expect("a move should be found");
        assert_eq!(move_to_long_algebraic(&best), "a8a1");
    }

    #[test]
    fn captures_a_hanging_queen() {
        let (_, ctx) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 2);
        let best = ctx.best_move.expect("a move should be found");
        assert_eq!(move_to_long_algebraic(&best), "d1d5");
        assert_eq!(best.piece_captured.map(|p| p.kind), Some(PieceKind::Queen));
    }

    #[test]
    fn quiescence_never_scores_below_stand_pat() {
        let mut game = GameState::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").expect("FEN should parse");
        let stand_pat = PieceSquareScorer.score(&game);
        let mut ctx = SearchContext::default();
        let score =
            quiescence_search(&mut game, &PieceSquareScorer, &mut ctx, -CHECKMATE, CHECKMATE, 1, 1);
        assert!(score >= stand_pat);
        // Rook takes queen is better than standing pat.
        assert!(score > stand_pat + 500);
    }

    #[test]
    fn root_score_never_falls_below_stand_pat() {
        // At depth 1 every reply is resolved by quiescence.
        let (game, ctx) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 1);
        let stand_pat = PieceSquareScorer.score(&game);
        let best_score = ctx.best_score.expect("the root should record a score");
        assert!(best_score >= stand_pat);
        assert_eq!(ctx.best_move.map(|mv| move_to_long_algebraic(&mv)), Some("d1d5".to_owned()));
    }

    #[test]
    fn search_leaves_the_state_untouched() {
        let mut game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("FEN should parse");
        game.get_valid_moves();
        let before = game.clone();
        search_root(&mut game, &PieceSquareScorer, SearchConfig { depth: 2 });
        game.get_valid_moves();
        assert_eq!(game, before);
    }

    #[test]
    fn mated_root_has_no_best_move() {
        let (_, ctx) = search("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3);
        assert_eq!(ctx.best_move, None);
        assert!(ctx.nodes >= 1);
    }

    #[test]
    fn fresh_context_per_search() {
        let mut game = GameState::new_game();
        let first = search_root(&mut game, &PieceSquareScorer, SearchConfig { depth: 2 });
        let second = search_root(&mut game, &PieceSquareScorer, SearchConfig { depth: 2 });
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.nodes, second.nodes);
    }
}
