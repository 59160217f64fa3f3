//! Move-path enumeration for validating the generator.
//!
//! Walks the game tree with `make_move` / `undo_move` on a single state and
//! tallies leaf nodes together with a few move-kind counters.

use crate::game_state::game_state::GameState;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checkmates: usize,
}

pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(game_state, depth, &mut counts);
    counts
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let moves = game_state.get_valid_moves();

    for mv in moves {
        game_state.make_move(mv);

        if depth == 1 {
            counts.nodes += 1;
            counts.captures += usize::from(mv.is_capture);
            counts.en_passant += usize::from(mv.is_en_passant);
            counts.castles += usize::from(mv.is_castle);
            counts.promotions += usize::from(mv.is_pawn_promotion);
            if game_state.get_valid_moves().is_empty() && game_state.checkmate {
                counts.checkmates += 1;
            }
        } else {
            perft_recurse(game_state, depth - 1, counts);
        }

        game_state.undo_move();
    }
}

/// Leaf count only; skips the per-leaf mate probe.
pub fn perft_nodes(game_state: &mut GameState, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }

    let moves = game_state.get_valid_moves();
    if depth == 1 {
        return moves.len();
    }

    let mut nodes = 0;
    for mv in moves {
        game_state.make_move(mv);
        nodes += perft_nodes(game_state, depth - 1);
        game_state.undo_move();
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE_FEN: &str =
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&mut game, 0), PerftCounts { nodes: 1, ..PerftCounts::default() });
    }

    #[test]
    fn start_position_node_counts() {
        let mut game = GameState::new_game();
        assert_eq!(perft_nodes(&mut game, 1), 20);
        assert_eq!(perft_nodes(&mut game, 2), 400);
        assert_eq!(perft_nodes(&mut game, 3), 8902);
    }

    #[test]
    fn start_position_depth_three_breakdown() {
        let mut game = GameState::new_game();
        let counts = perft(&mut game, 3);
        assert_eq!(counts.nodes, 8902);
        assert_eq!(counts.captures, 34);
        assert_eq!(counts.checkmates, 0);
    }

    #[test]
    fn kiwipete_counts_cover_castling_and_pins() {
        let mut game = GameState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
        let counts = perft(&mut game, 1);
        assert_eq!(counts.nodes, 48);
        assert_eq!(counts.captures, 8);
        assert_eq!(counts.castles, 2);
        assert_eq!(perft_nodes(&mut game, 2), 2039);
    }

    #[test]
    fn endgame_counts_cover_en_passant_discoveries() {
        let mut game = GameState::from_fen(ENDGAME_FEN).expect("FEN should parse");
        assert_eq!(perft_nodes(&mut game, 1), 14);
        assert_eq!(perft_nodes(&mut game, 2), 191);
        assert_eq!(perft_nodes(&mut game, 3), 2812);
    }

    #[test]
    fn perft_leaves_the_state_untouched() {
        let mut game = GameState::from_fen(KIWIPETE_FEN).expect("FEN should parse");
        game.get_valid_moves();
        let before = game.clone();
        perft_nodes(&mut game, 2);
        game.get_valid_moves();
        assert_eq!(game, before);
    }
}
