use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use ray_chess::game_state::game_state::GameState;
use ray_chess::move_generation::perft::perft_nodes;

/// Leaf counts the move generator is held to, one entry per depth from 1.
struct PerftCase {
    name: &'static str,
    fen: &'static str,
    leaves: &'static [usize],
}

const CASES: &[PerftCase] = &[
    PerftCase {
        name: "opening",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        leaves: &[20, 400, 8902],
    },
    PerftCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        leaves: &[48, 2039],
    },
    PerftCase {
        name: "rook_endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        leaves: &[14, 191, 2812],
    },
];

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        // Only the deepest count is timed; the shallower ones are checked once.
        let mut check = game.clone();
        for (depth, &leaves) in (1u8..).zip(case.leaves) {
            assert_eq!(perft_nodes(&mut check, depth), leaves, "{} depth {}", case.name, depth);
        }

        let depth = case.leaves.len() as u8;
        let leaves = case.leaves[case.leaves.len() - 1];
        group.throughput(Throughput::Elements(leaves as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_d{}", case.name, depth)),
            &depth,
            |b, &depth| {
                let mut state = game.clone();
                b.iter(|| black_box(perft_nodes(black_box(&mut state), depth)));
            },
        );
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);
