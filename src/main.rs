//! Console driver: a human plays the engine in the terminal.
//!
//! Run with:
//! `cargo run --release -- --depth 4`
//! `cargo run --release -- --black --random --seed 7`
//!
//! Moves are typed in long algebraic form (`e2e4`). `undo` takes back the
//! last full move, `pgn` prints the game so far and `quit` ends the session.

use std::io::{self, BufRead, Write};

use ray_chess::engines::engine_pvs::Searcher;
use ray_chess::engines::engine_random::RandomEngine;
use ray_chess::engines::engine_trait::Engine;
use ray_chess::game_state::{chess_types::Color, game_state::GameState};
use ray_chess::search::principal_variation::SearchConfig;
use ray_chess::utils::long_algebraic::{long_algebraic_to_move, move_to_long_algebraic};
use ray_chess::utils::pgn::{game_result, write_pgn};
use ray_chess::utils::render_game_state::render_game_state;

#[derive(Debug, Clone, Copy)]
struct DriverOptions {
    depth: u8,
    human: Color,
    random: bool,
    seed: Option<u64>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            depth: SearchConfig::default().depth,
            human: Color::White,
            random: false,
            seed: None,
        }
    }
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<DriverOptions, String> {
    let mut options = DriverOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--depth" => {
                let value = args.next().ok_or("--depth needs a value")?;
                options.depth = value
                    .parse::<u8>()
                    .map_err(|_| format!("invalid depth: {value}"))?;
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                options.seed = Some(
                    value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed: {value}"))?,
                );
            }
            "--black" => options.human = Color::Black,
            "--random" => options.random = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

fn build_engine(options: DriverOptions) -> Box<dyn Engine> {
    if options.random {
        match options.seed {
            Some(seed) => Box::new(RandomEngine::with_seed(seed)),
            None => Box::new(RandomEngine::new()),
        }
    } else {
        Box::new(Searcher::with_depth(options.depth))
    }
}

fn main() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1))?;
    let mut engine = build_engine(options);
    engine.new_game();

    let initial = GameState::new_game();
    let mut game = initial.clone();

    println!("{} plays {:?}", engine.name(), options.human.opposite());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n{}\n", render_game_state(&game));

        let legal = game.get_valid_moves();
        if game.is_game_over() {
            let result = game_result(&mut game);
            println!("game over: {result}");
            println!("{}", write_pgn(&initial, &game.move_log, result).map_err(|e| e.to_string())?);
            return Ok(());
        }

        if game.side_to_move != options.human {
            let output = engine.choose_move(&mut game, &legal);
            for line in &output.info_lines {
                println!("{line}");
            }
            let Some(mv) = output.best_move else {
                return Err("engine returned no move".to_owned());
            };
            println!("engine plays {}", move_to_long_algebraic(&mv));
            game.make_move(mv);
            continue;
        }

        print!("{:?} to move> ", game.side_to_move);
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.map_err(|e| e.to_string())?;

        match line.trim() {
            "" => {}
            "quit" => return Ok(()),
            "undo" => {
                game.undo_move();
                if game.side_to_move != options.human {
                    game.undo_move();
                }
            }
            "pgn" => {
                let pgn = write_pgn(&initial, &game.move_log, "*").map_err(|e| e.to_string())?;
                println!("{pgn}");
            }
            text => match long_algebraic_to_move(text, &legal) {
                Ok(Some(mv)) => game.make_move(mv),
                // Squares that match no legal move are ignored.
                Ok(None) => {}
                Err(e) => println!("{e}"),
            },
        }
    }
}
