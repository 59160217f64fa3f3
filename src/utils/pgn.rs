//! PGN read/write utilities for game history interchange.
//!
//! Serializes a move history and headers to PGN text with long algebraic
//! movetext, and replays PGN text back into a game state. Every move is
//! checked against the legal move list while replaying.

use std::collections::BTreeMap;

use chrono::Local;

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{chess_types::Color, game_state::GameState};
use crate::moves::chess_move::Move;
use crate::utils::long_algebraic::{
    find_move_by_squares, long_algebraic_to_move, move_to_long_algebraic,
};

#[derive(Debug, Clone)]
pub struct PgnGame {
    pub headers: BTreeMap<String, String>,
    pub initial_state: GameState,
    pub move_history: Vec<Move>,
    pub final_state: GameState,
    pub result: String,
}

/// PGN result token for a finished or ongoing game. Refreshes the terminal
/// flags of `game_state`.
pub fn game_result(game_state: &mut GameState) -> &'static str {
    game_state.get_valid_moves();
    if game_state.checkmate {
        match game_state.side_to_move {
            Color::White => "0-1",
            Color::Black => "1-0",
        }
    } else if game_state.stalemate || game_state.threefold_repetition {
        "1/2-1/2"
    } else {
        "*"
    }
}

pub fn write_pgn(
    initial_state: &GameState,
    move_history: &[Move],
    result: &str,
) -> Result<String, ChessErrors> {
    let mut headers = BTreeMap::<String, String>::new();
    headers.insert("Event".to_owned(), "Ray Chess Game".to_owned());
    headers.insert("Site".to_owned(), "Local".to_owned());
    headers.insert("Date".to_owned(), Local::now().format("%Y.%m.%d").to_string());
    headers.insert("Round".to_owned(), "-".to_owned());
    headers.insert("White".to_owned(), "White".to_owned());
    headers.insert("Black".to_owned(), "Black".to_owned());
    headers.insert("Result".to_owned(), normalize_result(result).to_owned());

    let initial_fen = initial_state.get_fen();
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp".to_owned(), "1".to_owned());
        headers.insert("FEN".to_owned(), initial_fen);
    }

    write_pgn_with_headers(initial_state, move_history, &headers)
}

pub fn write_pgn_with_headers(
    initial_state: &GameState,
    move_history: &[Move],
    headers: &BTreeMap<String, String>,
) -> Result<String, ChessErrors> {
    let mut out = String::new();

    for (key, value) in headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut state = initial_state.clone();
    let mut movetext_parts = Vec::<String>::with_capacity(move_history.len() + 1);
    for (ply, mv) in move_history.iter().enumerate() {
        let legal = state.get_valid_moves();
        let mv = find_move_by_squares(&legal, mv.from, mv.to)
            .ok_or_else(|| ChessErrors::IllegalMove(move_to_long_algebraic(mv)))?;
        let lan = move_to_long_algebraic(&mv);
        if ply % 2 == 0 {
            movetext_parts.push(format!("{}. {}", (ply / 2) + 1, lan));
        } else {
            movetext_parts.push(lan);
        }
        state.make_move(mv);
    }

    let result = headers
        .get("Result")
        .map(|x| normalize_result(x))
        .unwrap_or("*");
    movetext_parts.push(result.to_owned());
    out.push_str(&movetext_parts.join(" "));
    out.push('\n');

    Ok(out)
}

pub fn read_pgn(pgn: &str) -> Result<PgnGame, ChessErrors> {
    let mut headers = BTreeMap::<String, String>::new();
    let mut movetext_lines = Vec::<String>::new();

    for line in pgn.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('[') {
            let (k, v) = parse_header_line(trimmed)?;
            headers.insert(k, v);
        } else {
            movetext_lines.push(trimmed.to_owned());
        }
    }

    let initial_state = if headers.get("SetUp").map(|x| x.as_str()) == Some("1") {
        let fen = headers.get("FEN").ok_or_else(|| {
            ChessErrors::InvalidPgnHeader("SetUp is 1 but the FEN header is missing".to_owned())
        })?;
        GameState::from_fen(fen)?
    } else {
        GameState::new_game()
    };

    let mut state = initial_state.clone();
    let mut move_history = Vec::<Move>::new();
    let mut result = "*".to_owned();

    let movetext = strip_pgn_comments_and_variations(&movetext_lines.join(" "));
    for token in movetext.split_whitespace() {
        if is_move_number_token(token) {
            continue;
        }

        let cleaned = trim_annotation_suffix(token);
        if is_result_token(cleaned) {
            result = normalize_result(cleaned).to_owned();
            break;
        }

        let legal = state.get_valid_moves();
        let mv = long_algebraic_to_move(cleaned, &legal)?
            .ok_or_else(|| ChessErrors::IllegalMove(cleaned.to_owned()))?;
        state.make_move(mv);
        move_history.push(mv);
    }

    if let Some(header_result) = headers.get("Result") {
        result = normalize_result(header_result).to_owned();
    }

    Ok(PgnGame {
        headers,
        initial_state,
        move_history,
        final_state: state,
        result,
    })
}

fn parse_header_line(line: &str) -> Result<(String, String), ChessErrors> {
    if !line.starts_with('[') || !line.ends_with(']') {
        return Err(ChessErrors::InvalidPgnHeader(line.to_owned()));
    }
    let inner = &line[1..line.len() - 1];
    let mut parts = inner.splitn(2, ' ');
    let key = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidPgnHeader(line.to_owned()))?
        .trim();
    let value_raw = parts
        .next()
        .ok_or_else(|| ChessErrors::InvalidPgnHeader(line.to_owned()))?
        .trim();

    if !value_raw.starts_with('"') || !value_raw.ends_with('"') || value_raw.len() < 2 {
        return Err(ChessErrors::InvalidPgnHeader(line.to_owned()));
    }
    let value = value_raw[1..value_raw.len() - 1].replace("\\\"", "\"");
    Ok((key.to_owned(), value))
}

fn strip_pgn_comments_and_variations(text: &str) -> String {
    let mut out = String::new();
    let mut brace_depth = 0usize;
    let mut paren_depth = 0usize;

    for ch in text.chars() {
        match ch {
            '{' => brace_depth = brace_depth.saturating_add(1),
            '}' => brace_depth = brace_depth.saturating_sub(1),
            '(' => paren_depth = paren_depth.saturating_add(1),
            ')' => paren_depth = paren_depth.saturating_sub(1),
            _ if brace_depth == 0 && paren_depth == 0 => out.push(ch),
            _ => {}
        }
    }

    out
}

fn is_move_number_token(token: &str) -> bool {
    if token.ends_with('.') {
        return token
            .trim_end_matches('.')
            .chars()
            .all(|c| c.is_ascii_digit());
    }
    if token.contains("...") {
        let head = token.split("...").next().unwrap_or_default();
        return !head.is_empty() && head.chars().all(|c| c.is_ascii_digit());
    }
    false
}

fn trim_annotation_suffix(token: &str) -> &str {
    token.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'))
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn normalize_result(result: &str) -> &str {
    if is_result_token(result) {
        result
    } else {
        "*"
    }
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('"', "\\\"")
}
