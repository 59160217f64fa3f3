//! FEN-to-GameState parser.
//!
//! Builds a fully-populated state from a Forsyth-Edwards Notation string,
//! including cached king squares, rights, clocks and the in-check flag.

use crate::chess_errors::ChessErrors;
use crate::game_state::chess_rules::{en_passant_row, king_home, king_side_rook_home, queen_side_rook_home};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::check_for_pins_and_checks;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, ChessErrors> {
    let mut parts = fen.split_whitespace();
    let missing = |field: &str| ChessErrors::InvalidFenString(format!("missing {field} in {fen:?}"));

    let board_part = parts.next().ok_or_else(|| missing("board layout"))?;
    let side_part = parts.next().ok_or_else(|| missing("side to move"))?;
    let castling_part = parts.next().ok_or_else(|| missing("castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| missing("en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| missing("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| missing("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessErrors::InvalidFenString(format!(
            "extra trailing fields in {fen:?}"
        )));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part, &game_state)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessErrors::InvalidFenString(format!("halfmove clock {halfmove_part:?}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessErrors::InvalidFenString(format!("fullmove number {fullmove_part:?}")))?;

    drop_unbacked_castling_rights(&mut game_state);
    game_state.in_check = check_for_pins_and_checks(&game_state).in_check;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> Result<(), ChessErrors> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessErrors::InvalidFenString(format!(
            "board layout must contain 8 ranks, got {}",
            ranks.len()
        )));
    }

    let mut king_counts = [0usize; 2];

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessErrors::InvalidFenToken(ch));
                }
                col += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessErrors::InvalidFenToken(ch))?;
            if col >= 8 {
                return Err(ChessErrors::InvalidFenString(format!(
                    "rank {rank_str:?} has too many files"
                )));
            }

            let square = Square::new(row as u8, col as u8);
            game_state.set_piece(square, Some(piece));
            if piece.kind == PieceKind::King {
                king_counts[piece.color.index()] += 1;
                game_state.king_locations[piece.color.index()] = square;
            }
            col += 1;
        }

        if col != 8 {
            return Err(ChessErrors::InvalidFenString(format!(
                "rank {rank_str:?} does not sum to 8 files"
            )));
        }
    }

    for color in [Color::White, Color::Black] {
        let count = king_counts[color.index()];
        if count != 1 {
            return Err(ChessErrors::KingCount(color, count));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, ChessErrors> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessErrors::InvalidFenString(format!(
            "side to move {side_part:?}"
        ))),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, ChessErrors> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights.white_king_side = true,
            'Q' => rights.white_queen_side = true,
            'k' => rights.black_king_side = true,
            'q' => rights.black_queen_side = true,
            _ => return Err(ChessErrors::InvalidFenToken(ch)),
        }
    }

    Ok(rights)
}

/// The target must sit on the capture rank of the side to move. A target that
/// is occupied, or has no enemy pawn standing beyond it, is dropped.
fn parse_en_passant_square(
    en_passant_part: &str,
    game_state: &GameState,
) -> Result<Option<Square>, ChessErrors> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target = algebraic_to_square(en_passant_part)?;
    let mover = game_state.side_to_move;
    let capture_row = en_passant_row(mover) as i8 + mover.forward();
    if target.row as i8 != capture_row {
        return Err(ChessErrors::InvalidFenString(format!(
            "en-passant square {en_passant_part:?} is not on the capture rank"
        )));
    }

    let victim = Square::new(en_passant_row(mover), target.col);
    let double_pushed = Some(Piece::new(mover.opposite(), PieceKind::Pawn));
    if game_state.is_empty(target) && game_state.piece_at(victim) == double_pushed {
        Ok(Some(target))
    } else {
        Ok(None)
    }
}

/// A right is only kept while its king and rook still stand on their home squares.
fn drop_unbacked_castling_rights(game_state: &mut GameState) {
    for color in [Color::White, Color::Black] {
        let king_home_ok = game_state.piece_at(king_home(color)) == Some(Piece::new(color, PieceKind::King));
        let rook = Some(Piece::new(color, PieceKind::Rook));
        let king_side_ok = king_home_ok && game_state.piece_at(king_side_rook_home(color)) == rook;
        let queen_side_ok = king_home_ok && game_state.piece_at(queen_side_rook_home(color)) == rook;

        let rights = &mut game_state.castling_rights;
        match color {
            Color::White => {
                rights.white_king_side &= king_side_ok;
                rights.white_queen_side &= queen_side_ok;
            }
            Color::Black => {
                rights.black_king_side &= king_side_ok;
                rights.black_queen_side &= queen_side_ok;
            }
        }
    }
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::utils::render_game_state::render_game_state;

    #[test]
    fn parse_starting_fen_and_render_board() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        println!("\n{}", render_game_state(&game_state));

        assert_eq!(game_state.side_to_move, Color::White);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.castling_rights, CastlingRights::ALL);
        assert!(!game_state.in_check);
    }

    #[test]
    fn en_passant_and_check_are_read() {
        let game_state =
            parse_fen("7k/8/8/3pP3/4K3/8/8/8 w - d6 0 1").expect("FEN should parse");
        assert_eq!(game_state.en_passant_square, Some(Square::new(2, 3)));
        assert_eq!(game_state.king_location(Color::White), Square::new(4, 4));
        assert!(game_state.in_check);
    }

    #[test]
    fn en_passant_target_needs_a_pawn_behind_it() {
        // A white knight on d5 is no double-pushed pawn.
        let mut own = parse_fen("4k3/8/8/3NP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(own.en_passant_square, None);
        assert!(own.get_valid_moves().iter().all(|mv| !mv.is_en_passant));

        let mut enemy = parse_fen("4k3/8/8/3nP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(enemy.en_passant_square, None);
        assert!(enemy.get_valid_moves().iter().all(|mv| !mv.is_en_passant));

        // Occupied target square.
        let blocked = parse_fen("4k3/8/3n4/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_eq!(blocked.en_passant_square, None);

        let black_to_move =
            parse_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").expect("FEN should parse");
        assert_eq!(black_to_move.en_passant_square, Some(Square::new(5, 3)));
    }

    #[test]
    fn en_passant_target_off_the_capture_rank_is_rejected() {
        assert!(matches!(
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d3 0 1"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        assert!(matches!(
            parse_fen("4k3/8/8/3pP3/8/8/8/4K3 b - d6 0 1"),
            Err(ChessErrors::InvalidFenString(_))
        ));
    }

    #[test]
    fn rights_without_pieces_at_home_are_dropped() {
        // White king-side rook is missing and the black king has left e8.
        let game_state = parse_fen("r2k3r/8/8/8/8/8/8/R3K3 w KQkq - 0 1").expect("FEN should parse");
        assert_eq!(
            game_state.castling_rights,
            CastlingRights {
                white_king_side: false,
                white_queen_side: true,
                black_king_side: false,
                black_queen_side: false,
            }
        );
    }

    #[test]
    fn malformed_strings_are_rejected() {
        assert_eq!(
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1"),
            Err(ChessErrors::InvalidFenToken('X'))
        );
        assert_eq!(
            parse_fen("8/8/8/8/8/8/8/K7 w - - 0 1"),
            Err(ChessErrors::KingCount(Color::Black, 0))
        );
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/K6k w - - 0"),
            Err(ChessErrors::InvalidFenString(_))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/K6k9 w - - 0 1"),
            Err(ChessErrors::InvalidFenToken('9'))
        ));
        assert!(matches!(
            parse_fen("8/8/8/8/8/8/8/K5k1p w - - 0 1"),
            Err(ChessErrors::InvalidFenString(_))
        ));
    }
}
