//! Ray-cast check and pin detection.
//!
//! Rays are cast outward from a king square in the eight king directions. The
//! first allied piece on a ray is a pin candidate; an enemy piece further out
//! that attacks along that line confirms the pin, or delivers check when no
//! allied piece stood in between. Knight checks are tested separately.

use crate::game_state::chess_rules::{is_orthogonal, KING_RAY_DIRECTIONS, KNIGHT_OFFSETS};
use crate::game_state::{chess_types::*, game_state::GameState};

/// A piece on a line through the king, with the direction pointing from the
/// king towards it. Knight checks carry the knight offset as direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    pub square: Square,
    pub direction: Direction,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinsAndChecks {
    pub in_check: bool,
    pub checks: Vec<RayHit>,
    pub pins: Vec<RayHit>,
}

impl PinsAndChecks {
    /// Pin line of the piece on `square`, if it is pinned. A piece is pinned
    /// along at most one line.
    #[inline]
    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }

    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }
}

/// Pins and checks against the king of the side to move.
pub fn check_for_pins_and_checks(game_state: &GameState) -> PinsAndChecks {
    let ally = game_state.side_to_move;
    pins_and_checks_from(game_state, game_state.king_location(ally), ally)
}

/// Pins and checks against a king of `ally` standing on `king_square`.
///
/// The allied king itself is transparent to the rays, so a king square can be
/// probed before the king has actually moved there.
pub fn pins_and_checks_from(game_state: &GameState, king_square: Square, ally: Color) -> PinsAndChecks {
    pins_and_checks_on(&game_state.board, king_square, ally)
}

/// Same analysis on a bare board, for hypothetical positions.
pub fn pins_and_checks_on(board: &Board, king_square: Square, ally: Color) -> PinsAndChecks {
    let piece_at = |square: Square| board[square.row as usize][square.col as usize];
    let mut result = PinsAndChecks::default();

    for direction in KING_RAY_DIRECTIONS {
        let mut possible_pin: Option<RayHit> = None;

        for distance in 1..8 {
            let Some(square) = king_square.offset(direction, distance) else {
                break;
            };
            let Some(piece) = piece_at(square) else {
                continue;
            };

            if piece.color == ally {
                if piece.kind == PieceKind::King {
                    continue;
                }
                if possible_pin.is_some() {
                    // Two allied pieces shield the king.
                    break;
                }
                possible_pin = Some(RayHit { square, direction });
                continue;
            }

            if attacks_along_ray(piece, direction, distance, ally) {
                match possible_pin {
                    None => {
                        result.in_check = true;
                        result.checks.push(RayHit { square, direction });
                    }
                    Some(pin) => result.pins.push(pin),
                }
            }
            break;
        }
    }

    for offset in KNIGHT_OFFSETS {
        let Some(square) = king_square.offset(offset, 1) else {
            continue;
        };
        if piece_at(square) == Some(Piece::new(ally.opposite(), PieceKind::Knight)) {
            result.in_check = true;
            result.checks.push(RayHit {
                square,
                direction: offset,
            });
        }
    }

    result
}

/// Whether a king of `color` standing on `square` would be in check.
#[inline]
pub fn is_square_attacked_for(game_state: &GameState, square: Square, color: Color) -> bool {
    pins_and_checks_from(game_state, square, color).in_check
}

/// Whether an enemy `piece` seen `distance` steps from the king along
/// `direction` attacks back down that ray.
fn attacks_along_ray(piece: Piece, direction: Direction, distance: i8, ally: Color) -> bool {
    let orthogonal = is_orthogonal(direction);
    match piece.kind {
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::Queen => true,
        PieceKind::King => distance == 1,
        // Enemy pawns attack the king from the squares diagonally ahead of it.
        PieceKind::Pawn => distance == 1 && !orthogonal && direction.0 == ally.forward(),
        PieceKind::Knight => false,
    }
}
