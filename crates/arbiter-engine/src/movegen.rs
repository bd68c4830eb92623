//! Per-piece candidate move generation.
//!
//! All geometry works on signed coordinate deltas over the rank-major
//! square index. Horizontal wraparound (a step crossing from the h-file to
//! the a-file of the next rank) is excluded with the precomputed file
//! tables; this is the single most error-prone detail in the whole engine,
//! so every offset set has its own exclusion predicate.

use arbiter_core::{PieceKind, Square, FILE_A, FILE_B, FILE_G, FILE_H};

use crate::board::{Layout, Tile};
use crate::mov::Move;
use crate::piece::Piece;

const KNIGHT_OFFSETS: [i8; 8] = [-17, -15, -10, -6, 6, 10, 15, 17];
const KING_OFFSETS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];
const BISHOP_VECTORS: [i8; 4] = [-9, -7, 7, 9];
const ROOK_VECTORS: [i8; 4] = [-8, -1, 1, 8];
const QUEEN_VECTORS: [i8; 8] = [-9, -8, -7, -1, 1, 7, 8, 9];

/// Computes the candidate moves for one piece against a frozen tile array.
///
/// Castling is not generated here; the player owns it.
pub(crate) fn piece_moves(piece: &Piece, layout: &Layout<'_>) -> Vec<Move> {
    match piece.kind() {
        PieceKind::Pawn => pawn_moves(piece, layout),
        PieceKind::Knight => stepper_moves(piece, layout, &KNIGHT_OFFSETS, knight_wraps),
        PieceKind::Bishop => sliding_moves(piece, layout, &BISHOP_VECTORS),
        PieceKind::Rook => sliding_moves(piece, layout, &ROOK_VECTORS),
        PieceKind::Queen => sliding_moves(piece, layout, &QUEEN_VECTORS),
        PieceKind::King => stepper_moves(piece, layout, &KING_OFFSETS, step_wraps),
    }
}

/// True if applying `delta` from `square` would cross a board edge
/// horizontally. Covers the king and sliding offset sets.
fn step_wraps(square: Square, delta: i8) -> bool {
    let index = square.index() as usize;
    (FILE_A[index] && matches!(delta, -9 | -1 | 7)) || (FILE_H[index] && matches!(delta, -7 | 1 | 9))
}

/// Edge exclusions for the knight offset set.
fn knight_wraps(square: Square, delta: i8) -> bool {
    let index = square.index() as usize;
    (FILE_A[index] && matches!(delta, -17 | -10 | 6 | 15))
        || (FILE_B[index] && matches!(delta, -10 | 6))
        || (FILE_G[index] && matches!(delta, -6 | 10))
        || (FILE_H[index] && matches!(delta, -15 | -6 | 10 | 17))
}

/// Walks each direction vector square by square: through empty tiles,
/// including then stopping on an enemy piece, stopping before a friendly
/// piece or the board edge.
fn sliding_moves(piece: &Piece, layout: &Layout<'_>, vectors: &[i8]) -> Vec<Move> {
    let mut moves = Vec::new();
    for &vector in vectors {
        let mut current = piece.square();
        loop {
            if step_wraps(current, vector) {
                break;
            }
            let Some(next) = current.offset(vector) else {
                break;
            };
            match layout.tile(next) {
                Tile::Empty => {
                    moves.push(Move::Quiet {
                        piece: *piece,
                        to: next,
                    });
                    current = next;
                }
                Tile::Occupied(target) => {
                    if target.alliance() != piece.alliance() {
                        moves.push(Move::Capture {
                            piece: *piece,
                            to: next,
                            captured: *target,
                        });
                    }
                    break;
                }
            }
        }
    }
    moves
}

/// Fixed-offset movement for knights and kings.
fn stepper_moves(
    piece: &Piece,
    layout: &Layout<'_>,
    offsets: &[i8],
    wraps: fn(Square, i8) -> bool,
) -> Vec<Move> {
    let mut moves = Vec::new();
    for &offset in offsets {
        if wraps(piece.square(), offset) {
            continue;
        }
        let Some(to) = piece.square().offset(offset) else {
            continue;
        };
        match layout.tile(to) {
            Tile::Empty => moves.push(Move::Quiet { piece: *piece, to }),
            Tile::Occupied(target) => {
                if target.alliance() != piece.alliance() {
                    moves.push(Move::Capture {
                        piece: *piece,
                        to,
                        captured: *target,
                    });
                }
            }
        }
    }
    moves
}

fn pawn_moves(piece: &Piece, layout: &Layout<'_>) -> Vec<Move> {
    let mut moves = Vec::new();
    let direction = piece.alliance().direction();

    // Single and double forward steps, destination(s) empty.
    if let Some(ahead) = piece.square().offset(8 * direction) {
        if !layout.tile(ahead).is_occupied() {
            let push = Move::PawnPush {
                piece: *piece,
                to: ahead,
            };
            if piece.alliance().is_promotion_square(ahead) {
                moves.push(Move::Promotion {
                    inner: Box::new(push),
                });
            } else {
                moves.push(push);
                if !piece.has_moved()
                    && piece.square().rank() == piece.alliance().pawn_start_rank()
                {
                    if let Some(jump_to) = piece.square().offset(16 * direction) {
                        if !layout.tile(jump_to).is_occupied() {
                            moves.push(Move::PawnJump {
                                piece: *piece,
                                to: jump_to,
                            });
                        }
                    }
                }
            }
        }
    }

    // Diagonal captures, including en passant.
    for attack_offset in [7i8, 9] {
        if pawn_capture_wraps(piece, attack_offset) {
            continue;
        }
        let Some(to) = piece.square().offset(attack_offset * direction) else {
            continue;
        };
        match layout.tile(to) {
            Tile::Occupied(target) => {
                if target.alliance() != piece.alliance() {
                    let capture = Move::PawnCapture {
                        piece: *piece,
                        to,
                        captured: *target,
                    };
                    if piece.alliance().is_promotion_square(to) {
                        moves.push(Move::Promotion {
                            inner: Box::new(capture),
                        });
                    } else {
                        moves.push(capture);
                    }
                }
            }
            Tile::Empty => {
                if let Some(target) = layout.en_passant_pawn() {
                    // The jumped pawn sits one step behind the diagonal
                    // destination, beside this pawn.
                    let beside = match attack_offset {
                        7 => piece.alliance().opposite_direction(),
                        _ => -piece.alliance().opposite_direction(),
                    };
                    if target.alliance() != piece.alliance()
                        && piece.square().offset(beside) == Some(target.square())
                    {
                        moves.push(Move::EnPassant {
                            piece: *piece,
                            to,
                            captured: *target,
                        });
                    }
                }
            }
        }
    }

    moves
}

/// Edge exclusions for the two diagonal pawn attack offsets. Which file
/// blocks which offset depends on the side, since the offsets are scaled
/// by the alliance direction.
fn pawn_capture_wraps(piece: &Piece, attack_offset: i8) -> bool {
    let index = piece.square().index() as usize;
    match attack_offset {
        7 => {
            (FILE_A[index] && piece.alliance().is_black())
                || (FILE_H[index] && piece.alliance().is_white())
        }
        _ => {
            (FILE_A[index] && piece.alliance().is_white())
                || (FILE_H[index] && piece.alliance().is_black())
        }
    }
}
