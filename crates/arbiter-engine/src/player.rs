//! Per-side state and the move-attempt gateway.

use arbiter_core::{Alliance, Square};

use crate::board::{Board, BoardError, Layout};
use crate::mov::{Move, MoveError};
use crate::piece::Piece;
use crate::transition::{MoveStatus, MoveTransition};

/// One side of the game: its king, its full legal-move set (standard moves
/// plus castles), and its cached check status.
///
/// A player is constructed alongside its board and holds no reference back
/// to it; the board is passed explicitly to the methods that need it.
#[derive(Debug, Clone)]
pub struct Player {
    alliance: Alliance,
    king: Piece,
    legal_moves: Vec<Move>,
    in_check: bool,
}

impl Player {
    /// Assembles a player during board construction: establishes the king
    /// (exactly one per side), computes check status against the
    /// opponent's raw moves, and appends castles to the standard list.
    pub(crate) fn build(
        alliance: Alliance,
        layout: &Layout<'_>,
        pieces: &[Piece],
        mut moves: Vec<Move>,
        opponent_moves: &[Move],
    ) -> Result<Player, BoardError> {
        let king = establish_king(alliance, pieces)?;
        let in_check = !Self::attacks_on_square(king.square(), opponent_moves).is_empty();
        let mut castles = king_castles(alliance, layout, &king, in_check, opponent_moves);
        moves.append(&mut castles);
        Ok(Player {
            alliance,
            king,
            legal_moves: moves,
            in_check,
        })
    }

    #[inline]
    pub fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// Returns this side's king.
    #[inline]
    pub fn king(&self) -> &Piece {
        &self.king
    }

    /// Returns this side's legal moves, castles included. These are
    /// geometric candidates; [`make_move`](Player::make_move) still rejects
    /// any that would expose the king.
    pub fn legal_moves(&self) -> &[Move] {
        &self.legal_moves
    }

    /// Returns true if this side's king is currently targeted by an
    /// opponent move.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Returns true if the move belongs to this side's precomputed set.
    pub fn is_move_legal(&self, mv: &Move) -> bool {
        self.legal_moves.contains(mv)
    }

    /// Attempts a move on `board` (which must be the board this player was
    /// derived from).
    ///
    /// Rejects with [`MoveStatus::IllegalMove`] when the move is absent
    /// from the legal set, or [`MoveStatus::LeavesPlayerInCheck`] when the
    /// executed move would expose this side's king; both rejections carry
    /// the original board unchanged. Otherwise accepts with
    /// [`MoveStatus::Done`] and the resulting board.
    pub fn make_move(&self, board: &Board, mv: &Move) -> Result<MoveTransition, MoveError> {
        if !self.is_move_legal(mv) {
            return Ok(MoveTransition::new(
                board.clone(),
                mv.clone(),
                MoveStatus::IllegalMove,
            ));
        }
        let candidate = mv.execute(board)?;
        if candidate.player(self.alliance).is_in_check() {
            return Ok(MoveTransition::new(
                board.clone(),
                mv.clone(),
                MoveStatus::LeavesPlayerInCheck,
            ));
        }
        Ok(MoveTransition::new(candidate, mv.clone(), MoveStatus::Done))
    }

    /// Returns true if this side is in check with no move that completes.
    pub fn is_in_checkmate(&self, board: &Board) -> bool {
        self.in_check && !self.has_escape_moves(board)
    }

    /// Returns true if this side is not in check but has no move that
    /// completes.
    pub fn is_in_stalemate(&self, board: &Board) -> bool {
        !self.in_check && !self.has_escape_moves(board)
    }

    /// Tentatively executes every legal move, looking for one that does
    /// not leave the king exposed. Bounded by the legal-move count, so the
    /// quadratic scan stays cheap.
    fn has_escape_moves(&self, board: &Board) -> bool {
        self.legal_moves
            .iter()
            .any(|mv| matches!(self.make_move(board, mv), Ok(t) if t.status().is_done()))
    }

    /// Returns the moves in `moves` that target `square`.
    pub fn attacks_on_square<'a>(square: Square, moves: &'a [Move]) -> Vec<&'a Move> {
        moves.iter().filter(|mv| mv.to() == Some(square)).collect()
    }
}

fn establish_king(alliance: Alliance, pieces: &[Piece]) -> Result<Piece, BoardError> {
    let mut kings = pieces.iter().filter(|piece| piece.kind().is_king());
    let king = *kings.next().ok_or(BoardError::MissingKing(alliance))?;
    if kings.next().is_some() {
        return Err(BoardError::TooManyKings(alliance));
    }
    Ok(king)
}

/// Per-side castle squares: king home, transit/destination squares, and
/// the rook corners.
struct CastleSquares {
    king_home: Square,
    king_side_rook: Square,
    king_side_transit: [Square; 2],
    queen_side_rook: Square,
    queen_side_empty: [Square; 3],
    queen_side_king_path: [Square; 2],
}

impl CastleSquares {
    fn of(alliance: Alliance) -> CastleSquares {
        match alliance {
            Alliance::White => CastleSquares {
                king_home: Square::E1,
                king_side_rook: Square::H1,
                king_side_transit: [Square::F1, Square::G1],
                queen_side_rook: Square::A1,
                queen_side_empty: [Square::B1, Square::C1, Square::D1],
                queen_side_king_path: [Square::D1, Square::C1],
            },
            Alliance::Black => CastleSquares {
                king_home: Square::E8,
                king_side_rook: Square::H8,
                king_side_transit: [Square::F8, Square::G8],
                queen_side_rook: Square::A8,
                queen_side_empty: [Square::B8, Square::C8, Square::D8],
                queen_side_king_path: [Square::D8, Square::C8],
            },
        }
    }
}

/// Computes the castle moves available to a side.
///
/// Standard rule: the king has never moved and is not in check, every
/// square strictly between king and rook is empty, the corner piece is an
/// unmoved rook of the same side, and none of the squares the king moves
/// through (destination included) is targeted by an opponent move. On the
/// queen side the b-file square must be empty but may be attacked, since
/// the king never crosses it.
fn king_castles(
    alliance: Alliance,
    layout: &Layout<'_>,
    king: &Piece,
    in_check: bool,
    opponent_moves: &[Move],
) -> Vec<Move> {
    let mut castles = Vec::new();
    let squares = CastleSquares::of(alliance);
    if king.has_moved() || in_check || king.square() != squares.king_home {
        return castles;
    }

    let unattacked = |square: Square| Player::attacks_on_square(square, opponent_moves).is_empty();
    let castle_rook = |corner: Square| {
        layout.tile(corner).piece().filter(|rook| {
            rook.kind().is_rook() && !rook.has_moved() && rook.alliance() == alliance
        })
    };

    let [f, g] = squares.king_side_transit;
    if !layout.tile(f).is_occupied() && !layout.tile(g).is_occupied() {
        if let Some(rook) = castle_rook(squares.king_side_rook) {
            if unattacked(f) && unattacked(g) {
                castles.push(Move::KingSideCastle {
                    king: *king,
                    to: g,
                    rook: *rook,
                    rook_to: f,
                });
            }
        }
    }

    let [b, c, d] = squares.queen_side_empty;
    if !layout.tile(b).is_occupied()
        && !layout.tile(c).is_occupied()
        && !layout.tile(d).is_occupied()
    {
        if let Some(rook) = castle_rook(squares.queen_side_rook) {
            let [d_path, c_path] = squares.queen_side_king_path;
            if unattacked(d_path) && unattacked(c_path) {
                castles.push(Move::QueenSideCastle {
                    king: *king,
                    to: c,
                    rook: *rook,
                    rook_to: d,
                });
            }
        }
    }

    castles
}
