//! Concrete piece values.

use arbiter_core::{Alliance, PieceKind, Square};

use crate::board::Board;
use crate::mov::Move;
use crate::movegen;

/// A piece on the board: its type, square, alliance, and whether it has
/// moved before.
///
/// Pieces are immutable values; "moving" one produces a new `Piece` at the
/// destination with the moved flag set. Equality and hashing are value-based
/// over the whole identity tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    square: Square,
    alliance: Alliance,
    has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, square: Square, alliance: Alliance) -> Self {
        Piece {
            kind,
            square,
            alliance,
            has_moved: false,
        }
    }

    /// Creates a piece with an explicit moved flag, for setting up
    /// mid-game positions.
    #[inline]
    pub const fn with_moved_flag(
        kind: PieceKind,
        square: Square,
        alliance: Alliance,
        has_moved: bool,
    ) -> Self {
        Piece {
            kind,
            square,
            alliance,
            has_moved,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub const fn alliance(&self) -> Alliance {
        self.alliance
    }

    /// Returns true if this piece has moved at some point in the game.
    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns the material value of this piece.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.kind.value()
    }

    /// Computes the candidate moves for this piece against the given board.
    ///
    /// These are geometrically legal moves only; the "exposes own king"
    /// filter is applied later by [`Player::make_move`](crate::Player).
    /// Castling is not generated here, it belongs to the player.
    pub fn legal_moves(&self, board: &Board) -> Vec<Move> {
        movegen::piece_moves(self, &board.layout())
    }

    /// Returns this piece relocated to `to`, with the moved flag set.
    #[inline]
    pub const fn move_to(&self, to: Square) -> Piece {
        Piece {
            kind: self.kind,
            square: to,
            alliance: self.alliance,
            has_moved: true,
        }
    }

    /// Returns the queen this piece promotes to, on the same square.
    ///
    /// Promotion is hardcoded to the highest-value piece; underpromotion
    /// would need an explicit choice threaded through the move contract.
    #[inline]
    pub const fn promotion_piece(&self) -> Piece {
        Piece {
            kind: PieceKind::Queen,
            square: self.square,
            alliance: self.alliance,
            has_moved: true,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = self.kind.symbol();
        match self.alliance {
            Alliance::White => write!(f, "{}", symbol),
            Alliance::Black => write!(f, "{}", symbol.to_ascii_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_sets_moved_flag() {
        let knight = Piece::new(PieceKind::Knight, Square::G1, Alliance::White);
        assert!(!knight.has_moved());
        let moved = knight.move_to(Square::from_algebraic("f3").unwrap());
        assert!(moved.has_moved());
        assert_eq!(moved.kind(), PieceKind::Knight);
        assert_eq!(moved.alliance(), Alliance::White);
        assert_ne!(moved, knight);
    }

    #[test]
    fn promotion_piece_is_queen() {
        let pawn = Piece::new(PieceKind::Pawn, Square::B8, Alliance::White);
        let promoted = pawn.promotion_piece();
        assert_eq!(promoted.kind(), PieceKind::Queen);
        assert_eq!(promoted.square(), Square::B8);
        assert!(promoted.has_moved());
    }

    #[test]
    fn display_case_follows_alliance() {
        let white = Piece::new(PieceKind::Queen, Square::D1, Alliance::White);
        let black = Piece::new(PieceKind::Queen, Square::D8, Alliance::Black);
        assert_eq!(white.to_string(), "Q");
        assert_eq!(black.to_string(), "q");
    }
}
