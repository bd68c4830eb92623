//! The two sides of the game.

use crate::Square;

/// Represents a side, White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Alliance {
    White = 0,
    Black = 1,
}

impl Alliance {
    /// Returns the opposing alliance.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Alliance::White => Alliance::Black,
            Alliance::Black => Alliance::White,
        }
    }

    /// Returns the forward coordinate-delta sign for pawn advances.
    ///
    /// Coordinates run rank-major from a8 (index 0) to h1 (index 63), so
    /// White pawns advance toward lower indices.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Alliance::White => -1,
            Alliance::Black => 1,
        }
    }

    /// Returns the backward coordinate-delta sign, used for en-passant
    /// adjacency tests.
    #[inline]
    pub const fn opposite_direction(self) -> i8 {
        -self.direction()
    }

    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Alliance::White)
    }

    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Alliance::Black)
    }

    /// Returns true if the square lies on the opposing back rank, where a
    /// pawn of this alliance promotes.
    #[inline]
    pub const fn is_promotion_square(self, square: Square) -> bool {
        match self {
            Alliance::White => square.rank() == 7,
            Alliance::Black => square.rank() == 0,
        }
    }

    /// Returns the 0-based rank on which pawns of this alliance start.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Alliance::White => 1,
            Alliance::Black => 6,
        }
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Alliance::White => write!(f, "White"),
            Alliance::Black => write!(f, "Black"),
        }
    }
}
