//! Board square representation.

use std::fmt;

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed rank-major from the top-left corner as White sees
/// the board: a8 = 0, h8 = 7, a1 = 56, h1 = 63. This matches the direction
/// convention in [`Alliance`](crate::Alliance), where White pawns advance
/// toward lower indices.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

/// Builds a per-square table marking one file.
const fn file_table(file: u8) -> [bool; 64] {
    let mut table = [false; 64];
    let mut i = file as usize;
    while i < 64 {
        table[i] = true;
        i += 8;
    }
    table
}

/// Squares on the a-file.
pub const FILE_A: [bool; 64] = file_table(0);
/// Squares on the b-file.
pub const FILE_B: [bool; 64] = file_table(1);
/// Squares on the g-file.
pub const FILE_G: [bool; 64] = file_table(6);
/// Squares on the h-file.
pub const FILE_H: [bool; 64] = file_table(7);

impl Square {
    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return None;
        }
        Some(Square((7 - rank) * 8 + file))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square (0 = a-file, 7 = h-file).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Returns the rank of this square (0 = rank 1, 7 = rank 8).
    #[inline]
    pub const fn rank(self) -> u8 {
        7 - self.0 / 8
    }

    /// Returns the file letter ('a'-'h').
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    /// Applies a signed coordinate delta, returning `None` when the result
    /// falls off the board. Horizontal wraparound is not detected here; the
    /// move generator excludes it with the file tables.
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let target = self.0 as i8 + delta;
        if target >= 0 && target < 64 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank() + 1)
    }

    // The castling squares.
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn corners() {
        assert_eq!(Square::A8.index(), 0);
        assert_eq!(Square::H8.index(), 7);
        assert_eq!(Square::A1.index(), 56);
        assert_eq!(Square::H1.index(), 63);
    }

    #[test]
    fn from_algebraic() {
        assert_eq!(Square::from_algebraic("a8"), Some(Square::A8));
        assert_eq!(Square::from_algebraic("e1"), Some(Square::E1));
        assert_eq!(Square::from_algebraic("e4").map(Square::index), Some(36));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn file_and_rank() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.file_char(), 'e');
    }

    #[test]
    fn offsets() {
        assert_eq!(Square::E1.offset(-8), Some(Square::from_algebraic("e2").unwrap()));
        assert_eq!(Square::A8.offset(-1), None);
        assert_eq!(Square::H1.offset(8), None);
    }

    #[test]
    fn file_tables() {
        assert!(FILE_A[Square::A8.index() as usize]);
        assert!(FILE_A[Square::A1.index() as usize]);
        assert!(!FILE_A[Square::B1.index() as usize]);
        assert!(FILE_H[Square::H8.index() as usize]);
        assert!(FILE_B[Square::B8.index() as usize]);
        assert!(FILE_G[Square::G1.index() as usize]);
    }

    proptest! {
        #[test]
        fn algebraic_roundtrip(index in 0u8..64) {
            let square = Square::from_index(index).unwrap();
            let parsed = Square::from_algebraic(&square.to_algebraic()).unwrap();
            prop_assert_eq!(square, parsed);
        }
    }
}
