//! Move representation and execution.

use arbiter_core::Square;
use thiserror::Error;

use crate::board::{Board, BoardBuilder, BoardError};
use crate::piece::Piece;

/// Errors that can occur when executing a move.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The null sentinel was executed; a caller logic error.
    #[error("the null move cannot be executed")]
    NullMove,

    /// The resulting layout failed board construction.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// A candidate relocation, describing how one board transforms into the
/// next.
///
/// A move never mutates a board; [`execute`](Move::execute) always returns
/// a brand-new one. The captured piece on the attacking variants is kept
/// for history and display, not removed from any live collection by the
/// move itself.
#[derive(Debug, Clone)]
pub enum Move {
    /// A non-pawn relocation onto an empty tile.
    Quiet { piece: Piece, to: Square },
    /// A non-pawn capture.
    Capture {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// A single pawn advance.
    PawnPush { piece: Piece, to: Square },
    /// A double pawn advance from the starting rank; records the moved
    /// pawn as the en-passant target on the resulting board.
    PawnJump { piece: Piece, to: Square },
    /// A diagonal pawn capture.
    PawnCapture {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// An en-passant capture; the captured pawn sits one step behind the
    /// destination square, not on it.
    EnPassant {
        piece: Piece,
        to: Square,
        captured: Piece,
    },
    /// Decorates a pawn push or pawn capture that reaches the promotion
    /// rank; execution replaces the pawn with a queen.
    Promotion { inner: Box<Move> },
    /// O-O: the king moves two squares toward the h-file rook, which lands
    /// beside it.
    KingSideCastle {
        king: Piece,
        to: Square,
        rook: Piece,
        rook_to: Square,
    },
    /// O-O-O: the mirror relocation toward the a-file rook.
    QueenSideCastle {
        king: Piece,
        to: Square,
        rook: Piece,
        rook_to: Square,
    },
    /// Sentinel for a failed lookup; executing it is an error.
    Null,
}

impl Move {
    /// Looks up the move matching a coordinate pair against the board's
    /// full legal-move list (both sides), returning [`Move::Null`] when
    /// nothing matches.
    ///
    /// A linear scan is enough: positions rarely exceed ~40 legal moves.
    pub fn find(board: &Board, from: Square, to: Square) -> Move {
        for mv in board.all_legal_moves() {
            if mv.from() == Some(from) && mv.to() == Some(to) {
                return mv.clone();
            }
        }
        Move::Null
    }

    /// Returns the piece being moved, or `None` for the null move.
    pub fn moved_piece(&self) -> Option<&Piece> {
        match self {
            Move::Quiet { piece, .. }
            | Move::Capture { piece, .. }
            | Move::PawnPush { piece, .. }
            | Move::PawnJump { piece, .. }
            | Move::PawnCapture { piece, .. }
            | Move::EnPassant { piece, .. } => Some(piece),
            Move::KingSideCastle { king, .. } | Move::QueenSideCastle { king, .. } => Some(king),
            Move::Promotion { inner } => inner.moved_piece(),
            Move::Null => None,
        }
    }

    /// Returns the origin square, or `None` for the null move.
    pub fn from(&self) -> Option<Square> {
        self.moved_piece().map(Piece::square)
    }

    /// Returns the destination square, or `None` for the null move.
    pub fn to(&self) -> Option<Square> {
        match self {
            Move::Quiet { to, .. }
            | Move::Capture { to, .. }
            | Move::PawnPush { to, .. }
            | Move::PawnJump { to, .. }
            | Move::PawnCapture { to, .. }
            | Move::EnPassant { to, .. }
            | Move::KingSideCastle { to, .. }
            | Move::QueenSideCastle { to, .. } => Some(*to),
            Move::Promotion { inner } => inner.to(),
            Move::Null => None,
        }
    }

    /// Returns the captured piece, if this move is an attack.
    pub fn captured_piece(&self) -> Option<&Piece> {
        match self {
            Move::Capture { captured, .. }
            | Move::PawnCapture { captured, .. }
            | Move::EnPassant { captured, .. } => Some(captured),
            Move::Promotion { inner } => inner.captured_piece(),
            _ => None,
        }
    }

    /// Returns true if this move captures a piece.
    pub fn is_attack(&self) -> bool {
        self.captured_piece().is_some()
    }

    /// Returns true if this move is a castle.
    pub fn is_castle(&self) -> bool {
        matches!(
            self,
            Move::KingSideCastle { .. } | Move::QueenSideCastle { .. }
        )
    }

    fn castle_rook(&self) -> Option<&Piece> {
        match self {
            Move::KingSideCastle { rook, .. } | Move::QueenSideCastle { rook, .. } => Some(rook),
            _ => None,
        }
    }

    /// Executes this move against `board`, returning the resulting board.
    ///
    /// The successor carries over every active piece of both sides except
    /// those that moved or were captured, inserts the post-move piece(s),
    /// flips the side to move, and clears any recorded en-passant target
    /// unless this move sets a new one. The source board is untouched.
    pub fn execute(&self, board: &Board) -> Result<Board, MoveError> {
        match self {
            Move::Null => Err(MoveError::NullMove),
            Move::Quiet { piece, to }
            | Move::PawnPush { piece, to }
            | Move::Capture { piece, to, .. }
            | Move::PawnCapture { piece, to, .. } => {
                // A captured piece shares the destination square, so the
                // relocated piece overwrites it in the builder.
                let mut builder = carry_over(board, &[*piece]);
                builder.place(piece.move_to(*to));
                builder.set_mover(board.to_move().opposite());
                Ok(builder.build()?)
            }
            Move::PawnJump { piece, to } => {
                let mut builder = carry_over(board, &[*piece]);
                let jumped = piece.move_to(*to);
                builder.place(jumped);
                builder.set_en_passant_pawn(jumped);
                builder.set_mover(board.to_move().opposite());
                Ok(builder.build()?)
            }
            Move::EnPassant {
                piece,
                to,
                captured,
            } => {
                // The captured pawn is not on the destination square; it
                // must be omitted explicitly.
                let mut builder = carry_over(board, &[*piece, *captured]);
                builder.place(piece.move_to(*to));
                builder.set_mover(board.to_move().opposite());
                Ok(builder.build()?)
            }
            Move::Promotion { inner } => {
                let advanced = inner.execute(board)?;
                let pawn = inner.moved_piece().ok_or(MoveError::NullMove)?;
                let to = inner.to().ok_or(MoveError::NullMove)?;
                let mut builder = carry_over(&advanced, &[]);
                builder.place(pawn.move_to(to).promotion_piece());
                builder.set_mover(advanced.to_move());
                Ok(builder.build()?)
            }
            Move::KingSideCastle {
                king,
                to,
                rook,
                rook_to,
            }
            | Move::QueenSideCastle {
                king,
                to,
                rook,
                rook_to,
            } => {
                let mut builder = carry_over(board, &[*king, *rook]);
                builder.place(king.move_to(*to));
                builder.place(rook.move_to(*rook_to));
                builder.set_mover(board.to_move().opposite());
                Ok(builder.build()?)
            }
        }
    }
}

/// Starts a builder holding every active piece of both sides except those
/// listed in `omit`.
fn carry_over(board: &Board, omit: &[Piece]) -> BoardBuilder {
    let mut builder = BoardBuilder::new();
    for piece in board.white_pieces().iter().chain(board.black_pieces()) {
        if !omit.contains(piece) {
            builder.place(*piece);
        }
    }
    builder
}

/// Two moves are equal iff they relocate the same piece between the same
/// squares; attacking variants additionally compare the captured piece and
/// castles the rook.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Move::Null, Move::Null) => true,
            (Move::Null, _) | (_, Move::Null) => false,
            (Move::Promotion { inner: a }, Move::Promotion { inner: b }) => a == b,
            (Move::Promotion { .. }, _) | (_, Move::Promotion { .. }) => false,
            _ => {
                self.moved_piece() == other.moved_piece()
                    && self.to() == other.to()
                    && self.captured_piece() == other.captured_piece()
                    && self.castle_rook() == other.castle_rook()
            }
        }
    }
}

impl Eq for Move {}

impl std::fmt::Display for Move {
    /// An approximate notation token, not fully disambiguated algebraic
    /// notation.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Quiet { piece, to } => write!(f, "{}{}", piece.kind().symbol(), to),
            Move::Capture { piece, to, .. } => write!(f, "{}x{}", piece.kind().symbol(), to),
            Move::PawnPush { to, .. } | Move::PawnJump { to, .. } => write!(f, "{}", to),
            Move::PawnCapture { piece, to, .. } | Move::EnPassant { piece, to, .. } => {
                write!(f, "{}x{}", piece.square().file_char(), to)
            }
            Move::Promotion { inner } => write!(f, "{}=Q", inner),
            Move::KingSideCastle { .. } => write!(f, "O-O"),
            Move::QueenSideCastle { .. } => write!(f, "O-O-O"),
            Move::Null => write!(f, "--"),
        }
    }
}
