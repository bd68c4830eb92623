//! The outcome of an attempted move.

use crate::board::Board;
use crate::mov::Move;

/// How an attempted move resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// The move was executed; the transition carries the resulting board.
    Done,
    /// The move is absent from the mover's legal set; board unchanged.
    IllegalMove,
    /// The move would expose the mover's own king; board unchanged.
    LeavesPlayerInCheck,
}

impl MoveStatus {
    #[inline]
    pub const fn is_done(self) -> bool {
        matches!(self, MoveStatus::Done)
    }
}

/// Result wrapper for [`Player::make_move`](crate::Player::make_move):
/// the resulting board (the original one for rejected moves, so retry is
/// always possible), the attempted move, and the status.
#[derive(Debug, Clone)]
pub struct MoveTransition {
    board: Board,
    mov: Move,
    status: MoveStatus,
}

impl MoveTransition {
    pub(crate) fn new(board: Board, mov: Move, status: MoveStatus) -> Self {
        MoveTransition { board, mov, status }
    }

    /// The board after the move, or the untouched original when the move
    /// was rejected.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the transition, yielding its board.
    pub fn into_board(self) -> Board {
        self.board
    }

    /// The move that was attempted.
    pub fn mov(&self) -> &Move {
        &self.mov
    }

    pub fn status(&self) -> MoveStatus {
        self.status
    }
}
