//! Chess rules engine.
//!
//! This crate is the authoritative "is this legal, what happens next" oracle
//! for a chess front end. It provides:
//! - [`Board`] - an immutable 64-tile snapshot with derived per-side state
//! - [`Piece`] - piece values with per-type legal-move geometry
//! - [`Move`] - tagged move variants that execute into fresh boards
//! - [`Player`] - the per-side gateway for attempting a move
//! - [`MoveTransition`] - the outcome of an attempted move
//!
//! # Architecture
//!
//! A [`Board`] is built once from a piece layout and never mutated. During
//! construction every active piece computes its candidate moves against the
//! frozen tile array, and each [`Player`] aggregates its side's moves, adds
//! castles, and caches its check status. Executing a [`Move`] always yields
//! a brand-new board; superseded boards remain valid values, so a game is a
//! chain of snapshots.
//!
//! # Example
//!
//! ```
//! use arbiter_engine::{Board, Move, MoveStatus, Square};
//!
//! let board = Board::standard();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let mv = Move::find(&board, e2, e4);
//! let transition = board.current_player().make_move(&board, &mv).unwrap();
//! assert_eq!(transition.status(), MoveStatus::Done);
//! ```

mod board;
mod mov;
mod movegen;
mod piece;
mod player;
mod transition;

pub use arbiter_core::{Alliance, PieceKind, Square};
pub use board::{Board, BoardBuilder, BoardError, Tile};
pub use mov::{Move, MoveError};
pub use piece::Piece;
pub use player::Player;
pub use transition::{MoveStatus, MoveTransition};
