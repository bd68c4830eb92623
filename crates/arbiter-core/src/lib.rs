//! Core types for the arbiter chess rules engine.
//!
//! This crate provides the leaf types shared across the engine:
//! - [`Alliance`] for the two sides and their movement semantics
//! - [`Square`] for board coordinates (0-63, rank-major from a8)
//! - [`PieceKind`] for the six piece types and their material values

mod alliance;
mod piece;
mod square;

pub use alliance::Alliance;
pub use piece::PieceKind;
pub use square::{Square, FILE_A, FILE_B, FILE_G, FILE_H};
