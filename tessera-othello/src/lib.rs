//! `tessera-othello` is a compact bitboard Othello library for engines and tools.
//!
//! This package implements two levels of abstraction:
//!
//!  - [`bitboard`] contains the raw, unchecked operations for working with Othello boards:
//!    legal-move generation and flip computation as branchless, direction-parallel
//!    flood fills over a [`u64`].
//!  - [`Position`] wraps a pair of color bitboards with the side to move and the pass flag.
//!    It applies moves in place, can be snapshotted with [`MoveUndo`] and restored,
//!    and round-trips through a short text notation.

pub mod bitboard;

mod location;
mod notation;
mod position;
mod utils;

pub use location::*;
pub use notation::*;
pub use position::*;

/// The number of spaces on one edge of an Othello board.
pub const EDGE_LENGTH: usize = 8;

/// The number of spaces on an Othello board.
pub const NUM_SPACES: usize = 64;
