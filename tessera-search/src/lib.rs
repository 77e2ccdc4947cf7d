//! Game-tree walkers over [`Position`]s.
//!
//! Every walker works on a private copy of the caller's position. Trial moves are
//! undone by restoring a [`tessera_othello::MoveUndo`] snapshot.

pub mod alphabeta;
pub mod parallel;
pub mod perft;

pub use alphabeta::{best_move, evaluate, search, WIN_SCORE};
pub use parallel::{count_leaves_parallel, divide_parallel, PerftError};
pub use perft::{count_leaves, divide};

use tessera_othello::Position;

/// Perft from the standard starting position.
pub fn run_perft(depth: u32) -> u64 {
    count_leaves(&Position::new(), depth)
}
