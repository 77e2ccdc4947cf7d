//! "Perft" performance test: count the number of leaves at a given depth.
//! Useful for validating move generation and for benchmarking it.
//! See: http://www.aartbik.com/MISC/reversi.html
//!
//! A pass counts as a ply. A game that ends by two passes before the requested
//! depth counts as a single leaf.

use arrayvec::ArrayVec;
use log::debug;
use tessera_othello::{GameSignal, Move, Position, NUM_SPACES};

/// Moves out of a position: its legal placements, or a lone pass.
pub(crate) type RootMoves = ArrayVec<Move, NUM_SPACES>;

pub(crate) fn root_moves(position: &Position) -> RootMoves {
    let mut moves: RootMoves = position.legal_moves().map(Move::Place).collect();
    if moves.is_empty() {
        moves.push(Move::Pass);
    }
    moves
}

/// Count the leaves of the game tree below `position`, `depth` plies deep.
pub fn count_leaves(position: &Position, depth: u32) -> u64 {
    let mut pos = *position;
    leaves_below(&mut pos, depth)
}

/// Count the leaves below each move out of `position`.
/// The counts sum to [`count_leaves`]; depth 0 has no moves to divide by.
pub fn divide(position: &Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    root_moves(position)
        .into_iter()
        .map(|mv| {
            let leaves = leaves_after(position, mv, depth);
            debug!("{}: {}", mv, leaves);
            (mv, leaves)
        })
        .collect()
}

/// Leaves below the child reached by `mv`, where `depth` counts from `position`.
pub(crate) fn leaves_after(position: &Position, mv: Move, depth: u32) -> u64 {
    let mut child = *position;
    match child.apply(mv) {
        GameSignal::Terminal => 1,
        GameSignal::Continue => leaves_below(&mut child, depth - 1),
    }
}

fn leaves_below(pos: &mut Position, depth: u32) -> u64 {
    // Leaf node for this depth
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();
    if moves.len() == 0 {
        // The pass is the only move, and a leaf of its own at the last ply.
        if depth == 1 {
            return 1;
        }

        let undo = pos.snapshot();
        let leaves = match pos.apply(Move::Pass) {
            // Both players passed: game is over
            GameSignal::Terminal => 1,
            GameSignal::Continue => leaves_below(pos, depth - 1),
        };
        pos.restore(undo);
        return leaves;
    }

    if depth == 1 {
        return moves.len() as u64;
    }

    let undo = pos.snapshot();
    let mut leaves = 0;
    for loc in moves {
        pos.apply(Move::Place(loc));
        leaves += leaves_below(pos, depth - 1);
        pos.restore(undo);
    }
    leaves
}
