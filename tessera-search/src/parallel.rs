//! Perft with the root moves fanned out over a worker pool.
//!
//! Each root move is one task on its own copy of the position. The pool never runs
//! more tasks than it has workers, so larger move lists are processed in batches.
//! Counts are only combined after every task has finished.

use crate::perft;
use derive_more::{Display, Error, From};
use log::{debug, info};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tessera_othello::{Move, Position};

#[derive(Debug, Display, Error, From)]
pub enum PerftError {
    #[display(fmt = "failed to build the perft thread pool: {}", _0)]
    ThreadPool(rayon::ThreadPoolBuildError),
}

/// Parallel [`perft::count_leaves`]. `threads == 0` uses one worker per available CPU.
pub fn count_leaves_parallel(
    position: &Position,
    depth: u32,
    threads: usize,
) -> Result<u64, PerftError> {
    if depth == 0 {
        return Ok(1);
    }

    let counts = divide_parallel(position, depth, threads, |_, _| {})?;
    Ok(counts.iter().map(|(_, leaves)| leaves).sum())
}

/// Parallel [`perft::divide`]. `on_done` is called from a worker as each root move finishes.
/// The result is in root-move order regardless of which worker finished first.
pub fn divide_parallel<F>(
    position: &Position,
    depth: u32,
    threads: usize,
    on_done: F,
) -> Result<Vec<(Move, u64)>, PerftError>
where
    F: Fn(Move, u64) + Sync,
{
    if depth == 0 {
        return Ok(Vec::new());
    }

    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    let moves = perft::root_moves(position);
    info!(
        "perft depth {}: {} root moves on {} workers",
        depth,
        moves.len(),
        pool.current_num_threads()
    );

    let counts = pool.install(|| {
        moves
            .as_slice()
            .par_iter()
            .map(|&mv| {
                let leaves = perft::leaves_after(position, mv, depth);
                debug!("{}: {}", mv, leaves);
                on_done(mv, leaves);
                (mv, leaves)
            })
            .collect()
    });

    Ok(counts)
}
