//! Command-line driver: perft counts, search and interactive play.

mod args;
mod play;

use anyhow::Result;
use args::{Args, RunType};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::{Duration, Instant};
use tessera_othello::{Color, Position};

fn main() -> Result<()> {
    let args = Args::parse_normalized(std::env::args_os());

    let env = env_logger::Env::default()
        .filter_or(env_logger::DEFAULT_FILTER_ENV, args.log_level.as_str());
    env_logger::Builder::from_env(env).init();

    info!(
        "{:?} at depth {} from {}",
        args.run_type,
        args.depth,
        args.position.to_notation()
    );

    match args.run_type {
        RunType::Single => run_single(&args.position, args.depth),
        RunType::Multi => run_multi(&args.position, args.depth, args.threads)?,
        RunType::Search => run_search(&args.position, args.depth),
        RunType::Play => {
            let stdin = std::io::stdin();
            play::play_interactive(
                args.position,
                Color::from(args.human),
                args.depth,
                stdin.lock(),
                std::io::stdout(),
            )?;
        }
    }

    Ok(())
}

fn nodes_per_second(nodes: u64, elapsed: Duration) -> f64 {
    nodes as f64 / elapsed.as_secs_f64().max(1e-9)
}

/// Perft at every depth from 1 up to `max_depth` on one thread.
fn run_single(position: &Position, max_depth: u32) {
    println!("{}\n", position);

    for depth in 1..=max_depth {
        let start = Instant::now();
        let nodes = tessera_search::count_leaves(position, depth);
        let elapsed = start.elapsed();

        println!(
            "depth {:>2}: {:>14} nodes {:>12} us {:>14.0} nodes/s",
            depth,
            nodes,
            elapsed.as_micros(),
            nodes_per_second(nodes, elapsed)
        );
    }
}

/// Perft at `depth` with each root move on its own worker.
fn run_multi(position: &Position, depth: u32, threads: usize) -> Result<()> {
    println!("{}\n", position);

    let progress = ProgressBar::new(position.legal_moves().len().max(1) as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} root moves {msg}")?,
    );

    let start = Instant::now();
    let counts = tessera_search::divide_parallel(position, depth, threads, |mv, leaves| {
        progress.set_message(format!("{}: {}", mv, leaves));
        progress.inc(1);
    })?;
    let elapsed = start.elapsed();
    progress.finish_and_clear();

    for (mv, leaves) in &counts {
        println!("{:>4}: {}", mv, leaves);
    }

    let total: u64 = counts.iter().map(|(_, leaves)| leaves).sum();
    println!(
        "\ndepth {}: {} nodes in {:.3} s ({:.0} nodes/s)",
        depth,
        total,
        elapsed.as_secs_f64(),
        nodes_per_second(total, elapsed)
    );
    Ok(())
}

fn run_search(position: &Position, depth: u32) {
    println!("{}\n", position);

    let start = Instant::now();
    let (mv, score) = tessera_search::search(position, depth);
    println!(
        "best move {} (score {}) at depth {} in {:.3} s",
        mv,
        score,
        depth,
        start.elapsed().as_secs_f64()
    );
}
