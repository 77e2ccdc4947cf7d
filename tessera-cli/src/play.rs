use anyhow::{Context, Result};
use log::info;
use std::io::{BufRead, Write};
use tessera_othello::{Color, GameSignal, Move, ParseMoveError, Position};

/// Play an interactive game: `human` moves are read from `input`, the other side
/// is chosen by a `depth`-ply search. Returns the final position.
pub fn play_interactive<R, W>(
    mut position: Position,
    human: Color,
    depth: u32,
    mut input: R,
    mut output: W,
) -> Result<Position>
where
    R: BufRead,
    W: Write,
{
    loop {
        writeln!(output, "\n{}\n", position)?;

        let mv = if position.turn() == human {
            match read_move(&position, &mut input, &mut output)? {
                Some(mv) => mv,
                None => {
                    writeln!(output, "\nGame abandoned.")?;
                    return Ok(position);
                }
            }
        } else {
            let (mv, score) = tessera_search::search(&position, depth);
            info!("computer plays {} (score {})", mv, score);
            writeln!(output, "Computer plays {}.", mv)?;
            mv
        };

        let signal = position.try_apply(mv).with_context(|| {
            format!("unplayable move in {}", position.to_notation())
        })?;
        if signal == GameSignal::Terminal {
            break;
        }
    }

    writeln!(output, "\n{}\n", position)?;
    writeln!(
        output,
        "{}. Black {}, White {}.",
        position.winner(),
        position.disc_count(Color::Black),
        position.disc_count(Color::White)
    )?;
    Ok(position)
}

/// Prompt until the human enters a legal move. `None` on end of input.
fn read_move<R, W>(position: &Position, input: &mut R, output: &mut W) -> Result<Option<Move>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "Enter a move: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("failed to read a move")? == 0 {
            return Ok(None);
        }

        let parsed: Result<Move, ParseMoveError> = line.trim().parse();
        let mv = match parsed {
            Ok(mv) => mv,
            Err(_) => {
                writeln!(output, "Cannot parse move.")?;
                continue;
            }
        };

        let mut trial = *position;
        if trial.try_apply(mv).is_ok() {
            return Ok(Some(mv));
        }

        let moves = position.legal_moves();
        if moves.len() == 0 {
            writeln!(output, "Invalid move. Please enter 'pass'.")?;
        } else {
            writeln!(output, "Invalid move. Legal moves: {}", moves)?;
        }
    }
}
