//! Text notation for positions.
//!
//! Eight rows separated by `/`, top row first. Within a row a digit `1`-`8` skips
//! that many empty squares and `B`/`W` is a black/white disc. The board is followed
//! by the turn digit (`0` white, `1` black) and the pass-flag digit (`0`/`1`):
//!
//! ```text
//! 8/8/8/3WB3/3BW3/8/8/8 1 0
//! ```

use crate::bitboard::Bitboard;
use crate::position::{Color, OverlappingDiscsError, Position};
use crate::EDGE_LENGTH;
use derive_more::{Display, Error};
use itertools::Itertools;

/// Notation of the standard starting position.
pub const START_NOTATION: &str = "8/8/8/3WB3/3BW3/8/8/8 1 0";

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
pub enum ParsePositionError {
    #[display(fmt = "missing board field")]
    MissingBoard,
    #[display(fmt = "expected 8 rows, found {}", found)]
    RowCount { found: usize },
    #[display(fmt = "row {} does not cover exactly 8 squares", row)]
    RowWidth { row: usize },
    #[display(fmt = "unexpected character {:?} in row {}", found, row)]
    UnexpectedChar { row: usize, found: char },
    #[display(fmt = "missing turn field")]
    MissingTurn,
    #[display(fmt = "turn must be 0 (white) or 1 (black)")]
    InvalidTurn,
    #[display(fmt = "missing pass flag field")]
    MissingPassFlag,
    #[display(fmt = "pass flag must be 0 or 1")]
    InvalidPassFlag,
    #[display(fmt = "unexpected input after the pass flag")]
    TrailingInput,
    #[display(fmt = "a square is occupied by both colors")]
    OverlappingDiscs,
}

impl From<OverlappingDiscsError> for ParsePositionError {
    fn from(_: OverlappingDiscsError) -> Self {
        ParsePositionError::OverlappingDiscs
    }
}

fn parse_row(row: usize, row_str: &str) -> Result<(Bitboard, Bitboard), ParsePositionError> {
    let mut black = Bitboard::EMPTY;
    let mut white = Bitboard::EMPTY;
    let mut col = 0;

    for c in row_str.chars() {
        match c {
            '1'..='8' => col += (c as u8 - b'0') as usize,
            'B' | 'W' => {
                if col >= EDGE_LENGTH {
                    return Err(ParsePositionError::RowWidth { row });
                }

                let square = Bitboard::square((row * EDGE_LENGTH + col) as u8);
                if c == 'B' {
                    black |= square;
                } else {
                    white |= square;
                }
                col += 1;
            }
            _ => return Err(ParsePositionError::UnexpectedChar { row, found: c }),
        }

        if col > EDGE_LENGTH {
            return Err(ParsePositionError::RowWidth { row });
        }
    }

    if col != EDGE_LENGTH {
        return Err(ParsePositionError::RowWidth { row });
    }
    Ok((black, white))
}

impl std::str::FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();

        let board = fields.next().ok_or(ParsePositionError::MissingBoard)?;
        let rows: Vec<&str> = board.split('/').collect();
        if rows.len() != EDGE_LENGTH {
            return Err(ParsePositionError::RowCount { found: rows.len() });
        }

        let mut black = Bitboard::EMPTY;
        let mut white = Bitboard::EMPTY;
        for (row, row_str) in rows.into_iter().enumerate() {
            let (row_black, row_white) = parse_row(row, row_str)?;
            black |= row_black;
            white |= row_white;
        }

        let turn = match fields.next().ok_or(ParsePositionError::MissingTurn)? {
            "0" => Color::White,
            "1" => Color::Black,
            _ => return Err(ParsePositionError::InvalidTurn),
        };

        let pass_flag = match fields.next().ok_or(ParsePositionError::MissingPassFlag)? {
            "0" => false,
            "1" => true,
            _ => return Err(ParsePositionError::InvalidPassFlag),
        };

        if fields.next().is_some() {
            return Err(ParsePositionError::TrailingInput);
        }

        Ok(Position::from_parts(black, white, turn, pass_flag)?)
    }
}

impl Position {
    /// Serialize into the notation accepted by [`str::parse`].
    pub fn to_notation(&self) -> String {
        let black = self.discs(Color::Black);
        let white = self.discs(Color::White);

        let rows = (0..EDGE_LENGTH)
            .map(|row| {
                let mut out = String::new();
                let mut empties = 0;

                for col in 0..EDGE_LENGTH {
                    let index = (row * EDGE_LENGTH + col) as u8;
                    let disc = if black.contains(index) {
                        'B'
                    } else if white.contains(index) {
                        'W'
                    } else {
                        empties += 1;
                        continue;
                    };

                    if empties > 0 {
                        out.push_str(&empties.to_string());
                        empties = 0;
                    }
                    out.push(disc);
                }

                if empties > 0 {
                    out.push_str(&empties.to_string());
                }
                out
            })
            .join("/");

        format!(
            "{} {} {}",
            rows,
            self.turn().index(),
            self.pass_flag() as u8
        )
    }
}
