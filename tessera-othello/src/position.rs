//! Game-level Othello state: two color bitboards, the side to move and the pass flag.
//!
//! A [`Position`] is mutated in place by [`Position::apply`]. Search code takes a
//! [`MoveUndo`] snapshot before a trial move and restores it afterwards.

use crate::bitboard::{self, Bitboard, BLACK_START, WHITE_START};
use crate::location::{Location, LocationList, ParseLocationError};
use crate::{utils, NUM_SPACES};
use derive_more::{Display, Error};
use std::convert::TryFrom;
use std::fmt;

/// One of the two players in a game.
/// The discriminants match the turn digit of the position notation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Index of this color's bitboard in [`Position`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Default for Color {
    /// Gets the starting player (black).
    fn default() -> Self {
        Self::Black
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    /// Gets the other player.
    #[inline]
    fn not(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("Black"),
            Color::White => f.write_str("White"),
        }
    }
}

/// An action in an Othello game: place a disc or pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Location),
    Pass,
}

impl Move {
    /// The signed token used for a pass.
    pub const PASS_TOKEN: i8 = -1;

    #[inline]
    pub fn is_pass(self) -> bool {
        self == Move::Pass
    }
}

impl From<Location> for Move {
    fn from(loc: Location) -> Self {
        Self::Place(loc)
    }
}

/// Convert into the signed token form: the square index, or -1 for a pass.
impl From<Move> for i8 {
    fn from(mv: Move) -> Self {
        match mv {
            Move::Place(loc) => loc.to_index() as i8,
            Move::Pass => Move::PASS_TOKEN,
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid move token {}", token)]
pub struct InvalidMoveToken {
    pub token: i8,
}

impl TryFrom<i8> for Move {
    type Error = InvalidMoveToken;

    fn try_from(token: i8) -> Result<Self, Self::Error> {
        match token {
            Move::PASS_TOKEN => Ok(Move::Pass),
            0..=63 => Ok(Move::Place(Location::from_index(token as u8))),
            _ => Err(InvalidMoveToken { token }),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid move string")]
pub struct ParseMoveError;

impl From<ParseLocationError> for ParseMoveError {
    fn from(_: ParseLocationError) -> Self {
        ParseMoveError
    }
}

/// Build a [`Move`] from location notation ("D3") or "pass".
impl std::str::FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("pass") {
            return Ok(Move::Pass);
        }
        Ok(Move::Place(s.parse()?))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Place(loc) => write!(f, "{}", loc),
            Move::Pass => f.write_str("pass"),
        }
    }
}

/// Whether the game goes on after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameSignal {
    Continue,
    /// Both players passed in succession.
    Terminal,
}

/// Result of comparing final disc counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BlackWins => f.write_str("Black wins"),
            Outcome::WhiteWins => f.write_str("White wins"),
            Outcome::Draw => f.write_str("Draw"),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "illegal move: {}", mv)]
pub struct IllegalMoveError {
    pub mv: Move,
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "a square is occupied by both colors")]
pub struct OverlappingDiscsError;

/// A flat copy of a [`Position`], taken before a move so it can be undone exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveUndo {
    discs: [Bitboard; 2],
    turn: Color,
    pass_flag: bool,
}

/// The complete state of an Othello game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    discs: [Bitboard; 2],
    turn: Color,
    pass_flag: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The standard starting position, black to move.
    pub const fn new() -> Self {
        Self {
            discs: [WHITE_START, BLACK_START],
            turn: Color::Black,
            pass_flag: false,
        }
    }

    /// Build a position from color bitboards, rejecting squares claimed by both colors.
    pub fn from_parts(
        black: Bitboard,
        white: Bitboard,
        turn: Color,
        pass_flag: bool,
    ) -> Result<Self, OverlappingDiscsError> {
        if !(black & white).is_empty() {
            return Err(OverlappingDiscsError);
        }

        Ok(Self {
            discs: [white, black],
            turn,
            pass_flag,
        })
    }

    /// The discs of one color.
    #[inline]
    pub fn discs(&self, color: Color) -> Bitboard {
        self.discs[color.index()]
    }

    /// The color to move next.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Whether the previous move was a pass.
    #[inline]
    pub fn pass_flag(&self) -> bool {
        self.pass_flag
    }

    /// Get a mask indicating where the occupied spaces are.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.discs[0] | self.discs[1]
    }

    /// Get a mask indicating where the empty spaces are.
    #[inline]
    pub fn empty(&self) -> Bitboard {
        !self.occupied()
    }

    #[inline]
    fn active(&self) -> Bitboard {
        self.discs[self.turn.index()]
    }

    #[inline]
    fn opponent(&self) -> Bitboard {
        self.discs[(!self.turn).index()]
    }

    /// Get the locations where the side to move may place a disc.
    /// An empty list means the side to move must pass.
    #[inline]
    pub fn legal_moves(&self) -> LocationList {
        LocationList::from(bitboard::get_move_mask(self.active(), self.opponent()))
    }

    /// Returns whether the side to move has any placement.
    #[inline]
    pub fn has_legal_move(&self) -> bool {
        !bitboard::get_move_mask(self.active(), self.opponent()).is_empty()
    }

    /// Returns whether neither side can place a disc.
    pub fn is_game_over(&self) -> bool {
        !self.has_legal_move()
            && bitboard::get_move_mask(self.opponent(), self.active()).is_empty()
    }

    /// The opponent discs that placing at `loc` would flip, without making the move.
    #[inline]
    pub fn flips_for(&self, loc: Location) -> Bitboard {
        bitboard::get_flip_mask(self.active(), self.opponent(), loc.into())
    }

    /// Make a move for the side to move.
    ///
    /// `mv` must come from [`Position::legal_moves`], or be [`Move::Pass`] when that list
    /// is empty. This is checked only in debug builds; use [`Position::try_apply`] for
    /// untrusted input.
    ///
    /// A pass always hands the turn over. If the previous move was also a pass the
    /// game is over and [`GameSignal::Terminal`] is returned.
    #[inline]
    pub fn apply(&mut self, mv: Move) -> GameSignal {
        match mv {
            Move::Place(loc) => {
                self.place(loc);
                GameSignal::Continue
            }
            Move::Pass => self.pass(),
        }
    }

    #[inline]
    fn place(&mut self, loc: Location) {
        debug_assert!(
            self.legal_moves().contains(loc),
            "illegal placement at {}",
            loc
        );

        let placed: Bitboard = loc.into();
        let flips = bitboard::get_flip_mask(self.active(), self.opponent(), placed);

        // A flipped square is in exactly one set, so toggling both swaps its color.
        self.discs[0] ^= flips;
        self.discs[1] ^= flips;
        self.discs[self.turn.index()] |= placed;

        self.pass_flag = false;
        self.turn = !self.turn;
    }

    #[inline]
    fn pass(&mut self) -> GameSignal {
        debug_assert!(!self.has_legal_move(), "pass while a placement is available");

        let already_passed = self.pass_flag;
        self.turn = !self.turn;
        if already_passed {
            return GameSignal::Terminal;
        }

        self.pass_flag = true;
        GameSignal::Continue
    }

    /// Make a move after checking that it is legal.
    pub fn try_apply(&mut self, mv: Move) -> Result<GameSignal, IllegalMoveError> {
        let legal_moves = self.legal_moves();
        let legal = match mv {
            Move::Place(loc) => legal_moves.contains(loc),
            Move::Pass => legal_moves.len() == 0,
        };

        if !legal {
            return Err(IllegalMoveError { mv });
        }
        Ok(self.apply(mv))
    }

    /// Save everything needed to undo the next move.
    #[inline]
    pub fn snapshot(&self) -> MoveUndo {
        MoveUndo {
            discs: self.discs,
            turn: self.turn,
            pass_flag: self.pass_flag,
        }
    }

    /// Return to the state captured by `undo`.
    #[inline]
    pub fn restore(&mut self, undo: MoveUndo) {
        self.discs = undo.discs;
        self.turn = undo.turn;
        self.pass_flag = undo.pass_flag;
    }

    /// Number of discs of one color.
    #[inline]
    pub fn disc_count(&self, color: Color) -> u8 {
        self.discs(color).count_occupied()
    }

    /// Disc count of `color` minus the disc count of its opponent.
    #[inline]
    pub fn material(&self, color: Color) -> i8 {
        bitboard::score_absolute_difference(self.discs(color), self.discs(!color))
    }

    /// Compare disc counts. Meaningful once the game is over.
    pub fn winner(&self) -> Outcome {
        let black = self.disc_count(Color::Black);
        let white = self.disc_count(Color::White);

        if black > white {
            Outcome::BlackWins
        } else if white > black {
            Outcome::WhiteWins
        } else {
            Outcome::Draw
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let black = self.discs(Color::Black);
        let white = self.discs(Color::White);
        let moves: Bitboard = self.legal_moves().into();

        utils::format_grid(
            (0..NUM_SPACES as u8).map(|i| {
                if black.contains(i) {
                    'B'
                } else if white.contains(i) {
                    'W'
                } else if moves.contains(i) {
                    '*'
                } else {
                    '.'
                }
            }),
            f,
        )?;

        write!(
            f,
            "\nBlack: {}  White: {}\n{} to move",
            self.disc_count(Color::Black),
            self.disc_count(Color::White),
            self.turn
        )?;
        if self.pass_flag {
            f.write_str(" (last move was a pass)")?;
        }
        Ok(())
    }
}
