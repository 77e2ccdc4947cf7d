//! Low-level bitboard operations.
//!
//! For efficiency, [`Bitboard`] operations are unchecked and may produce
//! inconsistent state if invalid data is passed.
//!
//! Under the hood, all these operations work on u64 bitboards. By convention,
//! bit `i` is square `i`: squares are numbered in row-major order starting
//! from the upper-left corner, so bit 0 is A8 and bit 63 is H1.

use crate::{utils, NUM_SPACES};
use derive_more::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, From, Into, Not,
};
use std::fmt::{self, Display, Formatter};

/// Holds a single bit per location on an Othello board.
/// Wraps [`u64`] for efficient bit-twiddling, but avoids mixing with numerics.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    PartialOrd,
    Ord,
    Default,
    From,
    Into,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
pub struct Bitboard(u64);

/// Starting bitboard for Black: D4 and E5.
pub const BLACK_START: Bitboard = Bitboard(0x0000_0008_1000_0000);

/// Starting bitboard for White: D5 and E4.
pub const WHITE_START: Bitboard = Bitboard(0x0000_0010_0800_0000);

// Masks selecting everything except the far-left and far-right columns.
const NOT_A_FILE: u64 = 0xfefe_fefe_fefe_fefe;
const NOT_H_FILE: u64 = 0x7f7f_7f7f_7f7f_7f7f;
const FULL_MASK: u64 = 0xffff_ffff_ffff_ffff;

impl Display for Bitboard {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        utils::format_grid(
            self.into_iter().map(|bit| match bit {
                false => '.',
                true => '#',
            }),
            f,
        )
    }
}

impl Bitboard {
    /// A bitboard with no locations set.
    pub const EMPTY: Self = Self(0);

    /// Construct a one-hot bitboard for the square at `index`.
    #[inline]
    pub const fn square(index: u8) -> Self {
        Self(1 << index)
    }

    /// Count the number of occupied spaces in the bitboard.
    #[inline]
    pub fn count_occupied(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Count the number of empty spaces in the bitboard.
    #[inline]
    pub fn count_empty(self) -> u8 {
        self.0.count_zeros() as u8
    }

    /// Return true if this bitboard is empty.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if the square at `index` is set.
    #[inline]
    pub fn contains(self, index: u8) -> bool {
        (self.0 >> index) & 1 != 0
    }
}

/// Score a board as: # my pieces - # opponent pieces.
/// Undefined behavior if both players have a piece at the same location.
#[inline]
pub fn score_absolute_difference(active: Bitboard, opponent: Bitboard) -> i8 {
    (active.0.count_ones() as i8) - (opponent.0.count_ones() as i8)
}

// Smear `generator` one step at a time through `propagator`. Six steps cover
// the longest run of opponent discs that can be bracketed on an 8-wide board.
#[inline(always)]
fn flood_left(generator: u64, propagator: u64, shift: u32) -> u64 {
    let mut flood = (generator << shift) & propagator;
    flood |= (flood << shift) & propagator;
    flood |= (flood << shift) & propagator;
    flood |= (flood << shift) & propagator;
    flood |= (flood << shift) & propagator;
    flood |= (flood << shift) & propagator;
    flood
}

#[inline(always)]
fn flood_right(generator: u64, propagator: u64, shift: u32) -> u64 {
    let mut flood = (generator >> shift) & propagator;
    flood |= (flood >> shift) & propagator;
    flood |= (flood >> shift) & propagator;
    flood |= (flood >> shift) & propagator;
    flood |= (flood >> shift) & propagator;
    flood |= (flood >> shift) & propagator;
    flood
}

// Squares one step past a run of opponent discs that starts next to one of ours.
#[inline(always)]
fn moves_left(active: u64, opponent: u64, shift: u32, edge_mask: u64) -> u64 {
    (flood_left(active, opponent & edge_mask, shift) << shift) & edge_mask
}

#[inline(always)]
fn moves_right(active: u64, opponent: u64, shift: u32, edge_mask: u64) -> u64 {
    (flood_right(active, opponent & edge_mask, shift) >> shift) & edge_mask
}

// All-ones when `anchor` is nonzero, zero otherwise.
#[inline(always)]
fn keep_if(anchor: u64, run: u64) -> u64 {
    run & 0u64.wrapping_sub((anchor != 0) as u64)
}

#[inline(always)]
fn flips_left(placed: u64, active: u64, opponent: u64, shift: u32, edge_mask: u64) -> u64 {
    let run = flood_left(placed, opponent & edge_mask, shift);
    keep_if((run << shift) & edge_mask & active, run)
}

#[inline(always)]
fn flips_right(placed: u64, active: u64, opponent: u64, shift: u32, edge_mask: u64) -> u64 {
    let run = flood_right(placed, opponent & edge_mask, shift);
    keep_if((run >> shift) & edge_mask & active, run)
}

/// Compute a mask of the legal moves for the active player from
/// masks of the active player's pieces and the opponent's pieces.
/// The result is meaningless if the two masks overlap.
#[inline]
pub fn get_move_mask(active: Bitboard, opponent: Bitboard) -> Bitboard {
    let (active, opponent) = (active.0, opponent.0);
    let empties = !(active | opponent);

    // Directions in pairs: E/W, S/N, SE/NW, SW/NE.
    // The first direction is handled by SHL, the second by SHR.
    let moves = moves_left(active, opponent, 1, NOT_A_FILE)
        | moves_right(active, opponent, 1, NOT_H_FILE)
        | moves_left(active, opponent, 8, FULL_MASK)
        | moves_right(active, opponent, 8, FULL_MASK)
        | moves_left(active, opponent, 9, NOT_A_FILE)
        | moves_right(active, opponent, 9, NOT_H_FILE)
        | moves_left(active, opponent, 7, NOT_H_FILE)
        | moves_right(active, opponent, 7, NOT_A_FILE);

    Bitboard(moves & empties)
}

/// Compute the opponent discs flipped when the active player places a disc at
/// `move_mask`, which must be a one-hot bitboard of an empty square.
/// The placed disc itself is not part of the result.
/// Undefined behavior if an invalid Othello board or `move_mask` is provided.
#[inline]
pub fn get_flip_mask(active: Bitboard, opponent: Bitboard, move_mask: Bitboard) -> Bitboard {
    let (placed, active, opponent) = (move_mask.0, active.0, opponent.0);

    let flips = flips_left(placed, active, opponent, 1, NOT_A_FILE)
        | flips_right(placed, active, opponent, 1, NOT_H_FILE)
        | flips_left(placed, active, opponent, 8, FULL_MASK)
        | flips_right(placed, active, opponent, 8, FULL_MASK)
        | flips_left(placed, active, opponent, 9, NOT_A_FILE)
        | flips_right(placed, active, opponent, 9, NOT_H_FILE)
        | flips_left(placed, active, opponent, 7, NOT_H_FILE)
        | flips_right(placed, active, opponent, 7, NOT_A_FILE);

    Bitboard(flips)
}

/// Iterator for the bits in a [`Bitboard`].
#[derive(Clone, Copy, Debug)]
pub struct Bits {
    index: usize,
    bitboard: Bitboard,
}

impl Iterator for Bits {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == NUM_SPACES {
            return None;
        }

        let bit = self.bitboard.contains(self.index as u8);
        self.index += 1;

        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = NUM_SPACES - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Bits {}

/// Iterate over the bits in row-major order.
impl IntoIterator for Bitboard {
    type Item = bool;
    type IntoIter = Bits;

    fn into_iter(self) -> Self::IntoIter {
        Bits {
            index: 0,
            bitboard: self,
        }
    }
}
