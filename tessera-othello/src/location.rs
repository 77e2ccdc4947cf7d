//! Code for working with [`Location`]s on the Othello board.

use crate::bitboard::Bitboard;
use crate::{EDGE_LENGTH, NUM_SPACES};
use derive_more::{Display, Error, From, Into};
use itertools::Itertools;
use std::fmt::{self, Formatter, Write};

/// A location on the Othello board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Into)]
pub struct Location(Bitboard);

/// A list of locations on the Othello board, which can be iterated to retrieve them.
/// Iteration yields the lowest square index first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, From, Into)]
pub struct LocationList(Bitboard);

impl Location {
    /// Convert from a one-hot [`Bitboard`] without checking this invariant.
    /// Results in inconsistent state if `bitboard` has more than one location set.
    #[inline]
    pub fn from_onehot_unchecked(bitboard: Bitboard) -> Self {
        Self(bitboard)
    }

    /// Convert from a row-major square index. `index` must be below 64.
    #[inline]
    pub fn from_index(index: u8) -> Self {
        debug_assert!((index as usize) < NUM_SPACES);
        Self(Bitboard::square(index))
    }

    /// Convert into a row-major square index.
    #[inline]
    pub fn to_index(self) -> u8 {
        let bitboard: u64 = self.0.into();
        bitboard.trailing_zeros() as u8
    }

    /// Convert from row and column coordinates. Row 0 is the top of the board.
    pub fn from_coords(row: usize, col: usize) -> Self {
        assert!(row < EDGE_LENGTH && col < EDGE_LENGTH);
        Self::from_index((row * EDGE_LENGTH + col) as u8)
    }

    /// Get the row and column coordinates.
    pub fn to_coords(self) -> (usize, usize) {
        let index = self.to_index() as usize;
        (index / EDGE_LENGTH, index % EDGE_LENGTH)
    }
}

/// Convert this [`Location`] into string notation ("A8" is square 0).
impl fmt::Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (row, col) = self.to_coords();
        let col_str = "ABCDEFGH".chars().nth(col).ok_or(fmt::Error)?;
        let row_str = "87654321".chars().nth(row).ok_or(fmt::Error)?;
        f.write_char(col_str)?;
        f.write_char(row_str)
    }
}

impl LocationList {
    /// Returns whether `loc` is in this list.
    #[inline]
    pub fn contains(self, loc: Location) -> bool {
        let loc_bitboard: Bitboard = loc.into();
        !(loc_bitboard & self.0).is_empty()
    }
}

#[derive(Clone, Copy, Debug, Display, Error, PartialEq, Eq)]
#[display(fmt = "invalid location string")]
pub struct ParseLocationError;

/// Build a [`Location`] from a 1-indexed string notation ("A4").
impl std::str::FromStr for Location {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col_str = chars.next().ok_or(ParseLocationError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_str).ok_or(ParseLocationError)?;
        let rank = chars
            .next()
            .ok_or(ParseLocationError)?
            .to_digit(10)
            .ok_or(ParseLocationError)? as usize;

        if rank == 0 || rank > EDGE_LENGTH || chars.next().is_some() {
            return Err(ParseLocationError);
        }

        Ok(Self::from_coords(EDGE_LENGTH - rank, col))
    }
}

impl Iterator for LocationList {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        if self.0.is_empty() {
            return None;
        }

        let bitboard: u64 = self.0.into();
        let next_move = Bitboard::square(bitboard.trailing_zeros() as u8);
        self.0 ^= next_move;

        Some(Location::from_onehot_unchecked(next_move))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.0.count_occupied() as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LocationList {}

impl fmt::Display for LocationList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.into_iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn location_from_index() {
        assert_eq!(Location::from_index(0), Location(Bitboard::from(1)));
        assert_eq!(Location::from_index(63), Location(Bitboard::from(1 << 63)));
    }

    #[test]
    fn location_to_index() {
        assert_eq!(Location(Bitboard::from(1)).to_index(), 0);
        assert_eq!(Location(Bitboard::from(1 << 63)).to_index(), 63);
    }

    #[test]
    fn location_from_coords() {
        assert_eq!(Location::from_coords(0, 0), Location(Bitboard::from(1)));
        assert_eq!(Location::from_coords(0, 7), Location::from_index(7));
        assert_eq!(Location::from_coords(7, 7), Location(Bitboard::from(1 << 63)));
    }

    #[test]
    #[should_panic]
    fn location_from_coords_fail() {
        Location::from_coords(0, 8);
    }

    #[test]
    fn location_to_coords() {
        assert_eq!(Location::from_index(0).to_coords(), (0, 0));
        assert_eq!(Location::from_index(19).to_coords(), (2, 3));
        assert_eq!(Location::from_index(63).to_coords(), (7, 7));
    }

    #[test]
    fn location_from_str_success() {
        assert_eq!(Location::from_str("A8"), Ok(Location::from_index(0)));
        assert_eq!(Location::from_str("h1"), Ok(Location::from_index(63)));
        assert_eq!(Location::from_str("D6"), Ok(Location::from_coords(2, 3)));
    }

    #[test]
    fn location_from_str_fail() {
        assert_eq!(Location::from_str(""), Err(ParseLocationError));
        assert_eq!(Location::from_str("A12"), Err(ParseLocationError));
        assert_eq!(Location::from_str("AA"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A9"), Err(ParseLocationError));
        assert_eq!(Location::from_str("A0"), Err(ParseLocationError));
        assert_eq!(Location::from_str("I5"), Err(ParseLocationError));
    }

    #[test]
    fn location_to_str() {
        assert_eq!(Location::from_index(0).to_string(), "A8");
        assert_eq!(Location::from_index(63).to_string(), "H1");
        assert_eq!(Location::from_str("E2").unwrap().to_string(), "E2");
        assert_eq!(Location::from_str("f6").unwrap().to_string(), "F6");
    }

    #[test]
    fn location_list_iterates_lowest_first() {
        let list = LocationList::from(Bitboard::from((1 << 44) | (1 << 19) | (1 << 26)));
        assert_eq!(list.len(), 3);
        let indices: Vec<u8> = list.map(Location::to_index).collect();
        assert_eq!(indices, vec![19, 26, 44]);
    }

    #[test]
    fn location_list_empty() {
        let mut list = LocationList::default();
        assert_eq!(list.len(), 0);
        assert!(!list.contains(Location::from_index(0)));
        assert_eq!(list.next(), None);
    }

    #[test]
    fn location_list_display() {
        let list = LocationList::from(Bitboard::from((1 << 19) | (1 << 26)));
        assert_eq!(list.to_string(), "[D6, C5]");
        assert_eq!(LocationList::default().to_string(), "[]");
    }
}
