//! Board geometry.
//!
//! The 10x10 board is centered in a 12x12 array so that every one-step
//! offset from a playable square lands inside the array. Border cells hold
//! [`Piece::INVALID`](crate::Piece::INVALID), which stops beams and blocks
//! moves without bounds checks.
//!
//! ```text
//! index = ARR_WIDTH * (file + 1) + (rank + 1)
//! ```
//!
//! Index 0 is a border cell and doubles as "no square".

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of the playable board.
pub const BOARD_WIDTH: u8 = 10;
/// Width of the padded array.
pub const ARR_WIDTH: u8 = 12;
/// Number of cells in the padded array.
pub const ARR_SIZE: usize = ARR_WIDTH as usize * ARR_WIDTH as usize;

const FIL_ORIGIN: u8 = (ARR_WIDTH - BOARD_WIDTH) / 2;
const RNK_ORIGIN: u8 = (ARR_WIDTH - BOARD_WIDTH) / 2;

/// Offsets to the eight neighbouring squares.
pub const DIRECTIONS: [i8; 8] = [
    -(ARR_WIDTH as i8) - 1,
    -(ARR_WIDTH as i8),
    -(ARR_WIDTH as i8) + 1,
    -1,
    1,
    ARR_WIDTH as i8 - 1,
    ARR_WIDTH as i8,
    ARR_WIDTH as i8 + 1,
];

/// Index into the padded board array.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Square(pub u8);

impl Square {
    /// Off-board sentinel.
    pub const NONE: Square = Square(0);

    /// Create a square from file and rank (0-9 each).
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Square {
        debug_assert!(file < BOARD_WIDTH && rank < BOARD_WIDTH);
        Square(ARR_WIDTH * (FIL_ORIGIN + file) + RNK_ORIGIN + rank)
    }

    /// File relative to the playable board; negative or >= 10 on the border.
    #[inline]
    pub const fn file(self) -> i8 {
        (self.0 / ARR_WIDTH) as i8 - FIL_ORIGIN as i8
    }

    /// Rank relative to the playable board; negative or >= 10 on the border.
    #[inline]
    pub const fn rank(self) -> i8 {
        (self.0 % ARR_WIDTH) as i8 - RNK_ORIGIN as i8
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Check if the square is inside the playable 10x10 region.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        let (f, r) = (self.file(), self.rank());
        (self.0 as usize) < ARR_SIZE
            && f >= 0
            && f < BOARD_WIDTH as i8
            && r >= 0
            && r < BOARD_WIDTH as i8
    }

    /// Step by a raw array offset.
    #[inline]
    pub fn offset(self, delta: i8) -> Square {
        let idx = self.0 as i16 + delta as i16;
        debug_assert!(idx >= 0 && (idx as usize) < ARR_SIZE, "offset left the array: {idx}");
        Square(idx as u8)
    }

    /// The eight neighbouring cells (some may be border cells).
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        DIRECTIONS.into_iter().map(move |d| self.offset(d))
    }

    /// Iterate over all 100 playable squares, file by file.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_WIDTH).flat_map(|f| (0..BOARD_WIDTH).map(move |r| Square::new(f, r)))
    }

    /// Parse `a0`..`j9`.
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='j').contains(&file) || !rank.is_ascii_digit() {
            return None;
        }
        Some(Square::new(file as u8 - b'a', rank as u8 - b'0'))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (file, rank) = (self.file(), self.rank());
        if file >= 0 {
            write!(f, "{}{}", (b'a' + file as u8) as char, rank)
        } else {
            // Border file left of `a`.
            write!(f, "z{}", rank)
        }
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({self})")
    }
}
