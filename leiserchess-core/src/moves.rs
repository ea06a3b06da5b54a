//! Move codec.
//!
//! ```text
//! Bits 0-7:   to-square
//! Bits 8-15:  from-square
//! Bits 16-17: rotation (0=none, 1=right, 2=u-turn, 3=left)
//! Bits 18-19: piece type of the mover
//! ```
//!
//! A move with `from == to` is an in-place rotation, or the king's null
//! move when the rotation is none. The all-zero value is never legal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::PieceType;
use crate::square::Square;

/// Quarter turns applied to a piece, clockwise.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rotation {
    None = 0,
    Right = 1,
    UTurn = 2,
    Left = 3,
}

impl Rotation {
    #[inline]
    pub const fn from_bits(bits: u8) -> Rotation {
        match bits & 0b11 {
            0 => Rotation::None,
            1 => Rotation::Right,
            2 => Rotation::UTurn,
            _ => Rotation::Left,
        }
    }

    /// The three rotations that actually turn a piece.
    pub const TURNS: [Rotation; 3] = [Rotation::Right, Rotation::UTurn, Rotation::Left];

    /// Notation letter, None for no rotation.
    pub const fn symbol(self) -> Option<char> {
        match self {
            Rotation::None => None,
            Rotation::Right => Some('R'),
            Rotation::UTurn => Some('U'),
            Rotation::Left => Some('L'),
        }
    }

    pub fn from_symbol(c: char) -> Option<Rotation> {
        match c {
            'R' => Some(Rotation::Right),
            'U' => Some(Rotation::UTurn),
            'L' => Some(Rotation::Left),
            _ => None,
        }
    }
}

/// Packed move. See module documentation for the layout.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Move(pub u32);

impl Move {
    const TO_SHIFT: u32 = 0;
    const FROM_SHIFT: u32 = 8;
    const ROT_SHIFT: u32 = 16;
    const PTYPE_SHIFT: u32 = 18;
    const SQ_MASK: u32 = 0xFF;
    const ROT_MASK: u32 = 0b11;
    const PTYPE_MASK: u32 = 0b11;

    /// Packed values fit in this many bits.
    pub const BITS: u32 = 20;

    #[inline]
    pub const fn new(ptype: PieceType, rot: Rotation, from: Square, to: Square) -> Move {
        Move(
            ((ptype as u32 & Self::PTYPE_MASK) << Self::PTYPE_SHIFT)
                | ((rot as u32 & Self::ROT_MASK) << Self::ROT_SHIFT)
                | ((from.0 as u32 & Self::SQ_MASK) << Self::FROM_SHIFT)
                | ((to.0 as u32 & Self::SQ_MASK) << Self::TO_SHIFT),
        )
    }

    #[inline]
    pub const fn translation(ptype: PieceType, from: Square, to: Square) -> Move {
        Move::new(ptype, Rotation::None, from, to)
    }

    #[inline]
    pub const fn rotation(ptype: PieceType, sq: Square, rot: Rotation) -> Move {
        Move::new(ptype, rot, sq, sq)
    }

    /// The king's pass: no translation, no rotation, laser still fires.
    #[inline]
    pub const fn null(king_sq: Square) -> Move {
        Move::new(PieceType::King, Rotation::None, king_sq, king_sq)
    }

    #[inline]
    pub const fn ptype(self) -> PieceType {
        PieceType::from_bits((self.0 >> Self::PTYPE_SHIFT) as u8)
    }

    #[inline]
    pub const fn rot(self) -> Rotation {
        Rotation::from_bits((self.0 >> Self::ROT_SHIFT) as u8)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square(((self.0 >> Self::FROM_SHIFT) & Self::SQ_MASK) as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square(((self.0 >> Self::TO_SHIFT) & Self::SQ_MASK) as u8)
    }

    #[inline]
    pub const fn is_translation(self) -> bool {
        self.from().0 != self.to().0
    }

    #[inline]
    pub const fn is_null_move(self) -> bool {
        !self.is_translation() && matches!(self.rot(), Rotation::None)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.from())?;
        if self.is_translation() {
            return write!(f, "{}", self.to());
        }
        match self.rot().symbol() {
            Some(c) => write!(f, "{c}"),
            None => write!(f, "{}", self.to()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}

/// Move plus an ordering score in the upper half, for search drivers that
/// sort candidate lists with a plain integer sort.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SortableMove(pub u64);

impl SortableMove {
    #[inline]
    pub const fn new(mv: Move, score: u32) -> SortableMove {
        SortableMove(((score as u64) << 32) | mv.0 as u64)
    }

    #[inline]
    pub const fn mv(self) -> Move {
        Move(self.0 as u32 & ((1 << Move::BITS) - 1))
    }

    #[inline]
    pub const fn score(self) -> u32 {
        (self.0 >> 32) as u32
    }
}

/// Upper bound on moves from one position: 1 king x (8 + 4) + 13 pawns x (8 + 3).
pub const MAX_NUM_MOVES: usize = 160;

/// A fixed-size move list that avoids heap allocation.
#[derive(Clone, Copy)]
pub struct MoveList {
    moves: [Move; MAX_NUM_MOVES],
    len: u8,
}

impl MoveList {
    /// Create an empty move list.
    #[inline]
    pub const fn new() -> MoveList {
        MoveList {
            moves: [Move(0); MAX_NUM_MOVES],
            len: 0,
        }
    }

    /// Add a move to the list.
    #[inline]
    pub fn push(&mut self, mv: Move) {
        assert!((self.len as usize) < MAX_NUM_MOVES, "move list overflow");
        self.moves[self.len as usize] = mv;
        self.len += 1;
    }

    /// Get the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Check if empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get a move by index.
    #[inline]
    pub fn get(&self, idx: usize) -> Move {
        self.as_slice()[idx]
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len as usize]
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    /// Sort by packed value, for order-insensitive comparison.
    pub fn sort(&mut self) {
        self.moves[..self.len as usize].sort_unstable();
    }

    /// Iterate over moves.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.as_slice().iter().copied()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
