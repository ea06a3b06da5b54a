//! Piece codec: type, color, and orientation packed into a single byte.
//!
//! ```text
//! Bits 0-1: orientation (kings: NN EE SS WW, pawns: NW NE SE SW)
//! Bits 2-3: piece type  (0=empty, 1=pawn, 2=king, 3=invalid border)
//! Bit  4:   color       (0=White, 1=Black)
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Rotation;

/// Side identifier. White moves on even plies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Get the opposing color.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode the low bit.
    #[inline]
    pub const fn from_bits(bits: u8) -> Color {
        if bits & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    pub fn all() -> impl Iterator<Item = Color> {
        [Color::White, Color::Black].into_iter()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("White"),
            Color::Black => f.write_str("Black"),
        }
    }
}

/// What occupies a board cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    Empty = 0,
    Pawn = 1,
    King = 2,
    /// Sentinel held by every cell of the border margin.
    Invalid = 3,
}

impl PieceType {
    #[inline]
    pub const fn from_bits(bits: u8) -> PieceType {
        match bits & 0b11 {
            0 => PieceType::Empty,
            1 => PieceType::Pawn,
            2 => PieceType::King,
            _ => PieceType::Invalid,
        }
    }
}

/// A king's facing, which is also the direction a beam travels.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Direction {
    #[inline]
    pub const fn from_bits(bits: u8) -> Direction {
        match bits & 0b11 {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }

    /// Square offset of one beam step in this direction.
    #[inline]
    pub const fn beam_offset(self) -> i8 {
        match self {
            Direction::North => 1,
            Direction::East => crate::square::ARR_WIDTH as i8,
            Direction::South => -1,
            Direction::West => -(crate::square::ARR_WIDTH as i8),
        }
    }
}

const KING_CODES: [[&str; 4]; 2] = [["NN", "EE", "SS", "WW"], ["nn", "ee", "ss", "ww"]];
const PAWN_CODES: [[&str; 4]; 2] = [["NW", "NE", "SE", "SW"], ["nw", "ne", "se", "sw"]];

/// Packed piece value. See module documentation for the layout.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piece(pub u8);

impl Piece {
    const ORI_MASK: u8 = 0b11;
    const PTYPE_SHIFT: u32 = 2;
    const COLOR_SHIFT: u32 = 4;

    /// Number of significant bits in a piece value.
    pub const BITS: u32 = 5;
    /// Number of distinct piece encodings.
    pub const COUNT: usize = 1 << Self::BITS;

    pub const EMPTY: Piece = Piece(0);
    pub const INVALID: Piece = Piece((PieceType::Invalid as u8) << Self::PTYPE_SHIFT);

    #[inline]
    pub const fn new(ptype: PieceType, color: Color, orientation: u8) -> Piece {
        Piece(
            ((color as u8) << Self::COLOR_SHIFT)
                | ((ptype as u8) << Self::PTYPE_SHIFT)
                | (orientation & Self::ORI_MASK),
        )
    }

    #[inline]
    pub const fn pawn(color: Color, orientation: u8) -> Piece {
        Piece::new(PieceType::Pawn, color, orientation)
    }

    #[inline]
    pub const fn king(color: Color, facing: Direction) -> Piece {
        Piece::new(PieceType::King, color, facing as u8)
    }

    #[inline]
    pub const fn ptype(self) -> PieceType {
        PieceType::from_bits(self.0 >> Self::PTYPE_SHIFT)
    }

    /// Color of the piece. Meaningless for empty and invalid cells.
    #[inline]
    pub const fn color(self) -> Color {
        Color::from_bits(self.0 >> Self::COLOR_SHIFT)
    }

    #[inline]
    pub const fn orientation(self) -> u8 {
        self.0 & Self::ORI_MASK
    }

    /// King facing (or the raw orientation read as a direction).
    #[inline]
    pub const fn facing(self) -> Direction {
        Direction::from_bits(self.0)
    }

    #[inline]
    pub const fn with_orientation(self, orientation: u8) -> Piece {
        Piece((self.0 & !Self::ORI_MASK) | (orientation & Self::ORI_MASK))
    }

    /// Rotate clockwise by the given quarter turns.
    #[inline]
    pub const fn rotated(self, rot: Rotation) -> Piece {
        self.with_orientation(self.orientation().wrapping_add(rot as u8))
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self.ptype(), PieceType::Empty)
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        matches!(self.ptype(), PieceType::Pawn)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        matches!(self.ptype(), PieceType::King)
    }

    /// Pawn or king.
    #[inline]
    pub const fn is_occupied(self) -> bool {
        matches!(self.ptype(), PieceType::Pawn | PieceType::King)
    }

    /// Two-letter notation code (uppercase for White), or None for empty/invalid.
    pub fn code(self) -> Option<&'static str> {
        let ori = self.orientation() as usize;
        let color = self.color().index();
        match self.ptype() {
            PieceType::King => Some(KING_CODES[color][ori]),
            PieceType::Pawn => Some(PAWN_CODES[color][ori]),
            PieceType::Empty | PieceType::Invalid => None,
        }
    }

    /// Parse a two-letter notation code.
    pub fn from_code(code: &str) -> Option<Piece> {
        for color in Color::all() {
            for ori in 0..4u8 {
                if KING_CODES[color.index()][ori as usize] == code {
                    return Some(Piece::new(PieceType::King, color, ori));
                }
                if PAWN_CODES[color.index()][ori as usize] == code {
                    return Some(Piece::new(PieceType::Pawn, color, ori));
                }
            }
        }
        None
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptype() {
            PieceType::Empty => f.write_str("Piece(--)"),
            PieceType::Invalid => f.write_str("Piece(xx)"),
            _ => write!(f, "Piece({})", self.code().unwrap_or("??")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }

    #[test]
    fn test_piece_fields() {
        let p = Piece::new(PieceType::Pawn, Color::Black, 2);
        assert_eq!(p.ptype(), PieceType::Pawn);
        assert_eq!(p.color(), Color::Black);
        assert_eq!(p.orientation(), 2);
        assert_eq!(p.0, 0b1_01_10);
    }

    #[test]
    fn test_piece_fits_in_bits() {
        for color in Color::all() {
            for ori in 0..4 {
                for ptype in [PieceType::Pawn, PieceType::King] {
                    assert!((Piece::new(ptype, color, ori).0 as usize) < Piece::COUNT);
                }
            }
        }
    }

    #[test]
    fn test_empty_and_invalid() {
        assert!(Piece::EMPTY.is_empty());
        assert!(!Piece::EMPTY.is_occupied());
        assert_eq!(Piece::INVALID.ptype(), PieceType::Invalid);
        assert!(!Piece::INVALID.is_occupied());
    }

    #[test]
    fn test_rotation_wraps() {
        let king = Piece::king(Color::White, Direction::West);
        assert_eq!(king.rotated(Rotation::Right).facing(), Direction::North);
        assert_eq!(king.rotated(Rotation::UTurn).facing(), Direction::East);
        assert_eq!(king.rotated(Rotation::Left).facing(), Direction::South);
        assert_eq!(king.rotated(Rotation::None), king);
    }

    #[test]
    fn test_rotation_keeps_type_and_color() {
        let pawn = Piece::pawn(Color::Black, 3);
        let turned = pawn.rotated(Rotation::Right);
        assert_eq!(turned.ptype(), PieceType::Pawn);
        assert_eq!(turned.color(), Color::Black);
        assert_eq!(turned.orientation(), 0);
    }

    #[test]
    fn test_codes() {
        assert_eq!(Piece::king(Color::White, Direction::North).code(), Some("NN"));
        assert_eq!(Piece::king(Color::Black, Direction::West).code(), Some("ww"));
        assert_eq!(Piece::pawn(Color::White, 2).code(), Some("SE"));
        assert_eq!(Piece::pawn(Color::Black, 0).code(), Some("nw"));
        assert_eq!(Piece::EMPTY.code(), None);

        for code in ["NN", "ee", "SW", "ne"] {
            assert_eq!(Piece::from_code(code).and_then(Piece::code), Some(code));
        }
        assert_eq!(Piece::from_code("Nn"), None);
        assert_eq!(Piece::from_code("xx"), None);
    }

    #[test]
    fn test_beam_offsets_are_opposite() {
        assert_eq!(Direction::North.beam_offset(), -Direction::South.beam_offset());
        assert_eq!(Direction::East.beam_offset(), -Direction::West.beam_offset());
    }
}
