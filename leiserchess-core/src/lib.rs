//! Leiserchess rules engine with a padded-array board representation.
//!
//! # Piece Encoding (5-bit)
//!
//! ```text
//! Bits 0-1: orientation (kings: NN EE SS WW, pawns: NW NE SE SW)
//! Bits 2-3: piece type  (0=empty, 1=pawn, 2=king, 3=invalid border)
//! Bit 4:    color       (0=White, 1=Black)
//! ```
//!
//! # Board Layout
//!
//! ```text
//! The 10x10 board sits inside a 12x12 array; the outer ring is border.
//!
//!   index = 12 * (file + 1) + (rank + 1)
//!
//!   a0=13  a1=14  ...  a9=22
//!   b0=25  b1=26  ...  b9=34
//!   ...
//!   j0=121 j1=122 ...  j9=130
//! ```
//!
//! # Move Encoding (20-bit)
//!
//! ```text
//! Bits 0-7:   to-square
//! Bits 8-15:  from-square
//! Bits 16-17: rotation (0=none, 1=right, 2=u-turn, 3=left)
//! Bits 18-19: piece type
//! ```
//!
//! # Turn Structure
//!
//! ```text
//! 1. translate (stomping an adjacent enemy pawn) or rotate, or pass (king only)
//! 2. the mover's king fires; the piece the beam stops on is removed
//! ```

#[cfg(feature = "wasm")]
pub mod wasm;

mod apply;
mod fen;
mod history;
mod laser;
mod movegen;
mod moves;
mod perft;
mod piece;
mod position;
mod rules;
mod square;
mod zobrist;

pub use apply::{Ko, MoveParseError, Victim, Victims};
pub use fen::{FenError, START_FEN};
pub use history::{History, NodeId};
pub use laser::{fire, laser_map, LaserMap};
pub use movegen::{generate_moves, generate_moves_reference};
pub use moves::{Move, MoveList, Rotation, SortableMove, MAX_NUM_MOVES};
pub use perft::{count_leaves, count_leaves_unchecked, divide};
pub use piece::{Color, Direction, Piece, PieceType};
pub use position::{IntegrityError, Position, MAX_PAWNS};
pub use rules::Rules;
pub use square::{Square, ARR_SIZE, ARR_WIDTH, BOARD_WIDTH, DIRECTIONS};
pub use zobrist::{zobrist, Zobrist};
