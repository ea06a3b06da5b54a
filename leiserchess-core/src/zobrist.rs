//! Zobrist keys.
//!
//! One key per (square, piece encoding) pair plus a side-to-move key. The
//! table is filled once from a fixed-seed SplitMix64 stream, so keys are
//! identical across runs and threads.

use std::sync::OnceLock;

use crate::piece::Piece;
use crate::square::{Square, ARR_SIZE};

const SEED: u64 = 0x1eaf_5eed;

/// Process-wide key table.
pub struct Zobrist {
    pieces: [[u64; Piece::COUNT]; ARR_SIZE],
    side: u64,
}

static TABLE: OnceLock<Zobrist> = OnceLock::new();

/// Get the shared key table, building it on first use.
pub fn zobrist() -> &'static Zobrist {
    TABLE.get_or_init(Zobrist::generate)
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl Zobrist {
    fn generate() -> Zobrist {
        let mut state = SEED;
        let mut pieces = [[0u64; Piece::COUNT]; ARR_SIZE];
        for row in pieces.iter_mut() {
            for key in row.iter_mut() {
                *key = splitmix64(&mut state);
            }
        }
        let side = splitmix64(&mut state);
        Zobrist { pieces, side }
    }

    /// Key for a piece on a square. Empty and border cells contribute nothing.
    #[inline]
    pub fn piece(&self, sq: Square, piece: Piece) -> u64 {
        if piece.is_occupied() {
            self.pieces[sq.index()][piece.0 as usize]
        } else {
            0
        }
    }

    /// Toggled whenever the side to move changes; present when Black is to move.
    #[inline]
    pub fn side(&self) -> u64 {
        self.side
    }
}
