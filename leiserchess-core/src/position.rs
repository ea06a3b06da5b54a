//! Position store.
//!
//! The board array is the authoritative view. King squares and the pawn slot
//! pool mirror it so move generation can iterate pieces without scanning the
//! board. Every mutation goes through the private helpers at the bottom of
//! this file, which keep the board, the mirrors and the hash key in step.

use std::fmt;

use thiserror::Error;

use crate::apply::Victims;
use crate::moves::{Move, Rotation};
use crate::piece::{Color, Piece, PieceType};
use crate::square::{Square, ARR_SIZE, BOARD_WIDTH};
use crate::zobrist::zobrist;

/// Capacity of the pawn slot pool, shared by both colors.
pub const MAX_PAWNS: usize = 14;

/// Ways a position can disagree with itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("border cell {0} does not hold the invalid marker")]
    Border(Square),
    #[error("playable square {0} holds the invalid marker")]
    InvalidOnBoard(Square),
    #[error("{0} king location disagrees with the board")]
    King(Color),
    #[error("pawn slot {slot} points at {square}, which holds no pawn")]
    PawnSlot { slot: usize, square: Square },
    #[error("pawn on {0} is tracked by {1} slots")]
    PawnTracking(Square, usize),
    #[error("stored key {stored:#018x} differs from recomputed key {computed:#018x}")]
    KeyDrift { stored: u64, computed: u64 },
}

/// A complete game state. Cheap to copy; each move produces a new value.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: [Piece; ARR_SIZE],
    kings: [Option<Square>; 2],
    pawns: [Square; MAX_PAWNS],
    ply: u16,
    key: u64,
    last_move: Option<Move>,
    victims: Victims,
}

impl Position {
    /// A board with only the border filled in.
    pub(crate) fn empty(side: Color) -> Position {
        let mut board = [Piece::INVALID; ARR_SIZE];
        for sq in Square::all() {
            board[sq.index()] = Piece::EMPTY;
        }
        let mut pos = Position {
            board,
            kings: [None; 2],
            pawns: [Square::NONE; MAX_PAWNS],
            ply: 0,
            key: 0,
            last_move: None,
            victims: Victims::default(),
        };
        if side == Color::Black {
            pos.toggle_side();
        }
        pos
    }

    // ========== Queries ==========

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    /// Where a color's king stands, or None once it has been zapped.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        Color::from_bits(self.ply as u8)
    }

    #[inline]
    pub fn ply(&self) -> u16 {
        self.ply
    }

    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// The move that produced this position.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Pieces removed by the move that produced this position.
    #[inline]
    pub fn victims(&self) -> Victims {
        self.victims
    }

    /// Squares of live pawns, in slot order.
    pub fn pawns(&self) -> impl Iterator<Item = Square> + '_ {
        self.pawns.iter().copied().filter(|sq| !sq.is_none())
    }

    /// Squares of a color's live pawns, in slot order.
    pub fn pawns_of(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pawns().filter(move |&sq| self.piece_at(sq).color() == color)
    }

    pub fn pawn_count(&self, color: Color) -> usize {
        self.pawns_of(color).count()
    }

    /// The side whose opponent has lost its king.
    pub fn winner(&self) -> Option<Color> {
        Color::all().find(|&c| self.kings[c.opponent().index()].is_none())
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Hash of the position computed from scratch.
    pub fn compute_key(&self) -> u64 {
        let z = zobrist();
        let mut key = Square::all().fold(0, |key, sq| key ^ z.piece(sq, self.piece_at(sq)));
        if self.side_to_move() == Color::Black {
            key ^= z.side();
        }
        key
    }

    /// Verify the board, the location mirrors and the key agree.
    pub fn integrity(&self) -> Result<(), IntegrityError> {
        for idx in 0..ARR_SIZE {
            let sq = Square(idx as u8);
            let invalid = self.board[idx] == Piece::INVALID;
            if sq.is_on_board() && invalid {
                return Err(IntegrityError::InvalidOnBoard(sq));
            }
            if !sq.is_on_board() && !invalid {
                return Err(IntegrityError::Border(sq));
            }
        }

        for color in Color::all() {
            let on_board = Square::all().find(|&sq| {
                let p = self.piece_at(sq);
                p.is_king() && p.color() == color
            });
            let extra = Square::all()
                .filter(|&sq| {
                    let p = self.piece_at(sq);
                    p.is_king() && p.color() == color
                })
                .count();
            if extra > 1 || on_board != self.king_square(color) {
                return Err(IntegrityError::King(color));
            }
        }

        for (slot, &square) in self.pawns.iter().enumerate() {
            if !square.is_none() && !(square.is_on_board() && self.piece_at(square).is_pawn()) {
                return Err(IntegrityError::PawnSlot { slot, square });
            }
        }
        for sq in Square::all().filter(|&sq| self.piece_at(sq).is_pawn()) {
            let tracked = self.pawns.iter().filter(|&&s| s == sq).count();
            if tracked != 1 {
                return Err(IntegrityError::PawnTracking(sq, tracked));
            }
        }

        let computed = self.compute_key();
        if computed != self.key {
            return Err(IntegrityError::KeyDrift {
                stored: self.key,
                computed,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.integrity().is_ok()
    }

    // ========== Mutation (crate-private) ==========

    fn slot_of(&self, sq: Square) -> Option<usize> {
        self.pawns.iter().position(|&s| s == sq)
    }

    /// Place a piece on an empty playable square.
    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        assert!(sq.is_on_board(), "put off the board: {sq:?}");
        assert!(self.piece_at(sq).is_empty(), "put onto occupied {sq}");
        match piece.ptype() {
            PieceType::King => {
                let slot = &mut self.kings[piece.color().index()];
                assert!(slot.is_none(), "second {} king", piece.color());
                *slot = Some(sq);
            }
            PieceType::Pawn => {
                let slot = self
                    .slot_of(Square::NONE)
                    .expect("pawn slot pool exhausted");
                self.pawns[slot] = sq;
            }
            PieceType::Empty | PieceType::Invalid => panic!("put of {piece:?}"),
        }
        self.board[sq.index()] = piece;
        self.key ^= zobrist().piece(sq, piece);
    }

    /// Remove and return the piece on a square.
    pub(crate) fn take(&mut self, sq: Square) -> Piece {
        let piece = self.piece_at(sq);
        match piece.ptype() {
            PieceType::King => self.kings[piece.color().index()] = None,
            PieceType::Pawn => {
                let slot = self.slot_of(sq).expect("untracked pawn");
                self.pawns[slot] = Square::NONE;
            }
            PieceType::Empty | PieceType::Invalid => panic!("take from {sq}: {piece:?}"),
        }
        self.board[sq.index()] = Piece::EMPTY;
        self.key ^= zobrist().piece(sq, piece);
        piece
    }

    /// Swap the contents of two squares, moving any tracked locations along.
    ///
    /// Used for every translation: onto an empty square the swap is a plain
    /// move, onto an enemy pawn it leaves that pawn on `from`.
    pub(crate) fn swap(&mut self, from: Square, to: Square) {
        let z = zobrist();
        let mover = self.piece_at(from);
        let other = self.piece_at(to);
        let mover_slot = self.slot_of(from);
        let other_slot = if other.is_pawn() { self.slot_of(to) } else { None };

        self.key ^= z.piece(from, mover) ^ z.piece(to, other);
        self.board[to.index()] = mover;
        self.board[from.index()] = other;
        self.key ^= z.piece(to, mover) ^ z.piece(from, other);

        match mover.ptype() {
            PieceType::King => self.kings[mover.color().index()] = Some(to),
            PieceType::Pawn => {
                let slot = mover_slot.expect("untracked pawn");
                self.pawns[slot] = to;
            }
            PieceType::Empty | PieceType::Invalid => panic!("swap of {mover:?} from {from}"),
        }
        if let Some(slot) = other_slot {
            self.pawns[slot] = from;
        }
    }

    /// Turn the piece on a square in place.
    pub(crate) fn rotate(&mut self, sq: Square, rot: Rotation) {
        let z = zobrist();
        let before = self.piece_at(sq);
        assert!(before.is_occupied(), "rotate of {before:?} on {sq}");
        let after = before.rotated(rot);
        self.key ^= z.piece(sq, before) ^ z.piece(sq, after);
        self.board[sq.index()] = after;
    }

    /// Advance the ply and flip the side-to-move key.
    pub(crate) fn toggle_side(&mut self) {
        self.ply += 1;
        self.key ^= zobrist().side();
    }

    pub(crate) fn set_history(&mut self, mv: Move, victims: Victims) {
        self.last_move = Some(mv);
        self.victims = victims;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let king = |c: Color| match self.king_square(c) {
            Some(sq) => sq.to_string(),
            None => "--".to_string(),
        };
        writeln!(f, "Ply: {}", self.ply)?;
        writeln!(f, "Color to move: {}", self.side_to_move())?;
        writeln!(f, "White King: {}, Black King: {}", king(Color::White), king(Color::Black))?;
        match self.last_move {
            Some(mv) => writeln!(f, "Last move: {mv}")?,
            None => writeln!(f, "Last move: NULL")?,
        }
        writeln!(f)?;
        for rank in (0..BOARD_WIDTH).rev() {
            write!(f, "{rank}  ")?;
            for file in 0..BOARD_WIDTH {
                let code = self.piece_at(Square::new(file, rank)).code().unwrap_or("--");
                write!(f, " {code}")?;
            }
            writeln!(f)?;
        }
        write!(f, "\n   ")?;
        for file in 0..BOARD_WIDTH {
            write!(f, "  {}", (b'a' + file) as char)?;
        }
        writeln!(f)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
