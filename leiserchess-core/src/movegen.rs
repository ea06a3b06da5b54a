//! Move generation.
//!
//! The fast generator walks the king square and the pawn slot pool. The
//! reference generator scans every square of the board instead; perft runs
//! both and requires identical move sets.

use crate::laser::{laser_map, LaserMap};
use crate::moves::{Move, MoveList, Rotation};
use crate::piece::{Color, Piece, PieceType};
use crate::position::Position;
use crate::square::{Square, DIRECTIONS};

/// All legal moves for the side to move.
///
/// Order is fixed: king translations in [`DIRECTIONS`] order, king rotations,
/// the null move, then each unpinned pawn in slot order (translations, then
/// rotations).
pub fn generate_moves(pos: &Position) -> MoveList {
    let us = pos.side_to_move();
    let pins = laser_map(pos, us.opponent());
    let mut moves = MoveList::new();

    if let Some(king) = pos.king_square(us) {
        for d in DIRECTIONS {
            let to = king.offset(d);
            if pos.piece_at(to).is_empty() {
                moves.push(Move::translation(PieceType::King, king, to));
            }
        }
        for rot in Rotation::TURNS {
            moves.push(Move::rotation(PieceType::King, king, rot));
        }
        moves.push(Move::null(king));
    }

    for from in pos.pawns_of(us) {
        if pins.pins(from) {
            continue;
        }
        for d in DIRECTIONS {
            let to = from.offset(d);
            let target = pos.piece_at(to);
            if target.is_empty() || (target.is_pawn() && target.color() != us) {
                moves.push(Move::translation(PieceType::Pawn, from, to));
            }
        }
        for rot in Rotation::TURNS {
            moves.push(Move::rotation(PieceType::Pawn, from, rot));
        }
    }

    moves
}

/// Whether `piece` (owned by `us`) may step onto a square holding `target`.
fn can_land(piece: Piece, target: Piece, us: Color) -> bool {
    match target.ptype() {
        PieceType::Empty => true,
        PieceType::Pawn => piece.is_pawn() && target.color() != us,
        PieceType::King | PieceType::Invalid => false,
    }
}

fn push_piece_moves(moves: &mut MoveList, pos: &Position, from: Square, us: Color) {
    let piece = pos.piece_at(from);
    for to in from.neighbors() {
        if to.is_on_board() && can_land(piece, pos.piece_at(to), us) {
            moves.push(Move::translation(piece.ptype(), from, to));
        }
    }
    for rot in Rotation::TURNS {
        moves.push(Move::rotation(piece.ptype(), from, rot));
    }
    if piece.is_king() {
        moves.push(Move::null(from));
    }
}

fn is_pinned(pins: &LaserMap, pos: &Position, sq: Square) -> bool {
    pos.piece_at(sq).is_pawn() && pins.on_path(sq) && pins.terminal() != Some(sq)
}

/// Slow generator: scans the whole board rather than the location lists.
pub fn generate_moves_reference(pos: &Position) -> MoveList {
    let us = pos.side_to_move();
    let pins = laser_map(pos, us.opponent());
    let mut moves = MoveList::new();

    for from in Square::all() {
        let piece = pos.piece_at(from);
        if !piece.is_occupied() || piece.color() != us || is_pinned(&pins, pos, from) {
            continue;
        }
        push_piece_moves(&mut moves, pos, from, us);
    }

    moves
}

impl Position {
    /// Shorthand for [`generate_moves`].
    pub fn legal_moves(&self) -> MoveList {
        generate_moves(self)
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        mv != Move(0) && generate_moves(self).contains(mv)
    }
}
