//! Laser physics.
//!
//! A beam leaves the firing king along its facing and walks the padded
//! board one cell at a time:
//!
//! ```text
//! empty  -> keep going
//! border -> stop, nothing hit
//! king   -> stop, king hit
//! pawn   -> turn per REFLECT, or stop with the pawn hit on its blind side
//! ```
//!
//! [`fire`] and [`laser_map`] share one tracer so the shot that ends a turn
//! and the path used for pins can never disagree.
//!
//! A pawn struck on its blind side ends the beam but is not pinned: it may
//! still step out of the way. Engines that also pin the struck pawn
//! generate fewer moves for it, so their perft counts differ from
//! `tests/data/perft.json`.

use crate::piece::{Color, Direction, PieceType};
use crate::position::Position;
use crate::square::{Square, ARR_SIZE};

use crate::piece::Direction::{East as E, North as N, South as S, West as W};

/// Outgoing beam direction, indexed by incoming beam and pawn orientation
/// (NW, NE, SE, SW). None means the beam struck a blind side.
const REFLECT: [[Option<Direction>; 4]; 4] = [
    [None, None, Some(E), Some(W)],
    [Some(N), None, None, Some(S)],
    [Some(W), Some(E), None, None],
    [None, Some(N), Some(S), None],
];

#[inline]
fn reflect(beam: Direction, pawn_orientation: u8) -> Option<Direction> {
    REFLECT[beam as usize][pawn_orientation as usize]
}

/// Walk the beam of `color`'s king, reporting every cell it lights
/// (the king's own square first). Returns the square of the piece hit.
fn trace(pos: &Position, color: Color, mut visit: impl FnMut(Square)) -> Option<Square> {
    let mut sq = pos.king_square(color)?;
    let mut beam = pos.piece_at(sq).facing();
    visit(sq);

    loop {
        sq = sq.offset(beam.beam_offset());
        assert!(sq.index() < ARR_SIZE, "beam left the board array at {sq:?}");
        let piece = pos.piece_at(sq);
        match piece.ptype() {
            PieceType::Invalid => return None,
            PieceType::Empty => visit(sq),
            PieceType::King => {
                visit(sq);
                return Some(sq);
            }
            PieceType::Pawn => {
                visit(sq);
                match reflect(beam, piece.orientation()) {
                    Some(next) => beam = next,
                    None => return Some(sq),
                }
            }
        }
    }
}

/// The square of the piece `color`'s laser would remove, if any.
pub fn fire(pos: &Position, color: Color) -> Option<Square> {
    trace(pos, color, |_| {})
}

/// Every square lit by one color's laser.
#[derive(Clone, Copy)]
pub struct LaserMap {
    path: [bool; ARR_SIZE],
    terminal: Option<Square>,
}

impl LaserMap {
    /// Whether the beam passes through (or starts on, or ends on) `sq`.
    #[inline]
    pub fn on_path(&self, sq: Square) -> bool {
        self.path[sq.index()]
    }

    /// The square of the piece the beam stops on.
    #[inline]
    pub fn terminal(&self) -> Option<Square> {
        self.terminal
    }

    /// A pawn on the path is pinned unless it is the one being struck.
    #[inline]
    pub fn pins(&self, sq: Square) -> bool {
        self.on_path(sq) && self.terminal != Some(sq)
    }

    /// Lit squares in array order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        (0..ARR_SIZE)
            .filter(|&i| self.path[i])
            .map(|i| Square(i as u8))
    }
}

/// Trace `color`'s laser and record its path.
pub fn laser_map(pos: &Position, color: Color) -> LaserMap {
    let mut path = [false; ARR_SIZE];
    let terminal = trace(pos, color, |sq| path[sq.index()] = true);
    LaserMap { path, terminal }
}

impl Position {
    /// Number of `color`'s pawns that cannot move because the opposing laser
    /// passes through them.
    pub fn pinned_pawns(&self, color: Color) -> usize {
        let map = laser_map(self, color.opponent());
        self.pawns_of(color).filter(|&sq| map.pins(sq)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_reflect_table() {
        // A beam travelling north into a SE pawn bounces east.
        assert_eq!(reflect(N, 2), Some(E));
        assert_eq!(reflect(N, 3), Some(W));
        assert_eq!(reflect(N, 0), None);
        assert_eq!(reflect(E, 0), Some(N));
        assert_eq!(reflect(S, 1), Some(E));
        assert_eq!(reflect(W, 2), Some(S));
        for beam in [N, E, S, W] {
            let blind = (0..4).filter(|&o| reflect(beam, o).is_none()).count();
            assert_eq!(blind, 2);
        }
    }

    #[test]
    fn test_beam_runs_off_board() {
        let p = pos("4nn5/10/10/10/10/10/10/10/10/3NN6 W");
        assert_eq!(fire(&p, Color::White), None);
        let map = laser_map(&p, Color::White);
        assert_eq!(map.terminal(), None);
        assert_eq!(map.squares().count(), 10);
        assert!(map.on_path(sq("d0")) && map.on_path(sq("d9")));
    }

    #[test]
    fn test_beam_hits_king() {
        let p = pos("4nn5/10/10/10/10/10/10/10/10/4NN5 W");
        assert_eq!(fire(&p, Color::White), Some(sq("e9")));
        assert_eq!(fire(&p, Color::Black), None);
    }

    #[test]
    fn test_beam_reflects_and_hits_blind_side() {
        // North from e0, SE mirror on e4 turns it east, blind side of ne on h4.
        let p = pos("4nn5/10/10/10/10/4SE2ne2/10/10/10/4NN5 W");
        assert_eq!(fire(&p, Color::White), Some(sq("h4")));
        let map = laser_map(&p, Color::White);
        assert_eq!(map.terminal(), Some(sq("h4")));
        for s in ["e0", "e1", "e3", "e4", "f4", "g4", "h4"] {
            assert!(map.on_path(sq(s)), "{s} should be lit");
        }
        assert!(!map.on_path(sq("e5")));
        assert!(map.pins(sq("e4")));
        assert!(!map.pins(sq("h4")));
    }

    #[test]
    fn test_struck_pawn_is_not_pinned() {
        // White's beam ends on the blind side of the black pawn on h4.
        let p = pos("4nn5/10/10/10/10/4SE2ne2/10/10/10/4NN5 B");
        assert_eq!(p.pinned_pawns(Color::Black), 0);
        assert_eq!(p.pinned_pawns(Color::White), 0);
        assert!(p.legal_moves().iter().any(|mv| mv.from() == sq("h4")));
    }

    #[test]
    fn test_zapped_king_fires_nothing() {
        let mut p = pos("4nn5/10/10/10/10/10/10/10/10/4NN5 W");
        p.take(sq("e0"));
        assert_eq!(fire(&p, Color::White), None);
        assert_eq!(laser_map(&p, Color::White).squares().count(), 0);
    }

    #[test]
    fn test_pinned_pawns() {
        // Black's beam runs south down e; the white NE pawn on e4 turns it east.
        let p = pos("4ss5/10/10/10/10/4NE5/10/10/10/NN9 W");
        assert_eq!(p.pinned_pawns(Color::White), 1);
        assert_eq!(p.pinned_pawns(Color::Black), 0);
    }
}
