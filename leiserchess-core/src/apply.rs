//! Move application.
//!
//! A move resolves in two phases:
//!
//! 1. The mover translates or rotates. A pawn stepping onto an enemy pawn
//!    swaps places with it and the swapped pawn is stomped.
//! 2. The side that just moved fires its laser and whatever the beam stops
//!    on is removed, friend or foe, pawn or king.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::laser::fire;
use crate::moves::{Move, Rotation};
use crate::piece::{Piece, PieceType};
use crate::position::Position;
use crate::rules::Rules;
use crate::square::{Square, DIRECTIONS};
use crate::zobrist::zobrist;

/// A piece removed from the board, and the square it was removed from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Victim {
    pub square: Square,
    pub piece: Piece,
}

/// Everything a single move removed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Victims {
    /// Stomped pawn. It is removed from the mover's origin square, where the
    /// swap left it.
    pub stomped: Option<Victim>,
    pub zapped: Option<Victim>,
}

impl Victims {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stomped.is_none() && self.zapped.is_none()
    }

    #[inline]
    pub fn exists(&self) -> bool {
        !self.is_empty()
    }

    /// Whether this move zapped a king, ending the game.
    #[inline]
    pub fn zapped_king(&self) -> bool {
        self.zapped.is_some_and(|v| v.piece.is_king())
    }
}

/// The move would recreate its parent's board without removing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Ko: move {0} recreates the previous position")]
pub struct Ko(pub Move);

/// Why a move string could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("move text {0:?} is not of the form <square><square|R|U|L>")]
    Syntax(String),
    #[error("no piece of the side to move on {0}")]
    NoPiece(Square),
    #[error("{0} is not legal here")]
    Illegal(Move),
}

/// The part of move text after the source square.
enum Target {
    Step(Square),
    Turn(Rotation),
}

impl Position {
    /// Play `mv` without the Ko rule.
    ///
    /// # Panics
    ///
    /// If `mv` is malformed for this position: zero, not the mover's piece,
    /// a pawn standing still, a step to a non-adjacent square, or a
    /// translation onto a square the piece may not enter.
    pub fn play(&self, mv: Move) -> Position {
        assert!(mv != Move(0), "zero move");
        let from = mv.from();
        let to = mv.to();
        let us = self.side_to_move();
        let mover = self.piece_at(from);
        assert!(
            mover.is_occupied() && mover.color() == us && mover.ptype() == mv.ptype(),
            "{mv} does not move a {us} {:?}",
            mv.ptype()
        );
        assert!(!mv.is_null_move() || mover.is_king(), "{mv}: only a king may pass");
        if mv.is_translation() {
            let step = to.index() as i16 - from.index() as i16;
            assert!(
                DIRECTIONS.iter().any(|&d| d as i16 == step),
                "{mv} is not a single step"
            );
        }

        let mut next = *self;
        let mut victims = Victims::default();

        if mv.is_translation() {
            let target = self.piece_at(to);
            let stomp = mover.is_pawn() && target.is_pawn() && target.color() != us;
            assert!(stomp || target.is_empty(), "{mv} lands on {target:?}");
            next.swap(from, to);
            if stomp {
                let piece = next.take(from);
                victims.stomped = Some(Victim { square: from, piece });
            }
        } else if mv.rot() != Rotation::None {
            next.rotate(from, mv.rot());
        }

        next.toggle_side();
        if let Some(square) = fire(&next, us) {
            let piece = next.take(square);
            victims.zapped = Some(Victim { square, piece });
        }
        next.set_history(mv, victims);

        debug_assert_eq!(next.integrity(), Ok(()));
        next
    }

    /// Play `mv` under `rules`, rejecting a Ko repetition.
    pub fn apply(&self, mv: Move, rules: &Rules) -> Result<Position, Ko> {
        let next = self.play(mv);
        if rules.ko && next.victims().is_empty() && next.key() == self.key() ^ zobrist().side() {
            return Err(Ko(mv));
        }
        Ok(next)
    }

    /// Read move text (`c3d4`, `c3R`, `e0e0`) and check it is legal here.
    pub fn parse_move(&self, text: &str) -> Result<Move, MoveParseError> {
        let syntax = || MoveParseError::Syntax(text.to_string());
        let head = text.get(..2).ok_or_else(syntax)?;
        let tail = text.get(2..).ok_or_else(syntax)?;
        let from = Square::parse(head).ok_or_else(syntax)?;
        let target = match tail.chars().collect::<Vec<_>>()[..] {
            [c] => Target::Turn(Rotation::from_symbol(c).ok_or_else(syntax)?),
            [_, _] => Target::Step(Square::parse(tail).ok_or_else(syntax)?),
            _ => return Err(syntax()),
        };

        let piece = self.piece_at(from);
        if !piece.is_occupied() || piece.color() != self.side_to_move() {
            return Err(MoveParseError::NoPiece(from));
        }
        let ptype = piece.ptype();

        let mv = match target {
            Target::Step(to) => Move::translation(ptype, from, to),
            Target::Turn(rot) => Move::rotation(ptype, from, rot),
        };
        if mv.is_null_move() && ptype != PieceType::King {
            return Err(MoveParseError::Illegal(mv));
        }
        if !self.is_legal(mv) {
            return Err(MoveParseError::Illegal(mv));
        }
        Ok(mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    fn pos(fen: &str) -> Position {
        Position::from_fen(fen).unwrap()
    }

    #[test]
    fn test_quiet_translation() {
        let p = Position::start();
        let mv = p.parse_move("f0f1").unwrap();
        let next = p.play(mv);
        assert_eq!(next.king_square(Color::White), Some(sq("f1")));
        assert!(next.victims().is_empty());
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.ply(), 1);
        assert_eq!(next.last_move(), Some(mv));
        assert_eq!(next.key(), next.compute_key());
        assert!(next.is_consistent());
    }

    #[test]
    fn test_play_does_not_touch_parent() {
        let p = Position::start();
        let before = p;
        let _ = p.play(p.parse_move("f0f0").unwrap());
        assert_eq!(p, before);
    }

    #[test]
    fn test_stomp_removes_enemy_pawn() {
        // White pawn c3 stomps the black pawn on c4; nothing in the beam's way.
        let p = pos("9nn/10/10/10/10/2ne7/2NW7/10/10/NN9 W");
        let next = p.play(p.parse_move("c3c4").unwrap());
        let stomped = next.victims().stomped.unwrap();
        assert_eq!(stomped.square, sq("c3"));
        assert_eq!(stomped.piece.color(), Color::Black);
        assert!(next.piece_at(sq("c3")).is_empty());
        assert_eq!(next.piece_at(sq("c4")).color(), Color::White);
        assert_eq!(next.pawn_count(Color::Black), 0);
        assert!(next.victims().zapped.is_none());
        assert!(next.is_consistent());
    }

    #[test]
    fn test_stomp_then_zap() {
        // After c3c4 the white beam up a turns east at a5 and strikes the
        // blind side of the black pawn on e5.
        let p = pos("9nn/10/10/10/SE3ne5/2ne7/2NW7/10/10/NN9 W");
        let next = p.play(p.parse_move("c3c4").unwrap());
        let victims = next.victims();
        assert_eq!(victims.stomped.map(|v| v.square), Some(sq("c3")));
        assert_eq!(victims.zapped.map(|v| v.square), Some(sq("e5")));
        assert_eq!(next.pawn_count(Color::Black), 0);
        assert_eq!(next.pawns().collect::<Vec<_>>(), vec![sq("a5"), sq("c4")]);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_zap_own_piece() {
        // White's beam bounces off its own pawn's blind side.
        let p = pos("9nn/10/10/10/10/10/10/NW9/10/NN9 W");
        let next = p.play(Move::null(sq("a0")));
        assert_eq!(next.victims().zapped.map(|v| v.square), Some(sq("a2")));
        assert_eq!(next.victims().zapped.map(|v| v.piece), Some(Piece::pawn(Color::White, 0)));
    }

    #[test]
    fn test_zap_king_ends_game() {
        let p = pos("4nn5/10/10/10/10/10/10/10/10/4WW5 W");
        let next = p.play(p.parse_move("e0R").unwrap());
        assert!(next.victims().zapped_king());
        assert_eq!(next.king_square(Color::Black), None);
        assert_eq!(next.winner(), Some(Color::White));
        assert!(next.is_consistent());
    }

    #[test]
    fn test_four_right_turns_restore_hash() {
        let p = Position::start();
        let mut cur = p;
        let pawn = sq("a3");
        for _ in 0..4 {
            cur = cur.play(Move::rotation(PieceType::Pawn, pawn, Rotation::Right));
            // Black passes in between.
            let king = cur.king_square(Color::Black).unwrap();
            cur = cur.play(Move::null(king));
        }
        assert_eq!(cur.piece_at(pawn), p.piece_at(pawn));
        assert_eq!(cur.key(), p.key());
    }

    #[test]
    fn test_ko_detection() {
        // Passing with a harmless beam recreates the parent board.
        let p = pos("9nn/10/10/10/10/10/10/10/10/NN9 W");
        let pass = Move::null(sq("a0"));
        assert_eq!(p.apply(pass, &Rules::default()), Err(Ko(pass)));
        let next = p.apply(pass, &Rules { ko: false }).unwrap();
        assert_eq!(next.side_to_move(), Color::Black);

        let step = Move::translation(PieceType::King, sq("a0"), sq("a1"));
        assert!(p.apply(step, &Rules::default()).is_ok());
    }

    #[test]
    fn test_victims_break_ko() {
        let p = pos("9nn/10/10/10/10/10/10/NW9/10/NN9 W");
        let next = p.apply(Move::null(sq("a0")), &Rules::default()).unwrap();
        assert!(next.victims().exists());
    }

    #[test]
    fn test_parse_move_errors() {
        let p = Position::start();
        assert!(matches!(p.parse_move(""), Err(MoveParseError::Syntax(_))));
        assert!(matches!(p.parse_move("e0X"), Err(MoveParseError::Syntax(_))));
        assert!(matches!(p.parse_move("e0f1f2"), Err(MoveParseError::Syntax(_))));
        // A bad tail is a syntax error even when the source square is empty.
        assert!(matches!(p.parse_move("a4X"), Err(MoveParseError::Syntax(_))));
        assert!(matches!(p.parse_move("a4z9"), Err(MoveParseError::Syntax(_))));
        assert_eq!(p.parse_move("a4R"), Err(MoveParseError::NoPiece(sq("a4"))));
        assert_eq!(p.parse_move("e9R"), Err(MoveParseError::NoPiece(sq("e9"))));
        assert!(matches!(p.parse_move("f0f2"), Err(MoveParseError::Illegal(_))));
        assert!(matches!(p.parse_move("a3a3"), Err(MoveParseError::Illegal(_))));
    }

    #[test]
    fn test_parse_move_text_roundtrip() {
        let p = Position::start();
        for mv in p.legal_moves().iter() {
            assert_eq!(p.parse_move(&mv.to_string()), Ok(mv));
        }
    }

    #[test]
    #[should_panic(expected = "only a king may pass")]
    fn test_pawn_pass_panics() {
        let p = Position::start();
        p.play(Move::translation(PieceType::Pawn, sq("a3"), sq("a3")));
    }

    #[test]
    #[should_panic(expected = "not a single step")]
    fn test_long_step_panics() {
        let p = Position::start();
        p.play(Move::translation(PieceType::King, sq("f0"), sq("f2")));
    }

    #[test]
    #[should_panic]
    fn test_wrong_color_panics() {
        let p = Position::start();
        let king = p.king_square(Color::Black).unwrap();
        p.play(Move::null(king));
    }
}
