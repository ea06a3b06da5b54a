//! Board notation.
//!
//! ```text
//! 4ee5/3se2sw3/2nw1se1ne3/nw8se/10/10/NW8SE/3SW1NW1SE2/3NE2NW3/5WW4 W
//! ```
//!
//! Ranks run from 9 down to 0, files from a to j. Digits count empty
//! squares, two letters name a piece (uppercase White, lowercase Black),
//! and the trailing `W` or `B` says who moves.

use thiserror::Error;

use crate::piece::{Color, Piece};
use crate::position::{Position, MAX_PAWNS};
use crate::square::{Square, BOARD_WIDTH};

/// The standard opening position.
pub const START_FEN: &str = "4ee5/3se2sw3/2nw1se1ne3/nw8se/10/10/NW8SE/3SW1NW1SE2/3NE2NW3/5WW4 W";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected \"<board> <W|B>\", got {0:?}")]
    Layout(String),
    #[error("expected {expected} ranks, found {found}")]
    RankCount { expected: u8, found: usize },
    #[error("rank {rank} covers {width} squares instead of 10")]
    RankWidth { rank: u8, width: usize },
    #[error("unknown piece code {0:?}")]
    Piece(String),
    #[error("side to move must be W or B, got {0:?}")]
    Side(String),
    #[error("{0} must have exactly one king")]
    Kings(Color),
    #[error("{0} pawns exceed the limit of {max}", max = MAX_PAWNS)]
    TooManyPawns(usize),
}

impl Position {
    /// Build a position from board notation.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let mut fields = fen.split_whitespace();
        let (Some(board), Some(side), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(FenError::Layout(fen.to_string()));
        };

        let side = match side {
            "W" => Color::White,
            "B" => Color::Black,
            other => return Err(FenError::Side(other.to_string())),
        };

        let ranks: Vec<&str> = board.split('/').collect();
        if ranks.len() != BOARD_WIDTH as usize {
            return Err(FenError::RankCount {
                expected: BOARD_WIDTH,
                found: ranks.len(),
            });
        }

        let mut placed = Vec::new();
        for (row, text) in ranks.iter().enumerate() {
            let rank = BOARD_WIDTH - 1 - row as u8;
            let squares = parse_rank(text, rank)?;
            if squares.len() != BOARD_WIDTH as usize {
                return Err(FenError::RankWidth {
                    rank,
                    width: squares.len(),
                });
            }
            for (file, piece) in squares.into_iter().enumerate() {
                if let Some(piece) = piece {
                    placed.push((Square::new(file as u8, rank), piece));
                }
            }
        }

        for color in Color::all() {
            let kings = placed
                .iter()
                .filter(|(_, p)| p.is_king() && p.color() == color)
                .count();
            if kings != 1 {
                return Err(FenError::Kings(color));
            }
        }
        let pawns = placed.iter().filter(|(_, p)| p.is_pawn()).count();
        if pawns > MAX_PAWNS {
            return Err(FenError::TooManyPawns(pawns));
        }

        let mut pos = Position::empty(side);
        for (sq, piece) in placed {
            pos.put(sq, piece);
        }
        Ok(pos)
    }

    /// Serialize placement, orientation and side to move.
    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..BOARD_WIDTH).rev() {
            let mut empty = 0;
            for file in 0..BOARD_WIDTH {
                match self.piece_at(Square::new(file, rank)).code() {
                    Some(code) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push_str(code);
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }
        out.push(' ');
        out.push(match self.side_to_move() {
            Color::White => 'W',
            Color::Black => 'B',
        });
        out
    }

    /// The standard opening position.
    pub fn start() -> Position {
        Position::from_fen(START_FEN).expect("START_FEN parses")
    }
}

/// Expand one rank into per-file cells. Runs of empties are checked against
/// the board width before they are expanded.
fn parse_rank(text: &str, rank: u8) -> Result<Vec<Option<Piece>>, FenError> {
    let mut cells = Vec::with_capacity(BOARD_WIDTH as usize);
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let digits = &text[start..i];
            if digits.starts_with('0') {
                return Err(FenError::Piece(digits.to_string()));
            }
            // All digits, so the only parse failure is overflow.
            let run = digits.parse::<usize>().unwrap_or(usize::MAX);
            let width = cells.len().saturating_add(run);
            if width > BOARD_WIDTH as usize {
                return Err(FenError::RankWidth { rank, width });
            }
            cells.resize(width, None);
        } else {
            let code = text
                .get(i..i + 2)
                .ok_or_else(|| FenError::Piece(text[i..].to_string()))?;
            let piece = Piece::from_code(code).ok_or_else(|| FenError::Piece(code.to_string()))?;
            cells.push(Some(piece));
            i += 2;
        }
    }
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position() {
        let p = Position::start();
        assert_eq!(p.side_to_move(), Color::White);
        assert_eq!(p.king_square(Color::White), Square::parse("f0"));
        assert_eq!(p.king_square(Color::Black), Square::parse("e9"));
        assert_eq!(p.pawn_count(Color::White), 7);
        assert_eq!(p.pawn_count(Color::Black), 7);
        assert_eq!(p.to_fen(), START_FEN);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_start_key_is_stable() {
        assert_eq!(Position::start().key(), 18079161699189317629);
    }

    #[test]
    fn test_black_to_move() {
        let fen = "4ee5/10/10/10/10/10/10/10/10/5WW4 B";
        let p = Position::from_fen(fen).unwrap();
        assert_eq!(p.side_to_move(), Color::Black);
        assert_eq!(p.to_fen(), fen);
        assert_eq!(p.key(), p.compute_key());
    }

    #[test]
    fn test_rejects_bad_input() {
        let cases: [(&str, fn(&FenError) -> bool); 8] = [
            ("4ee5/10/10/10/10/10/10/10/10/5WW4", |e| matches!(e, FenError::Layout(_))),
            ("4ee5/10/10/10/10/10/10/10/10/5WW4 X", |e| matches!(e, FenError::Side(_))),
            ("4ee5/10/10/10/10/10/10/10/5WW4 W", |e| {
                matches!(e, FenError::RankCount { found: 9, .. })
            }),
            ("4ee4/10/10/10/10/10/10/10/10/5WW4 W", |e| {
                matches!(e, FenError::RankWidth { rank: 9, width: 9 })
            }),
            ("4ee5/10/10/10/10/10/10/10/10/5WW5 W", |e| {
                matches!(e, FenError::RankWidth { rank: 0, width: 11 })
            }),
            ("4ex5/10/10/10/10/10/10/10/10/5WW4 W", |e| matches!(e, FenError::Piece(_))),
            ("4ee5/10/10/10/10/10/10/10/10/5WWWW3 W", |e| {
                matches!(e, FenError::Kings(Color::White))
            }),
            ("4ee5/10/10/10/10/10/10/10/10/10 W", |e| {
                matches!(e, FenError::Kings(Color::White))
            }),
        ];
        for (fen, check) in cases {
            let err = Position::from_fen(fen).unwrap_err();
            assert!(check(&err), "{fen}: unexpected {err:?}");
        }
    }

    #[test]
    fn test_rejects_oversized_and_zero_runs() {
        let huge = "9000000000000000000/10/10/10/10/10/10/10/10/4NN4nn W";
        assert!(matches!(
            Position::from_fen(huge),
            Err(FenError::RankWidth { rank: 9, width }) if width > 10
        ));
        let overflow = "4ee5/10/10/10/10/10/10/10/10/5WW99999999999999999999999 W";
        assert_eq!(
            Position::from_fen(overflow).unwrap_err(),
            FenError::RankWidth {
                rank: 0,
                width: usize::MAX
            }
        );
        let zero = "4ee05/10/10/10/10/10/10/10/10/5WW4 W";
        assert_eq!(Position::from_fen(zero).unwrap_err(), FenError::Piece("05".into()));
        let lone_zero = "4ee5/10/10/10/10/0/10/10/10/5WW4 W";
        assert_eq!(Position::from_fen(lone_zero).unwrap_err(), FenError::Piece("0".into()));
    }

    #[test]
    fn test_pawn_limit() {
        let full = "4ee5/NWNWNWNWNWNWNWNW2/NWNWNWNWNWNWNW3/10/10/10/10/10/10/5WW4 W";
        assert_eq!(Position::from_fen(full).unwrap_err(), FenError::TooManyPawns(15));
    }
}
