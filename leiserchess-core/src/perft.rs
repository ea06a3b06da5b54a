//! Perft: exhaustive leaf counts for verifying move generation.
//!
//! A move that zaps a king ends the game, so it counts as one leaf and is
//! never expanded.

use crate::movegen::{generate_moves, generate_moves_reference};
use crate::moves::{Move, MoveList};
use crate::position::Position;

fn check_generators(pos: &Position, fast: &MoveList) {
    let mut fast = *fast;
    let mut slow = generate_moves_reference(pos);
    fast.sort();
    slow.sort();
    assert!(
        fast.as_slice() == slow.as_slice(),
        "generators disagree on {pos:?}\n  fast: {fast:?}\n  slow: {slow:?}"
    );
}

fn count(pos: &Position, depth: u32, check: bool) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_moves(pos);
    if check {
        check_generators(pos, &moves);
    }
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut leaves = 0;
    for mv in moves.iter() {
        let child = pos.play(mv);
        debug_assert_eq!(child.key(), child.compute_key(), "hash drift after {mv}");
        if child.victims().zapped_king() {
            leaves += 1;
        } else {
            leaves += count(&child, depth - 1, check);
        }
    }
    leaves
}

/// Count leaves `depth` plies below `pos`, checking at every interior node
/// that the fast and reference generators produce the same moves.
///
/// # Panics
///
/// If the generators disagree.
pub fn count_leaves(pos: &Position, depth: u32) -> u64 {
    count(pos, depth, true)
}

/// [`count_leaves`] without the generator cross-check.
pub fn count_leaves_unchecked(pos: &Position, depth: u32) -> u64 {
    count(pos, depth, false)
}

/// Per-root-move leaf counts, in generation order.
pub fn divide(pos: &Position, depth: u32, check: bool) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = generate_moves(pos);
    if check {
        check_generators(pos, &moves);
    }
    moves
        .iter()
        .map(|mv| {
            let child = pos.play(mv);
            let leaves = if child.victims().zapped_king() {
                1
            } else {
                count(&child, depth - 1, check)
            };
            (mv, leaves)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shallow_start_counts() {
        let p = Position::start();
        assert_eq!(count_leaves(&p, 0), 1);
        assert_eq!(count_leaves(&p, 1), 72);
        assert_eq!(count_leaves(&p, 2), 5156);
        assert_eq!(count_leaves_unchecked(&p, 2), 5156);
    }

    #[test]
    fn test_divide_sums_to_total() {
        let p = Position::start();
        let split = divide(&p, 2, true);
        assert_eq!(split.len(), 72);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 5156);
        assert!(divide(&p, 0, false).is_empty());
    }

    #[test]
    fn test_king_capture_is_a_leaf() {
        // Turning the king right zaps the black king: one leaf, not expanded.
        let p = Position::from_fen("4nn5/10/10/10/10/10/10/10/10/4WW5 W").unwrap();
        let split = divide(&p, 3, true);
        let (_, leaves) = split
            .iter()
            .find(|(mv, _)| mv.to_string() == "e0R")
            .copied()
            .unwrap();
        assert_eq!(leaves, 1);
    }
}
