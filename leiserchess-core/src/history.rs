//! Game history as an arena of positions.
//!
//! Each node remembers the node it was played from, so a search or a game
//! record can branch freely without positions pointing at each other.

use crate::apply::Ko;
use crate::moves::Move;
use crate::position::Position;
use crate::rules::Rules;

/// Index of a node in a [`History`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Node {
    position: Position,
    parent: Option<NodeId>,
}

#[derive(Clone, Debug)]
pub struct History {
    nodes: Vec<Node>,
}

impl History {
    pub fn new(root: Position) -> History {
        History {
            nodes: vec![Node {
                position: root,
                parent: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Position {
        &self.nodes[id.0].position
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Number of stored positions, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Play `mv` from node `id` and store the result as its child.
    pub fn play(&mut self, id: NodeId, mv: Move, rules: &Rules) -> Result<NodeId, Ko> {
        let position = self.get(id).apply(mv, rules)?;
        self.nodes.push(Node {
            position,
            parent: Some(id),
        });
        Ok(NodeId(self.nodes.len() - 1))
    }

    /// Moves leading from the root to `id`, oldest first.
    pub fn moves_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            if let Some(mv) = self.get(cur).last_move() {
                moves.push(mv);
            }
            cur = parent;
        }
        moves.reverse();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn sq(s: &str) -> Square {
        Square::parse(s).unwrap()
    }

    #[test]
    fn test_branching_history() {
        let rules = Rules::default();
        let mut history = History::new(Position::start());
        let root = history.root();

        let a = Move::null(sq("f0"));
        let b = history.get(root).parse_move("f0f1").unwrap();

        let after_b = history.play(root, b, &rules).unwrap();
        let reply = history.get(after_b).parse_move("e9e8").unwrap();
        let after_reply = history.play(after_b, reply, &rules).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.parent(after_reply), Some(after_b));
        assert_eq!(history.parent(root), None);
        assert_eq!(history.moves_to(after_reply), vec![b, reply]);
        assert!(history.moves_to(root).is_empty());

        // The pass from the start position leaves the board unchanged.
        assert_eq!(history.play(root, a, &rules), Err(Ko(a)));
        assert_eq!(history.len(), 3);
    }
}
