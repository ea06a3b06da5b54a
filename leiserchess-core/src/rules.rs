use serde::{Deserialize, Serialize};

/// Rule switches threaded into [`Position::apply`](crate::Position::apply).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Reject a move that removes nothing and leaves the board exactly as
    /// it was before the move.
    pub ko: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Rules { ko: true }
    }
}
