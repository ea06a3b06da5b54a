//! WASM bindings for leiserchess-core
//!
//! Provides a JavaScript-friendly API for the rules engine.

use wasm_bindgen::prelude::*;

use crate::{Color, Position, Rules, Square};

/// WASM-friendly wrapper around Position
#[wasm_bindgen]
pub struct WasmPosition {
    inner: Position,
    rules: Rules,
}

#[wasm_bindgen]
impl WasmPosition {
    /// Create the standard opening position
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmPosition {
        WasmPosition {
            inner: Position::start(),
            rules: Rules::default(),
        }
    }

    /// Create a position from board notation
    #[wasm_bindgen(js_name = fromFen)]
    pub fn from_fen(fen: &str) -> Result<WasmPosition, JsError> {
        Ok(WasmPosition {
            inner: Position::from_fen(fen)?,
            rules: Rules::default(),
        })
    }

    /// Board notation of the current position
    #[wasm_bindgen(js_name = toFen)]
    pub fn to_fen(&self) -> String {
        self.inner.to_fen()
    }

    /// Enable or disable the Ko rule
    #[wasm_bindgen(js_name = setKo)]
    pub fn set_ko(&mut self, enabled: bool) {
        self.rules.ko = enabled;
    }

    /// Zobrist key, for repetition tables on the JS side
    pub fn key(&self) -> u64 {
        self.inner.key()
    }

    /// Side to move (0 = White, 1 = Black)
    #[wasm_bindgen(js_name = sideToMove)]
    pub fn side_to_move(&self) -> u8 {
        self.inner.side_to_move() as u8
    }

    /// Piece code on a square ("NN", "se", ...), or undefined if empty
    #[wasm_bindgen(js_name = pieceAt)]
    pub fn piece_at(&self, file: u8, rank: u8) -> Option<String> {
        if file >= 10 || rank >= 10 {
            return None;
        }
        self.inner
            .piece_at(Square::new(file, rank))
            .code()
            .map(str::to_string)
    }

    /// Legal moves as an array of { text, from, to, rotation }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves: Vec<WasmMove> = self
            .inner
            .legal_moves()
            .iter()
            .map(WasmMove::from)
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Apply a move given in text notation. Returns the removed pieces as
    /// { stomped, zapped }, or throws on illegal text or Ko.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, text: &str) -> Result<JsValue, JsError> {
        let mv = self.inner.parse_move(text)?;
        self.inner = self.inner.apply(mv, &self.rules)?;
        Ok(serde_wasm_bindgen::to_value(&self.inner.victims())?)
    }

    /// Check for winner. Returns 0 (none), 1 (White), or 2 (Black)
    #[wasm_bindgen(js_name = checkWinner)]
    pub fn check_winner(&self) -> u8 {
        match self.inner.winner() {
            None => 0,
            Some(Color::White) => 1,
            Some(Color::Black) => 2,
        }
    }

    /// Check if a king has been zapped
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_game_over()
    }

    /// Text board, as printed by the Display impl
    pub fn render(&self) -> String {
        self.inner.to_string()
    }

    /// Clone the position
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_position(&self) -> WasmPosition {
        WasmPosition {
            inner: self.inner,
            rules: self.rules,
        }
    }
}

impl Default for WasmPosition {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmMove {
    text: String,
    from: [i8; 2],
    to: [i8; 2],
    rotation: u8,
}

impl From<crate::Move> for WasmMove {
    fn from(mv: crate::Move) -> Self {
        WasmMove {
            text: mv.to_string(),
            from: [mv.from().file(), mv.from().rank()],
            to: [mv.to().file(), mv.to().rank()],
            rotation: mv.rot() as u8,
        }
    }
}
