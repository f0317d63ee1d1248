//! Fog-of-war boards: what one side has learned about the other side's
//! waters, and nothing more. Cells never shot at are simply absent.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BOARD_SIZE;
use crate::coord::Coord;

/// Result of resolving one shot.
///
/// `Sunk` supersedes `Hit`: once the last cell of a ship is hit, every cell
/// of that ship is recorded as `Sunk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOutcome {
    Miss,
    Hit,
    Sunk,
}

impl ShotOutcome {
    /// Label used in persisted turn records.
    pub fn label(self) -> &'static str {
        match self {
            ShotOutcome::Miss => "miss",
            ShotOutcome::Hit => "hit",
            ShotOutcome::Sunk => "sunk",
        }
    }

    /// Inverse of [`ShotOutcome::label`].
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "miss" => Some(ShotOutcome::Miss),
            "hit" => Some(ShotOutcome::Hit),
            "sunk" => Some(ShotOutcome::Sunk),
            _ => None,
        }
    }
}

/// Number of characters in an encoded board: one per cell, row-major.
pub const ENCODED_LEN: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Raised when an encoded fog board has the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fog board encoding must be 100 characters, got {0}")]
pub struct DecodeError(pub usize);

/// One side's accumulated knowledge of the opponent's board.
///
/// Entries only ever accumulate; a recorded cell is never cleared, though a
/// `Hit` may be upgraded to `Sunk` when the owning ship goes down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FogBoard {
    shots: BTreeMap<Coord, ShotOutcome>,
}

impl FogBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_been_shot(&self, cell: Coord) -> bool {
        self.shots.contains_key(&cell)
    }

    pub fn outcome(&self, cell: Coord) -> Option<ShotOutcome> {
        self.shots.get(&cell).copied()
    }

    /// Record a miss. Keeps any existing entry, so deduced water around a
    /// sunk ship cannot downgrade an earlier hit.
    pub fn record_miss(&mut self, cell: Coord) {
        if cell.in_bounds() && !self.shots.contains_key(&cell) {
            self.shots.insert(cell, ShotOutcome::Miss);
        }
    }

    pub fn record_hit(&mut self, cell: Coord) {
        if cell.in_bounds() {
            self.shots.insert(cell, ShotOutcome::Hit);
        }
    }

    pub fn record_sunk(&mut self, cell: Coord) {
        if cell.in_bounds() {
            self.shots.insert(cell, ShotOutcome::Sunk);
        }
    }

    /// Display character for a cell: `?` unknown, `o` miss, `x` hit or sunk.
    pub fn symbol_at(&self, cell: Coord) -> char {
        match self.shots.get(&cell) {
            None => '?',
            Some(ShotOutcome::Miss) => 'o',
            Some(ShotOutcome::Hit) | Some(ShotOutcome::Sunk) => 'x',
        }
    }

    /// Fixed-width encoding: 100 symbol characters in row-major order.
    ///
    /// Lossy: `Hit` and `Sunk` share the `x` symbol, so decoding cannot
    /// tell them apart.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(ENCODED_LEN);
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                out.push(self.symbol_at(Coord::new(row, col)));
            }
        }
        out
    }

    /// Rebuild a board from its 100-character encoding. `x` decodes to
    /// `Hit`; anything that is not `o` or `x` stays unknown.
    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        let chars: Vec<char> = encoded.chars().collect();
        if chars.len() != ENCODED_LEN {
            return Err(DecodeError(chars.len()));
        }
        let mut board = FogBoard::new();
        for (i, &ch) in chars.iter().enumerate() {
            let cell = Coord::new(
                (i / BOARD_SIZE as usize) as i8,
                (i % BOARD_SIZE as usize) as i8,
            );
            match ch {
                'o' => {
                    board.shots.insert(cell, ShotOutcome::Miss);
                }
                'x' => {
                    board.shots.insert(cell, ShotOutcome::Hit);
                }
                _ => {}
            }
        }
        Ok(board)
    }

    /// First never-shot cell in row-major order, if the board is not
    /// exhausted.
    pub fn first_unshot(&self) -> Option<Coord> {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Coord::new(row, col);
                if !self.shots.contains_key(&cell) {
                    return Some(cell);
                }
            }
        }
        None
    }

    /// Every never-shot cell, in row-major order.
    pub fn unshot_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let cell = Coord::new(row, col);
                if !self.shots.contains_key(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}
