//! Board coordinates and neighborhood computation.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::config::BOARD_SIZE;

/// A single cell position, row-major.
///
/// Rows and columns are signed so that neighbor computation near the board
/// edge can produce out-of-range candidates; callers filter those with
/// [`Coord::in_bounds`]. The derived ordering is row-major `(row, col)`,
/// which keeps set iteration deterministic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Coord {
    pub row: i8,
    pub col: i8,
}

impl Coord {
    pub const fn new(row: i8, col: i8) -> Self {
        Coord { row, col }
    }

    /// Whether this cell lies on the 10×10 board.
    pub fn in_bounds(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Orthogonal neighbors, in up/down/left/right order. Not bounds-filtered.
    pub fn neighbors4(self) -> [Coord; 4] {
        let Coord { row: r, col: c } = self;
        [
            Coord::new(r - 1, c),
            Coord::new(r + 1, c),
            Coord::new(r, c - 1),
            Coord::new(r, c + 1),
        ]
    }

    /// All eight surrounding cells, including diagonals. Not bounds-filtered.
    pub fn neighbors8(self) -> [Coord; 8] {
        let Coord { row: r, col: c } = self;
        [
            Coord::new(r - 1, c - 1),
            Coord::new(r - 1, c),
            Coord::new(r - 1, c + 1),
            Coord::new(r, c - 1),
            Coord::new(r, c + 1),
            Coord::new(r + 1, c - 1),
            Coord::new(r + 1, c),
            Coord::new(r + 1, c + 1),
        ]
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(i8, i8)> for Coord {
    fn from((row, col): (i8, i8)) -> Self {
        Coord::new(row, col)
    }
}

impl From<Coord> for (i8, i8) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}
