//! Ships and fleets. A ship is nothing more than the ordered list of cells
//! it occupies; everything else (length, axis, occupancy) is derived.

use std::collections::BTreeSet;

use crate::coord::Coord;

/// Axis of a multi-cell ship run. Also used by the targeting brain once two
/// hits pin down the direction of a partially found ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One ship, as its occupied cells in placement order.
///
/// Validation normalizes the order to ascending along the ship's axis; until
/// then the order is whatever the source (file, generator) produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    cells: Vec<Coord>,
}

impl Ship {
    pub fn new(cells: Vec<Coord>) -> Self {
        Ship { cells }
    }

    /// Ship size, in cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }

    /// Reorder cells ascending along the ship's axis. Row-major coordinate
    /// order gives ascending columns for a horizontal run and ascending rows
    /// for a vertical one, so a plain sort covers both.
    pub(crate) fn sort_cells(&mut self) {
        self.cells.sort();
    }
}

/// A player's complete set of ships, in placement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new(ships: Vec<Ship>) -> Self {
        Fleet { ships }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub(crate) fn ships_mut(&mut self) -> &mut [Ship] {
        &mut self.ships
    }

    /// Every cell occupied by any ship. Recomputed on demand; the set is
    /// ordered so iteration is deterministic.
    pub fn occupied_cells(&self) -> BTreeSet<Coord> {
        self.ships
            .iter()
            .flat_map(|ship| ship.cells().iter().copied())
            .collect()
    }

    /// The ship occupying `cell`, if any.
    pub fn ship_containing(&self, cell: Coord) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.contains(cell))
    }
}
