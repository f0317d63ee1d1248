//! Fleet placement legality: size roster, straight contiguous shapes,
//! bounds, no overlap, and no touching (diagonals included).

use std::collections::BTreeSet;

use thiserror::Error;

use crate::config::REQUIRED_SIZES;
use crate::coord::Coord;
use crate::fleet::{Fleet, Ship};

/// A placement invariant violation, carrying the offending cell(s).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("wrong ship sizes {found:?}, required {:?}", REQUIRED_SIZES)]
    WrongSizes { found: Vec<usize> },
    #[error("ship has no cells")]
    EmptyShip,
    #[error("ship cells must form a straight line: {cells:?}")]
    NotStraight { cells: Vec<Coord> },
    #[error("ship cells must be contiguous: {cells:?}")]
    NotContiguous { cells: Vec<Coord> },
    #[error("ship cell out of bounds: {cell}")]
    OutOfBounds { cell: Coord },
    #[error("ships overlap at {cell}")]
    Overlap { cell: Coord },
    #[error("ships touch (including diagonals) near {cell}")]
    Touching { cell: Coord },
}

/// Check every placement invariant, ship by ship in fleet order.
///
/// On success each ship's cells have been reordered ascending along its
/// axis; later consumers may rely on that. Each failure class maps to its
/// own [`PlacementError`] variant so callers can tell them apart.
pub fn validate_fleet(fleet: &mut Fleet) -> Result<(), PlacementError> {
    let mut sizes: Vec<usize> = fleet.ships().iter().map(Ship::len).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    if sizes != REQUIRED_SIZES {
        return Err(PlacementError::WrongSizes { found: sizes });
    }

    let mut occupied: BTreeSet<Coord> = BTreeSet::new();
    let mut forbidden: BTreeSet<Coord> = BTreeSet::new();

    for ship in fleet.ships_mut() {
        check_shape(ship)?;

        for &cell in ship.cells() {
            if !cell.in_bounds() {
                return Err(PlacementError::OutOfBounds { cell });
            }
            if occupied.contains(&cell) {
                return Err(PlacementError::Overlap { cell });
            }
            if forbidden.contains(&cell) {
                return Err(PlacementError::Touching { cell });
            }
        }

        occupied.extend(ship.cells().iter().copied());

        // Everything around the accepted ship becomes off limits for the
        // ships still to come.
        for &cell in ship.cells() {
            for near in cell.neighbors8() {
                if near.in_bounds() && !occupied.contains(&near) {
                    forbidden.insert(near);
                }
            }
        }
    }

    Ok(())
}

/// Single cell, or a straight contiguous run. Normalizes cell order on
/// success.
fn check_shape(ship: &mut Ship) -> Result<(), PlacementError> {
    let cells = ship.cells();
    if cells.is_empty() {
        return Err(PlacementError::EmptyShip);
    }
    if cells.len() == 1 {
        return Ok(());
    }

    let same_row = cells.iter().all(|c| c.row == cells[0].row);
    let same_col = cells.iter().all(|c| c.col == cells[0].col);
    if !same_row && !same_col {
        return Err(PlacementError::NotStraight {
            cells: cells.to_vec(),
        });
    }

    let mut run: Vec<i8> = if same_row {
        cells.iter().map(|c| c.col).collect()
    } else {
        cells.iter().map(|c| c.row).collect()
    };
    run.sort_unstable();
    let start = run[0];
    let contiguous = run
        .iter()
        .enumerate()
        .all(|(i, &pos)| pos == start + i as i8);
    if !contiguous {
        return Err(PlacementError::NotContiguous {
            cells: cells.to_vec(),
        });
    }

    ship.sort_cells();
    Ok(())
}
