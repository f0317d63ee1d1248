//! Random fleet placement by rejection sampling: draw an orientation and an
//! in-bounds run, throw it back if it collides with or touches anything
//! already placed.

use std::collections::BTreeSet;

use rand::Rng;
use thiserror::Error;

use crate::config::{BOARD_SIZE, MAX_PLACEMENT_ATTEMPTS, REQUIRED_SIZES};
use crate::coord::Coord;
use crate::fleet::{Fleet, Ship};

/// Placement sampling ran out of attempts for one ship. Fatal for the whole
/// generation attempt; there is no backtracking across ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no legal placement found for a ship of length {size} after {attempts} attempts")]
pub struct GenerateError {
    pub size: usize,
    pub attempts: usize,
}

/// Produce a fleet that satisfies every placement invariant, largest ship
/// first. The caller supplies the RNG, so a fixed seed reproduces the fleet.
pub fn generate_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Fleet, GenerateError> {
    let mut ships = Vec::with_capacity(REQUIRED_SIZES.len());
    let mut occupied: BTreeSet<Coord> = BTreeSet::new();
    let mut forbidden: BTreeSet<Coord> = BTreeSet::new();

    for &size in REQUIRED_SIZES.iter() {
        let ship = place_ship(rng, size, &occupied, &forbidden)?;

        occupied.extend(ship.cells().iter().copied());
        for &cell in ship.cells() {
            for near in cell.neighbors8() {
                if near.in_bounds() && !occupied.contains(&near) {
                    forbidden.insert(near);
                }
            }
        }
        ships.push(ship);
    }

    Ok(Fleet::new(ships))
}

fn place_ship<R: Rng + ?Sized>(
    rng: &mut R,
    size: usize,
    occupied: &BTreeSet<Coord>,
    forbidden: &BTreeSet<Coord>,
) -> Result<Ship, GenerateError> {
    // Highest legal starting offset for a run of this length.
    let span = BOARD_SIZE - size as i8 + 1;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cells: Vec<Coord> = if rng.random() {
            let row = rng.random_range(0..BOARD_SIZE);
            let start = rng.random_range(0..span);
            (0..size as i8).map(|i| Coord::new(row, start + i)).collect()
        } else {
            let col = rng.random_range(0..BOARD_SIZE);
            let start = rng.random_range(0..span);
            (0..size as i8).map(|i| Coord::new(start + i, col)).collect()
        };

        if cells.iter().any(|c| occupied.contains(c)) {
            continue;
        }
        if cells.iter().any(|c| forbidden.contains(c)) {
            continue;
        }
        // Re-check adjacency against the occupied set itself, not just the
        // accumulated forbidden zone.
        if cells
            .iter()
            .any(|c| c.neighbors8().iter().any(|n| occupied.contains(n)))
        {
            continue;
        }

        return Ok(Ship::new(cells));
    }

    Err(GenerateError {
        size,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}
