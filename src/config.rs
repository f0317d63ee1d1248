//! Rule constants for the 10-ship fleet variant: ships may not touch, even
//! diagonally, and the roster runs from one 4-cell ship down to four
//! single-cell ships.

pub const BOARD_SIZE: i8 = 10;
pub const NUM_SHIPS: usize = 10;

/// Required ship lengths, largest first. Generation and validation both walk
/// this roster in order.
pub const REQUIRED_SIZES: [usize; NUM_SHIPS] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Total occupied cells of a full fleet.
pub const FLEET_CELLS: usize = 20;

/// Random placement gives up on a ship after this many rejected samples.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 20_000;
