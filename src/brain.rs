//! Shot selection for the bot: random search until something is hit, then a
//! neighborhood hunt, then walking the established axis until the ship sinks.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::coord::Coord;
use crate::fleet::Orientation;
use crate::fog::{FogBoard, ShotOutcome};

/// Hits collected against the ship currently being chased, plus the axis once
/// two of them line up.
#[derive(Debug, Clone)]
struct Targeting {
    hits: Vec<Coord>,
    axis: Option<Orientation>,
}

/// Per-game targeting state for the bot side.
///
/// The brain only ever reads the bot's own fog board, never the opponent
/// fleet, and the caller owns the RNG so a seeded run replays identically.
#[derive(Debug, Clone, Default)]
pub struct BotBrain {
    target: Option<Targeting>,
}

impl BotBrain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the next cell to shoot at. Does not mutate the brain; the caller
    /// reports the resolved outcome through [`BotBrain::on_shot_result`].
    pub fn choose_shot<R: Rng + ?Sized>(&self, view: &FogBoard, rng: &mut R) -> Coord {
        if let Some(target) = &self.target {
            let candidates = match target.axis {
                Some(axis) => axis_extensions(target, axis, view),
                None => hunt_neighbors(target, view),
            };
            if let Some(&cell) = candidates.choose(rng) {
                return cell;
            }
            // Nothing left to try around the wounded ship; search again.
        }
        random_unshot(view, rng)
    }

    /// Fold a resolved shot back into the targeting state.
    pub fn on_shot_result(&mut self, target: Coord, outcome: ShotOutcome) {
        match outcome {
            ShotOutcome::Miss => {}
            ShotOutcome::Sunk => self.target = None,
            ShotOutcome::Hit => match &mut self.target {
                None => {
                    self.target = Some(Targeting {
                        hits: vec![target],
                        axis: None,
                    });
                }
                Some(t) => {
                    t.hits.push(target);
                    if t.axis.is_none() {
                        t.axis = lock_axis(&t.hits);
                    }
                }
            },
        }
    }
}

/// Axis implied by the two most recent hits. A diagonal pair, which cannot
/// come from a straight ship, locks nothing.
fn lock_axis(hits: &[Coord]) -> Option<Orientation> {
    if hits.len() < 2 {
        return None;
    }
    let a = hits[hits.len() - 2];
    let b = hits[hits.len() - 1];
    if a.row == b.row {
        Some(Orientation::Horizontal)
    } else if a.col == b.col {
        Some(Orientation::Vertical)
    } else {
        None
    }
}

fn random_unshot<R: Rng + ?Sized>(view: &FogBoard, rng: &mut R) -> Coord {
    view.unshot_cells()
        .choose(rng)
        .copied()
        .unwrap_or(Coord::new(0, 0))
}

/// Untried 4-directional neighbors of the most recent hit.
fn hunt_neighbors(target: &Targeting, view: &FogBoard) -> Vec<Coord> {
    let last = match target.hits.last() {
        Some(&cell) => cell,
        None => return Vec::new(),
    };
    last.neighbors4()
        .into_iter()
        .filter(|c| c.in_bounds() && !view.has_been_shot(*c))
        .collect()
}

/// The two cells just past the ends of the hit run, whichever are still open.
fn axis_extensions(target: &Targeting, axis: Orientation, view: &FogBoard) -> Vec<Coord> {
    let anchor = match target.hits.first() {
        Some(&cell) => cell,
        None => return Vec::new(),
    };
    let ends = match axis {
        Orientation::Horizontal => {
            let min = target.hits.iter().map(|c| c.col).min().unwrap_or(anchor.col);
            let max = target.hits.iter().map(|c| c.col).max().unwrap_or(anchor.col);
            [
                Coord::new(anchor.row, min - 1),
                Coord::new(anchor.row, max + 1),
            ]
        }
        Orientation::Vertical => {
            let min = target.hits.iter().map(|c| c.row).min().unwrap_or(anchor.row);
            let max = target.hits.iter().map(|c| c.row).max().unwrap_or(anchor.row);
            [
                Coord::new(min - 1, anchor.col),
                Coord::new(max + 1, anchor.col),
            ]
        }
    };
    ends.into_iter()
        .filter(|c| c.in_bounds() && !view.has_been_shot(*c))
        .collect()
}
