//! Turn resolution for one game: player and bot alternate shots against each
//! other's fleet, each side seeing only its own fog board.

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::brain::BotBrain;
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::fog::{FogBoard, ShotOutcome};

/// Which side fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Actor {
    Player,
    Bot,
}

impl Actor {
    pub fn label(self) -> &'static str {
        match self {
            Actor::Player => "player",
            Actor::Bot => "bot",
        }
    }
}

/// One resolved shot. Immutable once recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub actor: Actor,
    pub target: Coord,
    pub outcome: ShotOutcome,
}

/// The persistable part of a game: turn counter, both fog boards and the
/// full move history. Fleets live outside because they never change.
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub turn_number: u32,
    pub player_view: FogBoard,
    pub bot_view: FogBoard,
    pub turn_history: Vec<(Move, Move)>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShotError {
    #[error("cell {0} has already been shot")]
    AlreadyShot(Coord),
}

/// Owns the two fleets, the mutable [`GameState`] and the bot's targeting
/// state, and is the only place shots get resolved.
#[derive(Debug)]
pub struct GameManager {
    player_fleet: Fleet,
    bot_fleet: Fleet,
    state: GameState,
    /// Player's confirmed hits on bot ships, for sink and win detection.
    player_hits_on_bot: BTreeSet<Coord>,
    /// Bot's confirmed hits on player ships.
    bot_hits_on_player: BTreeSet<Coord>,
    brain: BotBrain,
}

impl GameManager {
    /// Start a fresh game. Both fleets must already be validated.
    pub fn new(player_fleet: Fleet, bot_fleet: Fleet) -> Self {
        Self {
            player_fleet,
            bot_fleet,
            state: GameState::new(),
            player_hits_on_bot: BTreeSet::new(),
            bot_hits_on_player: BTreeSet::new(),
            brain: BotBrain::new(),
        }
    }

    /// Rebuild a game from a persisted state and the two fleets.
    ///
    /// The hit sets are not persisted; they are recomputed by intersecting
    /// each fleet's occupied cells with the fog cells recorded `Hit` or
    /// `Sunk`, which determines them exactly. The bot's in-flight targeting
    /// state is not persisted either, so a resumed bot starts back in random
    /// search even when a player ship was half destroyed at save time.
    pub fn from_saved(player_fleet: Fleet, bot_fleet: Fleet, state: GameState) -> Self {
        let player_hits_on_bot = recorded_hits(&state.player_view, &bot_fleet);
        let bot_hits_on_player = recorded_hits(&state.bot_view, &player_fleet);
        Self {
            player_fleet,
            bot_fleet,
            state,
            player_hits_on_bot,
            bot_hits_on_player,
            brain: BotBrain::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player_fleet(&self) -> &Fleet {
        &self.player_fleet
    }

    pub fn bot_fleet(&self) -> &Fleet {
        &self.bot_fleet
    }

    /// The winning side, if every cell of the loser's fleet has been hit.
    /// An empty fleet never counts as destroyed.
    pub fn winner(&self) -> Option<Actor> {
        if fleet_destroyed(&self.bot_fleet, &self.player_hits_on_bot) {
            Some(Actor::Player)
        } else if fleet_destroyed(&self.player_fleet, &self.bot_hits_on_player) {
            Some(Actor::Bot)
        } else {
            None
        }
    }

    /// Resolve a player shot against the bot fleet. Re-targeting a cell the
    /// player already shot is an error and leaves all state untouched.
    pub fn apply_player_shot(&mut self, target: Coord) -> Result<ShotOutcome, ShotError> {
        if self.state.player_view.has_been_shot(target) {
            return Err(ShotError::AlreadyShot(target));
        }
        Ok(resolve_shot(
            &self.bot_fleet,
            &mut self.player_hits_on_bot,
            &mut self.state.player_view,
            target,
        ))
    }

    /// Let the targeting brain pick a cell, resolve it against the player
    /// fleet and feed the outcome back into the brain.
    pub fn apply_bot_shot<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (Coord, ShotOutcome) {
        let picked = self.brain.choose_shot(&self.state.bot_view, rng);
        // The brain never repeats itself, but the game must make progress
        // even if it did: take the first open cell in row-major order.
        let target = if self.state.bot_view.has_been_shot(picked) {
            self.state.bot_view.first_unshot().unwrap_or(picked)
        } else {
            picked
        };
        let outcome = resolve_shot(
            &self.player_fleet,
            &mut self.bot_hits_on_player,
            &mut self.state.bot_view,
            target,
        );
        self.brain.on_shot_result(target, outcome);
        (target, outcome)
    }

    /// Record one completed round: bump the turn counter and append both
    /// moves to the history. Called exactly once per round, after both
    /// shots have been resolved.
    pub fn commit_turn(
        &mut self,
        player_target: Coord,
        player_outcome: ShotOutcome,
        bot_target: Coord,
        bot_outcome: ShotOutcome,
    ) {
        self.state.turn_number += 1;
        self.state.turn_history.push((
            Move {
                actor: Actor::Player,
                target: player_target,
                outcome: player_outcome,
            },
            Move {
                actor: Actor::Bot,
                target: bot_target,
                outcome: bot_outcome,
            },
        ));
    }
}

/// Occupied cells of `fleet` whose persisted outcome on `view` is a hit of
/// either kind.
fn recorded_hits(view: &FogBoard, fleet: &Fleet) -> BTreeSet<Coord> {
    fleet
        .occupied_cells()
        .into_iter()
        .filter(|&cell| {
            matches!(
                view.outcome(cell),
                Some(ShotOutcome::Hit) | Some(ShotOutcome::Sunk)
            )
        })
        .collect()
}

fn fleet_destroyed(fleet: &Fleet, hits: &BTreeSet<Coord>) -> bool {
    let occupied = fleet.occupied_cells();
    !occupied.is_empty() && occupied.is_subset(hits)
}

/// Resolve one shot against `defender`, updating the shooter's hit set and
/// fog board.
///
/// A hit that completes a ship upgrades the whole ship to `Sunk` and marks
/// every surrounding in-bounds cell `Miss`: the no-touching placement rule
/// means nothing else can live next to a sunk ship.
fn resolve_shot(
    defender: &Fleet,
    hits: &mut BTreeSet<Coord>,
    view: &mut FogBoard,
    target: Coord,
) -> ShotOutcome {
    let ship = match defender.ship_containing(target) {
        Some(ship) => ship,
        None => {
            view.record_miss(target);
            return ShotOutcome::Miss;
        }
    };

    hits.insert(target);

    if ship.cells().iter().all(|cell| hits.contains(cell)) {
        for &cell in ship.cells() {
            view.record_sunk(cell);
        }
        for &cell in ship.cells() {
            for near in cell.neighbors8() {
                if near.in_bounds() && !ship.contains(near) {
                    view.record_miss(near);
                }
            }
        }
        ShotOutcome::Sunk
    } else {
        view.record_hit(target);
        ShotOutcome::Hit
    }
}
