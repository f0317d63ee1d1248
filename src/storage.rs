//! CSV persistence for fleets and game state.
//!
//! Fleet files are one row per occupied cell under a `ship_id,row,col`
//! header, ship ids 1-based in fleet order. Game state files get a header at
//! game start and one appended row per committed turn; the final row carries
//! the authoritative fog boards, earlier rows replay the move history. Move
//! fields embed a comma (`"row,col"`) and are therefore quoted.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::coord::Coord;
use crate::fleet::{Fleet, Ship};
use crate::fog::{DecodeError, FogBoard, ShotOutcome};
use crate::game::{Actor, GameState, Move};

const FLEET_HEADER: &str = "ship_id,row,col";
const STATE_HEADER: &str =
    "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("malformed record on line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("no completed turns in the history to append")]
    EmptyHistory,
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Durable home for one side's fleet.
pub trait FleetStore {
    fn save(&self, fleet: &Fleet) -> Result<(), StorageError>;
    fn load(&self) -> Result<Fleet, StorageError>;
}

/// Durable home for the turn log. `init_new` truncates, `append_turn` adds
/// the latest committed turn, `load` rebuilds the state for a resume.
pub trait GameStateStore {
    fn init_new(&self, state: &GameState) -> Result<(), StorageError>;
    fn append_turn(&self, state: &GameState) -> Result<(), StorageError>;
    fn load(&self) -> Result<GameState, StorageError>;
}

pub struct CsvFleetStore {
    path: PathBuf,
}

impl CsvFleetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FleetStore for CsvFleetStore {
    fn save(&self, fleet: &Fleet) -> Result<(), StorageError> {
        create_parent_dirs(&self.path)?;
        let mut out = String::from(FLEET_HEADER);
        out.push('\n');
        for (idx, ship) in fleet.ships().iter().enumerate() {
            let ship_id = idx + 1;
            for cell in ship.cells() {
                out.push_str(&format!("{ship_id},{},{}\n", cell.row, cell.col));
            }
        }
        fs::write(&self.path, out)?;
        Ok(())
    }

    fn load(&self) -> Result<Fleet, StorageError> {
        let text = read_existing(&self.path)?;
        let mut lines = text.lines();
        expect_header(lines.next(), FLEET_HEADER)?;

        let mut cells_by_ship: BTreeMap<u32, Vec<Coord>> = BTreeMap::new();
        for (idx, raw) in lines.enumerate() {
            let line_no = idx + 2;
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let fields = split_record(line, line_no)?;
            if fields.len() != 3 {
                return Err(StorageError::Malformed {
                    line: line_no,
                    reason: format!("expected 3 fields, got {}", fields.len()),
                });
            }
            let ship_id: u32 = parse_field(&fields[0], "ship_id", line_no)?;
            let row: i8 = parse_field(&fields[1], "row", line_no)?;
            let col: i8 = parse_field(&fields[2], "col", line_no)?;
            cells_by_ship
                .entry(ship_id)
                .or_default()
                .push(Coord::new(row, col));
        }

        let ships = cells_by_ship.into_values().map(Ship::new).collect();
        Ok(Fleet::new(ships))
    }
}

pub struct CsvGameStateStore {
    path: PathBuf,
}

impl CsvGameStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GameStateStore for CsvGameStateStore {
    fn init_new(&self, _state: &GameState) -> Result<(), StorageError> {
        create_parent_dirs(&self.path)?;
        fs::write(&self.path, format!("{STATE_HEADER}\n"))?;
        Ok(())
    }

    fn append_turn(&self, state: &GameState) -> Result<(), StorageError> {
        let (player_move, bot_move) = state
            .turn_history
            .last()
            .ok_or(StorageError::EmptyHistory)?;
        let record = join_record(&[
            state.turn_number.to_string(),
            format_move(player_move),
            player_move.outcome.label().to_string(),
            format_move(bot_move),
            bot_move.outcome.label().to_string(),
            state.player_view.encode(),
            state.bot_view.encode(),
        ]);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{record}")?;
        Ok(())
    }

    fn load(&self) -> Result<GameState, StorageError> {
        let text = read_existing(&self.path)?;
        let mut lines = text.lines();
        expect_header(lines.next(), STATE_HEADER)?;

        let mut state = GameState::new();
        for (idx, raw) in lines.enumerate() {
            let line_no = idx + 2;
            let line = raw.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let fields = split_record(line, line_no)?;
            if fields.len() != 7 {
                return Err(StorageError::Malformed {
                    line: line_no,
                    reason: format!("expected 7 fields, got {}", fields.len()),
                });
            }
            let turn: u32 = parse_field(&fields[0], "turn", line_no)?;
            let player_move = parse_move(Actor::Player, &fields[1], &fields[2], line_no)?;
            let bot_move = parse_move(Actor::Bot, &fields[3], &fields[4], line_no)?;
            state.turn_history.push((player_move, bot_move));
            state.turn_number = turn;
            state.player_view = FogBoard::decode(&fields[5])?;
            state.bot_view = FogBoard::decode(&fields[6])?;
        }
        Ok(state)
    }
}

fn format_move(mv: &Move) -> String {
    let (row, col) = <(i8, i8)>::from(mv.target);
    format!("{row},{col}")
}

fn parse_move(
    actor: Actor,
    move_field: &str,
    outcome_field: &str,
    line: usize,
) -> Result<Move, StorageError> {
    let (row, col) = move_field
        .split_once(',')
        .ok_or_else(|| StorageError::Malformed {
            line,
            reason: format!("move must be `row,col`, got `{move_field}`"),
        })?;
    let target = Coord::new(
        parse_field(row, "move row", line)?,
        parse_field(col, "move col", line)?,
    );
    let outcome =
        ShotOutcome::from_label(outcome_field.trim()).ok_or_else(|| StorageError::Malformed {
            line,
            reason: format!("unknown shot outcome `{outcome_field}`"),
        })?;
    Ok(Move {
        actor,
        target,
        outcome,
    })
}

fn read_existing(path: &Path) -> Result<String, StorageError> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

fn create_parent_dirs(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn expect_header(first_line: Option<&str>, expected: &str) -> Result<(), StorageError> {
    match first_line.map(|l| l.trim_end_matches('\r')) {
        Some(found) if found == expected => Ok(()),
        _ => Err(StorageError::Malformed {
            line: 1,
            reason: format!("expected header `{expected}`"),
        }),
    }
}

fn parse_field<T: FromStr>(field: &str, name: &str, line: usize) -> Result<T, StorageError> {
    field.trim().parse().map_err(|_| StorageError::Malformed {
        line,
        reason: format!("invalid {name}: `{field}`"),
    })
}

/// Join one record, quoting any field that contains the delimiter. Outcome
/// labels and board encodings never need it; move fields always do.
fn join_record(fields: &[String]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            out.push('"');
            out.push_str(&field.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(field);
        }
    }
    out
}

/// Split one record on commas, honoring double-quoted fields with doubled
/// quotes as the escape.
fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, StorageError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else {
            match ch {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut current)),
                _ => current.push(ch),
            }
        }
    }
    if in_quotes {
        return Err(StorageError::Malformed {
            line: line_no,
            reason: "unterminated quoted field".to_string(),
        });
    }
    fields.push(current);
    Ok(fields)
}
