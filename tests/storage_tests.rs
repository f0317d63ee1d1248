use std::fs;

use flotilla::{
    validate_fleet, Actor, Coord, CsvFleetStore, CsvGameStateStore, DecodeError, Fleet,
    FleetStore, GameState, GameStateStore, Move, Ship, ShotOutcome, StorageError, ENCODED_LEN,
};

fn ship(cells: &[(i8, i8)]) -> Ship {
    Ship::new(cells.iter().copied().map(Coord::from).collect())
}

fn sample_fleet() -> Fleet {
    Fleet::new(vec![
        ship(&[(0, 0), (0, 1), (0, 2), (0, 3)]),
        ship(&[(0, 5), (0, 6), (0, 7)]),
        ship(&[(2, 0), (2, 1), (2, 2)]),
        ship(&[(2, 4), (2, 5)]),
        ship(&[(2, 7), (2, 8)]),
        ship(&[(4, 0), (5, 0)]),
        ship(&[(4, 3)]),
        ship(&[(4, 5)]),
        ship(&[(4, 7)]),
        ship(&[(4, 9)]),
    ])
}

fn mv(actor: Actor, row: i8, col: i8, outcome: ShotOutcome) -> Move {
    Move {
        actor,
        target: Coord::new(row, col),
        outcome,
    }
}

#[test]
fn test_fleet_roundtrip_preserves_ships() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvFleetStore::new(dir.path().join("fleet.csv"));
    let fleet = sample_fleet();

    store.save(&fleet).unwrap();
    let mut loaded = store.load().unwrap();

    assert_eq!(loaded, fleet);
    assert!(validate_fleet(&mut loaded).is_ok());
}

#[test]
fn test_fleet_file_uses_one_based_ship_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.csv");
    let store = CsvFleetStore::new(&path);

    store.save(&sample_fleet()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("ship_id,row,col"));
    assert_eq!(lines.next(), Some("1,0,0"));
    let last_id = text
        .lines()
        .skip(1)
        .filter_map(|l| l.split(',').next())
        .last()
        .unwrap();
    assert_eq!(last_id, "10");
}

#[test]
fn test_fleet_load_groups_rows_by_ship_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.csv");
    fs::write(&path, "ship_id,row,col\n2,5,5\n1,0,0\n1,0,1\n").unwrap();

    let loaded = CsvFleetStore::new(&path).load().unwrap();
    let ships = loaded.ships();

    assert_eq!(ships.len(), 2);
    assert_eq!(ships[0].cells(), &[Coord::new(0, 0), Coord::new(0, 1)]);
    assert_eq!(ships[1].cells(), &[Coord::new(5, 5)]);
}

#[test]
fn test_fleet_load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = CsvFleetStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::NotFound(p) if p == path));
}

#[test]
fn test_fleet_load_rejects_wrong_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.csv");
    fs::write(&path, "id,r,c\n1,0,0\n").unwrap();

    let err = CsvFleetStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { line: 1, .. }));
}

#[test]
fn test_fleet_load_rejects_non_numeric_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fleet.csv");
    fs::write(&path, "ship_id,row,col\n1,zero,0\n").unwrap();

    let err = CsvFleetStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { line: 2, .. }));
}

#[test]
fn test_fleet_save_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("saves").join("fleet.csv");
    let store = CsvFleetStore::new(&path);

    store.save(&sample_fleet()).unwrap();
    assert!(path.exists());
}

#[test]
fn test_state_init_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let store = CsvGameStateStore::new(&path);

    store.init_new(&GameState::new()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100\n"
    );

    let loaded = store.load().unwrap();
    assert_eq!(loaded.turn_number, 0);
    assert!(loaded.turn_history.is_empty());
    assert_eq!(loaded.player_view.encode(), "?".repeat(ENCODED_LEN));
    assert_eq!(loaded.bot_view.encode(), "?".repeat(ENCODED_LEN));
}

#[test]
fn test_state_init_truncates_a_previous_game() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let store = CsvGameStateStore::new(&path);

    let mut state = GameState::new();
    state.turn_number = 1;
    state.player_view.record_miss(Coord::new(0, 0));
    state.turn_history.push((
        mv(Actor::Player, 0, 0, ShotOutcome::Miss),
        mv(Actor::Bot, 9, 9, ShotOutcome::Miss),
    ));
    store.init_new(&state).unwrap();
    store.append_turn(&state).unwrap();

    store.init_new(&GameState::new()).unwrap();
    let loaded = store.load().unwrap();
    assert!(loaded.turn_history.is_empty());
}

#[test]
fn test_state_append_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvGameStateStore::new(dir.path().join("state.csv"));

    let mut state = GameState::new();
    store.init_new(&state).unwrap();

    state.turn_number = 1;
    state.player_view.record_hit(Coord::new(2, 4));
    state.bot_view.record_miss(Coord::new(9, 9));
    state.turn_history.push((
        mv(Actor::Player, 2, 4, ShotOutcome::Hit),
        mv(Actor::Bot, 9, 9, ShotOutcome::Miss),
    ));
    store.append_turn(&state).unwrap();

    state.turn_number = 2;
    state.player_view.record_sunk(Coord::new(2, 4));
    state.player_view.record_sunk(Coord::new(2, 5));
    state.bot_view.record_hit(Coord::new(5, 5));
    state.turn_history.push((
        mv(Actor::Player, 2, 5, ShotOutcome::Sunk),
        mv(Actor::Bot, 5, 5, ShotOutcome::Hit),
    ));
    store.append_turn(&state).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(loaded.turn_number, 2);
    assert_eq!(loaded.turn_history, state.turn_history);
    // the last appended row wins, sunk cells come back as plain hits
    assert_eq!(loaded.player_view.encode(), state.player_view.encode());
    assert_eq!(loaded.bot_view.encode(), state.bot_view.encode());
}

#[test]
fn test_state_rows_quote_the_move_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let store = CsvGameStateStore::new(&path);

    let mut state = GameState::new();
    state.turn_number = 1;
    state.player_view.record_hit(Coord::new(2, 4));
    state.bot_view.record_miss(Coord::new(9, 9));
    state.turn_history.push((
        mv(Actor::Player, 2, 4, ShotOutcome::Hit),
        mv(Actor::Bot, 9, 9, ShotOutcome::Miss),
    ));
    store.init_new(&state).unwrap();
    store.append_turn(&state).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let row = text.lines().nth(1).unwrap();
    assert!(row.starts_with("1,\"2,4\",hit,\"9,9\",miss,"));
}

#[test]
fn test_state_append_without_turns_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = CsvGameStateStore::new(dir.path().join("state.csv"));
    store.init_new(&GameState::new()).unwrap();

    let err = store.append_turn(&GameState::new()).unwrap_err();
    assert!(matches!(err, StorageError::EmptyHistory));
}

#[test]
fn test_state_load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = CsvGameStateStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::NotFound(p) if p == path));
}

#[test]
fn test_state_load_rejects_wrong_field_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let header = "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100";
    fs::write(&path, format!("{header}\n1,\"2,4\",hit\n")).unwrap();

    let err = CsvGameStateStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { line: 2, .. }));
}

#[test]
fn test_state_load_rejects_unknown_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let header = "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100";
    let views = "?".repeat(ENCODED_LEN);
    fs::write(
        &path,
        format!("{header}\n1,\"2,4\",splash,\"9,9\",miss,{views},{views}\n"),
    )
    .unwrap();

    let err = CsvGameStateStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { line: 2, .. }));
}

#[test]
fn test_state_load_rejects_truncated_view() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let header = "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100";
    let short = "?".repeat(ENCODED_LEN - 1);
    let full = "?".repeat(ENCODED_LEN);
    fs::write(
        &path,
        format!("{header}\n1,\"2,4\",hit,\"9,9\",miss,{short},{full}\n"),
    )
    .unwrap();

    let err = CsvGameStateStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Decode(DecodeError(99))));
}

#[test]
fn test_state_load_rejects_unterminated_quote() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.csv");
    let header = "turn,player_move,player_result,bot_move,bot_result,player_view_100,bot_view_100";
    fs::write(&path, format!("{header}\n1,\"2,4,hit\n")).unwrap();

    let err = CsvGameStateStore::new(&path).load().unwrap_err();
    assert!(matches!(err, StorageError::Malformed { line: 2, .. }));
}
