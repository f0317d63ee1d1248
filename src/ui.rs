//! Console input and rendering for interactive play.

use std::io::{self, Write};

use crate::config::BOARD_SIZE;
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::fog::ShotOutcome;
use crate::game::GameState;

/// Blocking source of shot coordinates. Implementations loop locally until
/// they have a well-formed cell; they never touch game state.
pub trait ShotInput {
    fn read_shot(&mut self) -> io::Result<Coord>;
}

/// Reads shots from stdin. Accepts `A1`..`J10` (column letter first) or two
/// numbers `row col` / `row,col`, 1-based preferred with a 0-based fallback.
pub struct ConsoleInput;

impl ShotInput for ConsoleInput {
    fn read_shot(&mut self) -> io::Result<Coord> {
        let mut line = String::new();
        loop {
            print!("Enter shot (e.g. A1, J10, '3 4', '2,7'): ");
            io::stdout().flush()?;
            line.clear();
            if io::stdin().read_line(&mut line)? == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
            }
            match parse_coord(line.trim()) {
                Some(coord) => return Ok(coord),
                None => println!("Invalid input, use A1..J10 or `row col` / `row,col`"),
            }
        }
    }
}

/// Parse a cell reference in either accepted form. Returns `None` on
/// anything out of range or malformed.
pub fn parse_coord(input: &str) -> Option<Coord> {
    let s = input.trim().to_ascii_uppercase();
    let first = s.chars().next()?;

    if first.is_ascii_alphabetic() {
        if !('A'..='J').contains(&first) {
            return None;
        }
        let col = (first as u8 - b'A') as i8;
        let row: i8 = s[1..].trim().parse().ok()?;
        if !(1..=BOARD_SIZE).contains(&row) {
            return None;
        }
        return Some(Coord::new(row - 1, col));
    }

    let cleaned = s.replace(',', " ");
    let mut parts = cleaned.split_whitespace();
    let r: i8 = parts.next()?.parse().ok()?;
    let c: i8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if (1..=BOARD_SIZE).contains(&r) && (1..=BOARD_SIZE).contains(&c) {
        return Some(Coord::new(r - 1, c - 1));
    }
    if (0..BOARD_SIZE).contains(&r) && (0..BOARD_SIZE).contains(&c) {
        return Some(Coord::new(r, c));
    }
    None
}

/// `A1`-style label for a cell, column letter first.
pub fn coord_label(cell: Coord) -> String {
    let col = (b'A' + cell.col as u8) as char;
    format!("{}{}", col, cell.row + 1)
}

/// Draws the board pair between turns.
pub trait Renderer {
    fn render(&self, state: &GameState, player_fleet: &Fleet);
}

/// Prints both boards side by side: own board with ships revealed on the
/// left, the fogged enemy board on the right.
pub struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn render(&self, state: &GameState, player_fleet: &Fleet) {
        let own = own_board_lines(state, player_fleet);
        let enemy = enemy_board_lines(state);

        println!("\n{}", "=".repeat(80));
        println!("Turn: {}", state.turn_number);
        println!("{:<36}   {:<36}", "YOUR BOARD", "ENEMY BOARD (FOG)");
        println!("{}", "=".repeat(80));
        for (left, right) in own.iter().zip(enemy.iter()) {
            println!("{left}   {right}");
        }
        println!("\nLegend:");
        println!("  Your board: S=ship, X=hit ship, o=miss, .=unknown water");
        println!("  Enemy fog:  x=hit, o=miss, ?=unknown");
        println!("{}\n", "=".repeat(80));
    }
}

fn own_board_lines(state: &GameState, player_fleet: &Fleet) -> Vec<String> {
    let occupied = player_fleet.occupied_cells();
    let mut lines = Vec::with_capacity(BOARD_SIZE as usize + 1);
    lines.push(header_line());
    for r in 0..BOARD_SIZE {
        let mut symbols = Vec::with_capacity(BOARD_SIZE as usize);
        for c in 0..BOARD_SIZE {
            let cell = Coord::new(r, c);
            let mark = state.bot_view.outcome(cell);
            let symbol = if occupied.contains(&cell) {
                match mark {
                    Some(ShotOutcome::Hit) | Some(ShotOutcome::Sunk) => 'X',
                    _ => 'S',
                }
            } else if mark == Some(ShotOutcome::Miss) {
                'o'
            } else {
                '.'
            };
            symbols.push(symbol.to_string());
        }
        lines.push(format!("{:>2} {}", r + 1, symbols.join(" ")));
    }
    lines
}

fn enemy_board_lines(state: &GameState) -> Vec<String> {
    let mut lines = Vec::with_capacity(BOARD_SIZE as usize + 1);
    lines.push(header_line());
    for r in 0..BOARD_SIZE {
        let mut symbols = Vec::with_capacity(BOARD_SIZE as usize);
        for c in 0..BOARD_SIZE {
            symbols.push(state.player_view.symbol_at(Coord::new(r, c)).to_string());
        }
        lines.push(format!("{:>2} {}", r + 1, symbols.join(" ")));
    }
    lines
}

fn header_line() -> String {
    let letters: Vec<String> = (0..BOARD_SIZE)
        .map(|c| ((b'A' + c as u8) as char).to_string())
        .collect();
    format!("   {}", letters.join(" "))
}
