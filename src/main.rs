use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use flotilla::{
    generate_fleet, init_logging, validate_fleet, ConsoleInput, ConsoleRenderer, CsvFleetStore,
    CsvGameStateStore, FleetStore, GameManager, GameStateStore, Renderer, ShotInput,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play an interactive game against the bot.
    Play {
        /// Directory holding the fleet and game-state CSV files.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        /// Resume the saved game in the data directory instead of starting fresh.
        #[arg(long)]
        resume: bool,
    },
    /// Generate a random legal fleet and write it to a CSV file.
    GenFleet {
        /// Output path for the fleet file.
        #[arg(long, default_value = "data/player_ships.csv")]
        out: PathBuf,
        #[arg(long, help = "Fix RNG seed for reproducible placement (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            data_dir,
            seed,
            resume,
        } => play(data_dir, seed, resume),
        Commands::GenFleet { out, seed } => gen_fleet(out, seed),
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    if let Some(s) = seed {
        SmallRng::seed_from_u64(s)
    } else {
        let mut seed_rng = rand::rng();
        SmallRng::from_rng(&mut seed_rng)
    }
}

fn play(data_dir: PathBuf, seed: Option<u64>, resume: bool) -> anyhow::Result<()> {
    let player_path = data_dir.join("player_ships.csv");
    let bot_path = data_dir.join("bot_ships.csv");
    let state_path = data_dir.join("game_state.csv");

    let player_store = CsvFleetStore::new(&player_path);
    let bot_store = CsvFleetStore::new(&bot_path);
    let state_store = CsvGameStateStore::new(&state_path);

    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
    let mut rng = make_rng(seed);

    let mut manager = if resume {
        let mut player_fleet = player_store.load().context("loading player fleet")?;
        let mut bot_fleet = bot_store.load().context("loading bot fleet")?;
        let state = state_store.load().context("loading saved game state")?;
        validate_fleet(&mut player_fleet)?;
        validate_fleet(&mut bot_fleet)?;
        log::info!("resuming saved game at turn {}", state.turn_number);
        println!("Loaded saved game.");
        GameManager::from_saved(player_fleet, bot_fleet, state)
    } else {
        if !player_path.exists() {
            bail!(
                "missing {}: create the player fleet first, one cell per row \
                 under a `ship_id,row,col` header (or run `gen-fleet`)",
                player_path.display()
            );
        }
        let mut player_fleet = player_store.load().context("loading player fleet")?;
        validate_fleet(&mut player_fleet)?;

        let mut bot_fleet = generate_fleet(&mut rng)?;
        validate_fleet(&mut bot_fleet)?;
        bot_store.save(&bot_fleet).context("saving bot fleet")?;
        log::info!("generated bot fleet, starting fresh game");

        let manager = GameManager::new(player_fleet, bot_fleet);
        state_store
            .init_new(manager.state())
            .context("initializing game state file")?;
        manager
    };

    run_game(&mut manager, &state_store, &mut rng)
}

fn run_game(
    manager: &mut GameManager,
    state_store: &CsvGameStateStore,
    rng: &mut SmallRng,
) -> anyhow::Result<()> {
    let renderer = ConsoleRenderer;
    let mut input = ConsoleInput;

    renderer.render(manager.state(), manager.player_fleet());

    loop {
        if let Some(winner) = manager.winner() {
            println!("Game over! Winner: {}", winner.label());
            break;
        }

        // Re-prompt until the player names a cell they have not shot yet.
        let (player_target, player_outcome) = loop {
            let target = input.read_shot()?;
            match manager.apply_player_shot(target) {
                Ok(outcome) => break (target, outcome),
                Err(err) => println!("{err}"),
            }
        };
        log::debug!("player shot {} -> {}", player_target, player_outcome.label());

        let (bot_target, bot_outcome) = manager.apply_bot_shot(rng);
        log::debug!("bot shot {} -> {}", bot_target, bot_outcome.label());

        manager.commit_turn(player_target, player_outcome, bot_target, bot_outcome);
        if let Err(err) = state_store.append_turn(manager.state()) {
            log::error!(
                "failed to persist turn {}: {err}",
                manager.state().turn_number
            );
            return Err(err).context("persisting turn");
        }

        renderer.render(manager.state(), manager.player_fleet());
    }
    Ok(())
}

fn gen_fleet(out: PathBuf, seed: Option<u64>) -> anyhow::Result<()> {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (placement will be reproducible)", s);
    }
    let mut rng = make_rng(seed);

    let mut fleet = generate_fleet(&mut rng)?;
    validate_fleet(&mut fleet)?;
    CsvFleetStore::new(&out)
        .save(&fleet)
        .context("saving fleet")?;
    println!("Wrote {} ships to {}", fleet.ships().len(), out.display());
    Ok(())
}
