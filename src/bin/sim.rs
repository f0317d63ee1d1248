use flotilla::{generate_fleet, validate_fleet, BotBrain, GameManager};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

/// Run one brain-vs-brain game to completion and print a JSON summary.
/// Seed 1 drives the player side (fleet and shots), seed 2 the bot side.
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let mut rng1 = SmallRng::seed_from_u64(seed1);
    let mut rng2 = SmallRng::seed_from_u64(seed2);

    let mut player_fleet = generate_fleet(&mut rng1)?;
    let mut bot_fleet = generate_fleet(&mut rng2)?;
    validate_fleet(&mut player_fleet)?;
    validate_fleet(&mut bot_fleet)?;

    let mut manager = GameManager::new(player_fleet, bot_fleet);
    let mut player_brain = BotBrain::new();

    while manager.winner().is_none() {
        let picked = player_brain.choose_shot(&manager.state().player_view, &mut rng1);
        let player_target = if manager.state().player_view.has_been_shot(picked) {
            manager.state().player_view.first_unshot().unwrap_or(picked)
        } else {
            picked
        };
        let player_outcome = manager.apply_player_shot(player_target)?;
        player_brain.on_shot_result(player_target, player_outcome);

        let (bot_target, bot_outcome) = manager.apply_bot_shot(&mut rng2);

        manager.commit_turn(player_target, player_outcome, bot_target, bot_outcome);
    }

    let result = json!({
        "winner": manager.winner().map(|a| a.label()),
        "turns": manager.state().turn_number,
        "player_view": manager.state().player_view.encode(),
        "bot_view": manager.state().bot_view.encode(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
