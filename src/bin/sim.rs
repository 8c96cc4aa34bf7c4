use fleet_fate::{BotController, GameConfig, GameEngine, Session, SessionEnd, Side};
use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <seed> [board-size]", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let size: usize = match args.get(2) {
        Some(s) => s.parse()?,
        None => fleet_fate::DEFAULT_BOARD_SIZE,
    };

    let engine = GameEngine::new(GameConfig::default().with_board_size(size)).map_err(|e| anyhow::anyhow!(e))?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut session = Session::new(
        engine,
        Box::new(BotController::new()),
        Box::new(BotController::new()),
    );
    let end = session.run(&mut rng).map_err(|e| anyhow::anyhow!(e))?;

    let winner = match end {
        SessionEnd::Winner(Side::Player) => Some("player"),
        SessionEnd::Winner(Side::Bot) => Some("bot"),
        SessionEnd::Abandoned(_) => None,
    };
    let snapshot = session.engine().snapshot();

    let result = json!({
        "seed": seed,
        "winner": winner,
        "rounds": snapshot.round,
        "actions": session.action_count(),
        "rejections": session.rejection_count(),
        "player": {"life": snapshot.player.life, "stamina": snapshot.player.stamina},
        "bot": {"life": snapshot.bot.life, "stamina": snapshot.bot.stamina},
        "snapshot": &snapshot,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
