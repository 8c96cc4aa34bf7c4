#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use fleet_fate::{
    init_logging, print_own_board, print_player_view, print_status, BotController, CliController,
    GameConfig, GameEngine, Session, SessionEnd, Side,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use log::LevelFilter;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone, Debug)]
#[cfg(feature = "std")]
struct GameArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value_t = fleet_fate::DEFAULT_BOARD_SIZE, help = "Board side length (4-26)")]
    size: usize,
    #[arg(long, help = "Remove radar from the ability roster")]
    no_radar: bool,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play against the bot in this terminal.
    Play {
        #[command(flatten)]
        game: GameArgs,
    },
    /// Watch the bot play against itself.
    Auto {
        #[command(flatten)]
        game: GameArgs,
    },
}

#[cfg(feature = "std")]
impl GameArgs {
    fn config(&self) -> GameConfig {
        let config = GameConfig::default().with_board_size(self.size);
        if self.no_radar {
            config.without_radar()
        } else {
            config
        }
    }

    fn rng(&self) -> SmallRng {
        if let Some(s) = self.seed {
            println!("Using fixed seed: {} (game will be reproducible)", s);
            SmallRng::seed_from_u64(s)
        } else {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Warn);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { game } => {
            let engine = GameEngine::new(game.config().with_names("You", "Bot")).map_err(|e| anyhow::anyhow!(e))?;
            let mut rng = game.rng();
            println!("\n════════════════════════════════════════════════════════════");
            println!("                    FLEET PLACEMENT PHASE");
            println!("════════════════════════════════════════════════════════════");
            println!("  • Enter coordinates and orientation (e.g., A5 H or A5 V)");
            println!("  • Press ENTER for random placement, 'help' for more");

            let mut session = Session::new(
                engine,
                Box::new(CliController::stdin()),
                Box::new(BotController::new()),
            );
            let end = session.run(&mut rng).map_err(|e| anyhow::anyhow!(e))?;

            println!("\n╔══════════════════════════════════════════════════════════╗");
            println!("║                   GAME OVER                              ║");
            println!("╚══════════════════════════════════════════════════════════╝\n");
            print_player_view(session.engine());
            match end {
                SessionEnd::Winner(Side::Player) => {
                    println!("\n🎉🎉🎉 VICTORY! 🎉🎉🎉");
                    println!("You have sunk the enemy fleet!");
                }
                SessionEnd::Winner(Side::Bot) => {
                    println!("\n💀 DEFEAT 💀");
                    println!("Your fleet has been destroyed.");
                }
                SessionEnd::Abandoned(_) => println!("\nYou left the battle."),
            }
        }
        Commands::Auto { game } => {
            let engine = GameEngine::new(game.config().with_names("North", "South")).map_err(|e| anyhow::anyhow!(e))?;
            let mut rng = game.rng();
            println!("Starting bot vs bot game...");
            let mut session = Session::new(
                engine,
                Box::new(BotController::new()),
                Box::new(BotController::new()),
            );
            let end = session.run(&mut rng).map_err(|e| anyhow::anyhow!(e))?;

            let engine = session.engine();
            print_status(&engine.snapshot());
            println!("\n{}:", engine.player().name());
            print_own_board(engine.player());
            println!("\n{}:", engine.bot().name());
            print_own_board(engine.bot());
            println!(
                "\n{:?} after {} actions ({} rejected)",
                end,
                session.action_count(),
                session.rejection_count()
            );
        }
    }
    Ok(())
}
