//! Headless game runner.
//!
//! Plays a full game, picking among candidate pawns at random, and prints a
//! summary. Set `RUST_LOG=ludo_engine=debug` to trace every roll and move.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ludo_engine::{BoardConfig, Color, EventLog, GameBuilder, GameEvent, GameRng, RollOutcome};

/// Simulate a game of Ludo.
#[derive(Parser)]
#[command(name = "ludo-sim", about = "Simulate a game of Ludo with seeded dice")]
struct Cli {
    /// Seed for the dice and pawn choices. Drawn from OS entropy if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Seated colors in turn order
    #[arg(long, value_delimiter = ',', default_value = "red,blue")]
    players: Vec<Color>,

    /// Path to a JSON board configuration
    #[arg(long)]
    board: Option<PathBuf>,

    /// Give up after this many rolls
    #[arg(long, default_value_t = 10_000)]
    max_rolls: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let board = match &cli.board {
        Some(path) => BoardConfig::load(path)
            .with_context(|| format!("Failed to load board from {}", path.display()))?,
        None => BoardConfig::standard(),
    };

    let mut dice = cli.seed.map_or_else(GameRng::from_entropy, GameRng::new);
    let seed = dice.seed();
    let mut chooser = dice.fork();

    let mut builder = GameBuilder::new().board(board);
    for &color in &cli.players {
        builder = builder.player(color);
    }
    let mut engine = builder
        .build_with_dice(dice)
        .context("Invalid game setup")?;

    let log = EventLog::new();
    engine.add_observer(Box::new(log.clone()));

    let mut rolls = 0;
    while !engine.is_over() {
        if rolls == cli.max_rolls {
            bail!("No winner after {} rolls", cli.max_rolls);
        }
        rolls += 1;

        let result = engine.request_roll()?;
        if let RollOutcome::AwaitingChoice(candidates) = result.outcome {
            let &pawn = chooser
                .choose(&candidates)
                .context("Choice offered without candidates")?;
            engine.select_pawn(pawn);
        }
    }

    let winner = engine.winner().context("Game ended without a winner")?;
    let captures = log.count(|e| matches!(e, GameEvent::Captured { .. }));

    println!("Seed:     {seed}");
    println!("Winner:   {winner}");
    println!("Rolls:    {rolls}");
    println!("Moves:    {}", engine.history().len());
    println!("Captures: {captures}");

    Ok(())
}
