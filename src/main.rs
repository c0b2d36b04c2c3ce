use anyhow::{Context, Result};
use clap::Parser;
use retro_snake::game::{Difficulty, GameConfig, GameEngine, GameSession};
use retro_snake::modes::HumanMode;
use retro_snake::render::{Renderer, Theme};
use retro_snake::storage::{load_game_config, HighScoreRecorder, HighScoreStore};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "retro_snake")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Speed preset
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Color theme
    #[arg(long, default_value = "classic")]
    theme: Theme,

    /// Allow the head to follow directly into the tail's cell
    #[arg(long)]
    tail_chase: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Where the high score is kept
    #[arg(long, default_value = ".snake_high_score.json")]
    high_score_file: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    let config = build_config(&cli)?;
    tracing::info!(?config, "configuration loaded");

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config, seed),
        None => GameEngine::new(config),
    };

    let store = HighScoreStore::new(&cli.high_score_file);
    let mut session = GameSession::with_engine(engine).with_high_score(store.load());
    session.subscribe(HighScoreRecorder::new(store));

    let mut human_mode = HumanMode::new(session, Renderer::new(cli.theme));
    human_mode.run().await?;

    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => load_game_config(path)?,
        None => GameConfig::default(),
    };

    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(width) = cli.width {
        config.grid_width = width;
    }
    if let Some(height) = cli.height {
        config.grid_height = height;
    }
    if cli.tail_chase {
        config.allow_tail_chase = true;
    }

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid game configuration")?;

    Ok(config)
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retro_snake=info".into()),
        )
        .init();

    Ok(())
}
