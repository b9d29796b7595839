use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use pixel_snake::game::{Difficulty, GameConfig};
use pixel_snake::modes::HumanMode;
use pixel_snake::persistence::JsonFileStore;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pixel_snake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Difficulty preselected in the menu
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Play field size in pixels
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Cell size in pixels; the grid has canvas_size / cell_size tiles per side
    #[arg(long)]
    cell_size: Option<u32>,

    /// JSON file with game settings, flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the high score is kept
    #[arg(long, default_value = "pixel_snake_highscore.json")]
    high_score_file: PathBuf,

    /// Seed for food placement, random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Log file, the terminal itself is used by the game
    #[arg(long, default_value = "pixel_snake.log")]
    log_file: PathBuf,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(canvas_size) = self.canvas_size {
            config.canvas_size = canvas_size;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }

        config
            .validate()
            .map_err(|e| anyhow!("Invalid game configuration: {}", e))?;
        Ok(config)
    }
}

fn init_logging(log_file: &Path) -> Result<WorkerGuard> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .with_context(|| format!("Log file {:?} has no file name", log_file))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.log_file)?;

    // Create game configuration from CLI arguments
    let config = cli.game_config()?;
    info!(
        difficulty = %config.difficulty,
        canvas_size = config.canvas_size,
        cell_size = config.cell_size,
        "starting pixel snake"
    );

    let store = JsonFileStore::new(&cli.high_score_file);
    let mut human_mode = HumanMode::new(config, store, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}
