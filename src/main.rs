use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rival_snake::game::{GameConfig, MIN_GRID_SIZE};
use rival_snake::leaderboard::Leaderboard;
use rival_snake::modes::{LeaderboardMode, PlayMode};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rival_snake")]
#[command(version, about = "Snake against an AI rival, with a local leaderboard")]
struct Cli {
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_SIZE)..))]
    width: u16,

    /// Grid height
    #[arg(long, default_value = "20", value_parser = clap::value_parser!(u16).range(i64::from(MIN_GRID_SIZE)..))]
    height: u16,

    /// Milliseconds between game ticks
    #[arg(long, default_value = "150", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Seed for a repeatable game
    #[arg(long)]
    seed: Option<u64>,

    /// Leaderboard file
    #[arg(long, default_value = "leaderboard.json")]
    leaderboard: PathBuf,

    /// Log output (the terminal belongs to the game)
    #[arg(long, default_value = "rival_snake.log")]
    log_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Play,
    /// Print the top scores and exit
    Leaderboard,
}

/// `RUST_LOG` directives when set and valid, `info` otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_file)?;

    let leaderboard = Leaderboard::open(cli.leaderboard);

    match cli.mode {
        Mode::Play => {
            let mut config = GameConfig::new(cli.width, cli.height);
            config.tick_interval_ms = cli.tick_ms;

            tracing::info!(
                width = cli.width,
                height = cli.height,
                tick_ms = cli.tick_ms,
                "starting game"
            );
            let mut play_mode = PlayMode::new(config, cli.seed, leaderboard);
            play_mode.run().await?;
        }
        Mode::Leaderboard => {
            LeaderboardMode::new(leaderboard).run()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let cli = Cli::try_parse_from(["rival_snake"]).unwrap();
        assert_eq!(cli.mode, Mode::Play);
        assert_eq!(cli.width, 20);
        assert_eq!(cli.height, 20);
        assert_eq!(cli.tick_ms, 150);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_grid_below_minimum_rejected() {
        assert!(Cli::try_parse_from(["rival_snake", "--width", "0"]).is_err());
        assert!(Cli::try_parse_from(["rival_snake", "--height", "3"]).is_err());
        assert!(Cli::try_parse_from(["rival_snake", "--width", "70000"]).is_err());

        let cli = Cli::try_parse_from(["rival_snake", "--width", "5", "--height", "5"]).unwrap();
        assert_eq!((cli.width, cli.height), (5, 5));
    }

    #[test]
    fn test_zero_tick_rejected() {
        assert!(Cli::try_parse_from(["rival_snake", "--tick-ms", "0"]).is_err());
        assert!(Cli::try_parse_from(["rival_snake", "--tick-ms", "1"]).is_ok());
    }

    #[test]
    fn test_log_filter_honors_rust_log() {
        assert_eq!(log_filter(Some("debug")).to_string(), "debug");
        assert_eq!(log_filter(None).to_string(), "info");
    }

    #[test]
    fn test_log_filter_falls_back_on_bad_directives() {
        assert_eq!(log_filter(Some("rival_snake=loud")).to_string(), "info");
    }
}
