use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use termsnake::config::{self, GameConfig, Scoring};
use termsnake::game::SnakeGame;
use termsnake::input;
use termsnake::term::{Palette, TermManager};
use termsnake::world::World;

#[derive(Parser)]
#[command(name = "termsnake")]
#[command(version, about = "Snake in the terminal")]
struct Cli {
    /// Speed [0-20]
    #[arg(long, default_value_t = 18, value_parser = clap::value_parser!(u8).range(0..=20))]
    speed: u8,

    /// Tick interval in milliseconds, overrides --speed
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,

    /// Grow amount per food
    #[arg(long, default_value_t = 10)]
    grow: u32,

    /// Growth queued at the start [default: same as --grow]
    #[arg(long)]
    initial_growth: Option<u32>,

    /// Foods on screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    food: u64,

    /// Scoring rule
    #[arg(long, value_enum, default_value_t = ScoringArg::Length)]
    scoring: ScoringArg,

    /// Points per food when scoring by food
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    score_step: u64,

    /// Skip every other tick while moving vertically
    #[arg(long)]
    vertical_skip: bool,

    /// Color [0-9]
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=9))]
    color: u8,

    /// Enable party mode
    #[arg(long)]
    party: bool,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write a log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level for --log-file
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ScoringArg {
    /// Body length minus one
    Length,
    /// A fixed step per food eaten
    Food,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("unknown log level '{}'", s))
}

impl Cli {
    fn game_config(&self) -> GameConfig {
        let interval = match self.interval_ms {
            Some(ms) => Duration::from_millis(ms),
            None => config::interval_for_speed(self.speed),
        };

        let scoring = match self.scoring {
            ScoringArg::Length => Scoring::BodyLength,
            ScoringArg::Food => Scoring::PerFood(self.score_step),
        };

        GameConfig {
            interval,
            grow_amount: self.grow,
            food_count: self.food as usize,
            initial_growth: self.initial_growth.unwrap_or(self.grow),
            scoring,
            vertical_skip: self.vertical_skip,
            color: self.color,
            party: self.party,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, Config::default(), file)
            .context("Failed to initialize logger")?;
    }

    let config = cli.game_config();
    config.validate().context("Invalid configuration")?;

    let mut term = TermManager::new(Palette::new(config.color, config.party));
    let grid = term.grid().context("Failed to read terminal size")?.playable()?;

    term.setup().context("Failed to set up terminal")?;

    let interval = config.interval;
    let mut world = World::new(config, grid);
    let mut game = SnakeGame::new(term, input::spawn_reader(), interval);
    let result = game.play(&mut world);

    // Put the terminal back even when the game loop failed.
    game.into_screen().restore().context("Failed to restore terminal")?;

    let score = result?;
    println!("Game over! Your score is {}", score);
    Ok(())
}
