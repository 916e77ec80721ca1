//! Void Breaker entry point
//!
//! Headless runner: loads a map, plays one round with the autopilot, records
//! the result and prints the map's highscore table.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use void_breaker::highscores::format_table;
use void_breaker::renderer::{AssetRegistry, Renderer, TextureId, render};
use void_breaker::sim::{GameState, Map, Rect, TickOutcome, autopilot, tick};
use void_breaker::{GameConfig, HighscoreEntry, HighscoreStore, ResourceError};

#[derive(Parser, Debug)]
#[command(name = "void-breaker")]
#[command(about = "Brick-breaking arcade simulation with a built-in autopilot")]
struct Cli {
    /// Map file to play
    #[arg(default_value = "maps/Map1.txt")]
    map: PathBuf,
    /// Name recorded in the highscore table
    #[arg(default_value = "Anonymous")]
    player: String,
    /// Highscore file
    #[arg(long, default_value = "scores.txt")]
    scores: PathBuf,
    /// JSON game configuration (missing fields use the defaults)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for launch directions and bonus rolls (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// Give up on a round that has not ended after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Only validate the given map files
    #[arg(long, num_args = 1.., value_name = "MAP")]
    check: Vec<PathBuf>,
}

/// Frame sink with no window behind it
#[derive(Debug, Default)]
struct HeadlessRenderer {
    draws: u64,
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, _texture: TextureId, _rect: Rect) -> Result<(), ResourceError> {
        self.draws += 1;
        Ok(())
    }
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if !cli.check.is_empty() {
        return Ok(check_maps(&cli.check, &config));
    }

    play(&cli, &config)?;
    Ok(ExitCode::SUCCESS)
}

/// Validate every map, reporting each one; fails if any map is bad
fn check_maps(paths: &[PathBuf], config: &GameConfig) -> ExitCode {
    let mut failed = 0;
    for path in paths {
        match Map::load(path, config.brick_rows, config.brick_columns) {
            Ok(map) => println!(
                "{}: ok ({} destructible bricks)",
                path.display(),
                map.destructible_count()
            ),
            Err(e) => {
                failed += 1;
                println!("{}: {e}", path.display());
            }
        }
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        log::warn!("{failed} of {} maps failed validation", paths.len());
        ExitCode::FAILURE
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn play(cli: &Cli, config: &GameConfig) -> Result<()> {
    let map = Map::load(&cli.map, config.brick_rows, config.brick_columns)?;
    let assets = AssetRegistry::sequential();
    assets.validate()?;

    let seed = cli.seed.unwrap_or_else(clock_seed);
    log::info!("Playing {} as {} (seed {seed})", cli.map.display(), cli.player);

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new(&map, config);
    let mut frame = HeadlessRenderer::default();

    render(&state, config, &assets, &mut frame)?;
    while !state.is_over() && state.time_ticks < cli.max_ticks {
        let input = autopilot(&state);
        if tick(&mut state, &input, &mut rng) == TickOutcome::Quit {
            break;
        }
        render(&state, config, &assets, &mut frame)
            .with_context(|| format!("frame {}", state.time_ticks))?;
    }
    log::debug!("{} draw calls over {} ticks", frame.draws, state.time_ticks);

    let Some(outcome) = state.outcome() else {
        log::warn!(
            "Round unfinished after {} ticks, not recording a score",
            state.time_ticks
        );
        return Ok(());
    };

    println!(
        "{outcome:?}! Your score is {} with {} lives left.",
        state.score.score(),
        state.lives
    );

    let entry = HighscoreEntry::new(
        cli.map.display().to_string(),
        state.score.score(),
        state.lives,
        cli.player.as_str(),
    );
    record_score(&cli.scores, entry);
    Ok(())
}

/// Append the result and print the table; store failures never fail the round
fn record_score(path: &Path, entry: HighscoreEntry) {
    let store = HighscoreStore::new(path);
    if let Err(e) = store.append(&entry) {
        log::warn!("Could not save highscore: {e}");
    }

    match store.load(&entry.map) {
        Ok(entries) => {
            println!("Highscores for {}:", entry.map);
            print!("{}", format_table(&entries));
        }
        Err(e) => log::warn!("Could not read highscores: {e}"),
    }
}
