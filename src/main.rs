//! Sandtrix: falling-sand tetromino puzzle in the terminal.

mod app;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use sandtrix::SimConfig;
use sandtrix::config::{DEFAULT_PALETTE, MAX_PALETTE};
use sandtrix::theme::{Palette, Theme};
use std::path::PathBuf;
use std::time::Duration;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let theme = Theme::load(args.theme.as_deref(), args.palette).unwrap_or_else(|e| {
        log::warn!("theme not loaded, using defaults: {e}");
        Theme::default()
    });
    let config = args.sim_config()?;
    config.validate()?;

    let mut app = App::new(&args, config, theme);
    app.run()?;
    Ok(())
}

/// Logs go to a file only; the terminal belongs to the game.
fn init_logging(path: Option<&std::path::Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Falling-sand tetromino puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "sandtrix",
    version,
    about = "Falling-sand tetromino puzzle in the terminal. Locked blocks crumble into sand; connect one colour from wall to wall to clear it.",
    long_about = "Sandtrix is a terminal puzzle game where tetrominoes turn into sand.\n\n\
        Place falling coloured blocks. When they lock, they become loose grains that slide \
        and pile up. Any single-colour region touching both the left and right walls is \
        cleared for 2 points per grain. Gravity speeds up as the score climbs.\n\n\
        CONTROLS:\n  Left/Right h/l  Move    Up k i     Rotate CW   Down j     Soft drop\n  \
        Enter/Space     Hard drop   P          Pause      N R        New game   Q / Esc   Quit\n\n\
        Use --theme to load a btop-style theme (e.g. onedark.theme)."
)]
pub struct Args {
    /// Path to theme file (btop-style theme[key]=\"value\"). Uses One Dark if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Grid width in grains. Shrunk to fit the terminal.
    #[arg(long, default_value = "60", value_name = "GRAINS")]
    pub width: usize,

    /// Grid height in grains. Two grains share one terminal row.
    #[arg(long, default_value = "100", value_name = "GRAINS")]
    pub height: usize,

    /// Grains per tetromino block edge.
    #[arg(long, default_value = "6", value_name = "N")]
    pub scale: usize,

    /// High color mode: use 6 colors (red, blue, yellow, green, magenta, cyan) instead of 4.
    #[arg(long)]
    pub high_color: bool,

    /// Chance a grain that could fall straight down tries a diagonal instead.
    #[arg(long, default_value = "0.1", value_name = "P")]
    pub jitter: f64,

    /// Seed for a replayable game.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Sand physics steps per second.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Write logs to this file (filter with RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Keep the high score in memory only.
    #[arg(long)]
    pub no_save: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        anyhow::ensure!(
            self.tick_rate.is_finite() && self.tick_rate > 0.0,
            "--tick-rate must be a positive number, got {}",
            self.tick_rate
        );
        let tick_interval = Duration::try_from_secs_f64(1.0 / self.tick_rate)
            .with_context(|| format!("--tick-rate {} is too slow", self.tick_rate))?;
        Ok(SimConfig {
            width: self.width,
            height: self.height,
            scale: self.scale,
            palette_size: if self.high_color { MAX_PALETTE } else { DEFAULT_PALETTE },
            jitter_chance: self.jitter,
            tick_interval,
            seed: self.seed,
            ..SimConfig::default()
        })
    }
}
