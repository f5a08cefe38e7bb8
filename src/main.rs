//! Binsort: waste-sorting arcade game in the terminal.

mod app;
mod catalog;
mod collision;
mod drag;
mod error;
mod input;
mod item;
mod layout;
mod ledger;
mod session;
mod spawner;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Item footprint in logical units.
pub const ITEM_WIDTH: f32 = 50.0;
pub const ITEM_HEIGHT: f32 = 50.0;
/// Logical units per second travelled by an item with fall rate 1.0.
pub const FALL_UNITS_PER_SEC: f32 = 60.0;
/// Items enter above the visible top edge.
pub const SPAWN_Y: f32 = -100.0;

/// Engine tuning derived from CLI (capacity, spawn cadence, bottom band, zone sizing).
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub max_active: usize,
    pub difficulty: Difficulty,
    pub spawn_base: Duration,
    pub spawn_jitter: Duration,
    pub spawn_retry: Duration,
    pub band_height: f32,
    pub item_width: f32,
    pub item_height: f32,
    pub zone_width_min: f32,
    pub zone_width_max: f32,
    /// Zone width is `field_width / zone_divisor`, clamped to the bounds above.
    pub zone_divisor: f32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_active: 5,
            difficulty: Difficulty::Medium,
            spawn_base: Duration::from_millis(1500),
            spawn_jitter: Duration::from_millis(1200),
            spawn_retry: Duration::from_millis(500),
            band_height: 80.0,
            item_width: ITEM_WIDTH,
            item_height: ITEM_HEIGHT,
            zone_width_min: 80.0,
            zone_width_max: 100.0,
            zone_divisor: 6.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            max_active: args.max_active,
            difficulty: args.difficulty,
            spawn_base: Duration::from_millis(args.spawn_base_ms),
            spawn_jitter: Duration::from_millis(args.spawn_jitter_ms),
            spawn_retry: Duration::from_millis(args.spawn_retry_ms),
            band_height: args.band_height,
            seed: args.seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_active == 0 {
            return Err(ConfigError::NoCapacity);
        }
        if self.zone_width_min > self.zone_width_max {
            return Err(ConfigError::ZoneWidth {
                min: self.zone_width_min,
                max: self.zone_width_max,
            });
        }
        if !self.band_height.is_finite() || self.band_height <= 0.0 {
            return Err(ConfigError::BandHeight(self.band_height));
        }
        if self.item_width.is_nan()
            || self.item_height.is_nan()
            || self.item_width <= 0.0
            || self.item_height <= 0.0
        {
            return Err(ConfigError::ItemSize(self.item_width, self.item_height));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path, &args.log_level)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref()).unwrap_or_default();
    let config = GameConfig::from_args(&args);
    config.validate().context("invalid game configuration")?;
    let mut app = App::new(config, theme);
    app.run()?;
    Ok(())
}

/// Route `tracing` output to a file; the terminal belongs to the UI. `RUST_LOG` wins over `--log-level`.
fn init_logging(path: &std::path::Path, level: &str) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install log subscriber: {e}"))?;
    Ok(())
}

/// Sort falling waste into the right bin before it hits the ground.
#[derive(Debug, Parser)]
#[command(
    name = "binsort",
    version,
    about = "Waste-sorting arcade game in the terminal. Drag falling items into the matching bin.",
    long_about = "Binsort is a terminal arcade game about sorting household waste.\n\n\
        Items fall from the top of the field. Grab one with the mouse and drop it over the bin \
        it belongs in: the right bin scores its points, the wrong bin or the ground costs them.\n\n\
        CONTROLS:\n  Mouse drag  Move an item     R  Restart     P  Pause     Q / Esc  Quit\n\n\
        Each mouse button is its own pointer, so two items can be held at once."
)]
pub struct Args {
    /// Difficulty: scales both fall speed and spawn cadence.
    #[arg(short, long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Maximum number of items on the field at once.
    #[arg(long, default_value = "5", value_name = "N")]
    pub max_active: usize,

    /// Base spawn delay in ms, divided by the difficulty multiplier.
    #[arg(long, default_value = "1500", value_name = "MS")]
    pub spawn_base_ms: u64,

    /// Upper bound of the uniform jitter added to each spawn delay.
    #[arg(long, default_value = "1200", value_name = "MS")]
    pub spawn_jitter_ms: u64,

    /// Retry interval while the field is full.
    #[arg(long, default_value = "500", value_name = "MS")]
    pub spawn_retry_ms: u64,

    /// Height of the strip above the ground that an item's bottom edge must reach to be caught (logical units).
    #[arg(long, default_value = "80", value_name = "UNITS")]
    pub band_height: f32,

    /// Seed for item selection and spawn placement.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"). Uses built-in bin colours if not set.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Write logs to this file.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter used with --log-file (e.g. info, binsort=debug).
    #[arg(long, default_value = "info", value_name = "FILTER")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplies item fall rates and divides the base spawn delay.
    pub fn multiplier(&self) -> f32 {
        match self {
            Self::Easy => 1.0,
            Self::Medium => 1.5,
            Self::Hard => 2.0,
        }
    }
}
