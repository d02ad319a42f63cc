//! Simulation settings and their validation.

use crate::automaton::{DEFAULT_JITTER_CHANCE, DEFAULT_LEFT_CHANCE};
use crate::error::ConfigError;
use std::time::Duration;

/// Grid cells per tetromino block edge.
pub const DEFAULT_SCALE: usize = 6;
pub const DEFAULT_WIDTH: usize = 60;
pub const DEFAULT_HEIGHT: usize = 100;
/// Colours in the normal palette; `--high-color` raises this to [`MAX_PALETTE`].
pub const DEFAULT_PALETTE: u8 = 4;
pub const MAX_PALETTE: u8 = 6;
/// Widest canonical tetromino, in blocks.
const LARGEST_SHAPE: usize = 4;
/// Upper bound on `width * height`.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Everything the session needs to run; `Default` gives the reference tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub scale: usize,
    pub palette_size: u8,
    pub jitter_chance: f64,
    pub left_chance: f64,
    /// Physics step period.
    pub tick_interval: Duration,
    pub gravity_base: Duration,
    /// Taken off the gravity period per `gravity_score_step` points.
    pub gravity_step: Duration,
    pub gravity_score_step: u32,
    pub gravity_min: Duration,
    pub points_per_cell: u32,
    /// Fixed seed for a replayable game; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale: DEFAULT_SCALE,
            palette_size: DEFAULT_PALETTE,
            jitter_chance: DEFAULT_JITTER_CHANCE,
            left_chance: DEFAULT_LEFT_CHANCE,
            tick_interval: Duration::from_secs(1) / 60,
            gravity_base: Duration::from_millis(600),
            gravity_step: Duration::from_millis(20),
            gravity_score_step: 500,
            gravity_min: Duration::from_millis(50),
            points_per_cell: 2,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Smallest grid edge that still fits every piece.
    pub fn min_edge(&self) -> usize {
        LARGEST_SHAPE.saturating_mul(self.scale)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale == 0 {
            return Err(ConfigError::ZeroScale);
        }
        let min = LARGEST_SHAPE
            .checked_mul(self.scale)
            .ok_or(ConfigError::ScaleTooLarge(self.scale))?;
        if self
            .width
            .checked_mul(self.height)
            .is_none_or(|cells| cells > MAX_GRID_CELLS)
        {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
                max: MAX_GRID_CELLS,
            });
        }
        if self.width < min || self.height < min {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min,
            });
        }
        if self.palette_size == 0 || self.palette_size > MAX_PALETTE {
            return Err(ConfigError::PaletteSize(self.palette_size));
        }
        for (name, value) in [
            ("jitter_chance", self.jitter_chance),
            ("left_chance", self.left_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }

    /// Gravity period for a score: shrinks by `gravity_step` every
    /// `gravity_score_step` points, never below `gravity_min`.
    pub fn gravity_interval(&self, score: u32) -> Duration {
        let steps = score / self.gravity_score_step.max(1);
        self.gravity_base
            .saturating_sub(self.gravity_step.saturating_mul(steps))
            .max(self.gravity_min)
    }
}
