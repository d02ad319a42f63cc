//! Error types for the simulation core.

use thiserror::Error;

/// Rejected [`SimConfig`](crate::config::SimConfig).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("scale must be at least 1")]
    ZeroScale,
    #[error("scale {0} is too large")]
    ScaleTooLarge(usize),
    #[error("grid {width}x{height} exceeds {max} cells")]
    GridTooLarge { width: usize, height: usize, max: usize },
    #[error("grid {width}x{height} is smaller than the largest piece ({min}x{min})")]
    GridTooSmall { width: usize, height: usize, min: usize },
    #[error("palette size {0} is outside 1..=6")]
    PaletteSize(u8),
    #[error("{name} = {value} is not a probability")]
    Probability { name: &'static str, value: f64 },
    #[error("tick interval must be positive")]
    ZeroTick,
}
