//! Sand physics: one settling step over every loose grain.

use crate::grid::Grid;
use rand::Rng;

/// Reference chance that a grain tries a diagonal even when straight down is open.
pub const DEFAULT_JITTER_CHANCE: f64 = 0.10;
/// Reference chance of picking down-left when both diagonals are open.
pub const DEFAULT_LEFT_CHANCE: f64 = 0.5;

/// Per-tick grain settling: gravity plus diagonal sliding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SandAutomaton {
    pub jitter_chance: f64,
    pub left_chance: f64,
}

impl Default for SandAutomaton {
    fn default() -> Self {
        Self {
            jitter_chance: DEFAULT_JITTER_CHANCE,
            left_chance: DEFAULT_LEFT_CHANCE,
        }
    }
}

impl SandAutomaton {
    pub fn new(jitter_chance: f64, left_chance: f64) -> Self {
        Self {
            jitter_chance,
            left_chance,
        }
    }

    /// Advances every grain by at most one cell. Returns whether anything moved.
    ///
    /// Rows are scanned from `height - 2` up to `0`, left to right. A grain
    /// only ever moves into the row below, which has already been scanned, so
    /// no grain moves twice in one step.
    ///
    /// Decision order per grain: straight down unless jittered, then a random
    /// open diagonal, then the single open diagonal, then straight down.
    pub fn step<R: Rng + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> bool {
        let (w, h) = (grid.width(), grid.height());
        let mut moved = false;
        for y in (0..h.saturating_sub(1)).rev() {
            for x in 0..w {
                let here = grid.index(x, y);
                if !grid.cell_at(here).is_sand() {
                    continue;
                }
                let below = here + w;
                let can_down = !grid.cell_at(below).is_sand();
                if can_down && !rng.gen_bool(self.jitter_chance) {
                    grid.move_cell(here, below);
                    moved = true;
                    continue;
                }

                let can_left = x > 0 && !grid.cell_at(below - 1).is_sand();
                let can_right = x + 1 < w && !grid.cell_at(below + 1).is_sand();
                let target = match (can_left, can_right) {
                    (true, true) => {
                        if rng.gen_bool(self.left_chance) {
                            Some(below - 1)
                        } else {
                            Some(below + 1)
                        }
                    }
                    (true, false) => Some(below - 1),
                    (false, true) => Some(below + 1),
                    (false, false) => can_down.then_some(below),
                };
                if let Some(to) = target {
                    grid.move_cell(here, to);
                    moved = true;
                }
            }
        }
        moved
    }
}
