//! Wall-to-wall clears: same-colour regions reaching from the left wall to the right wall.

use crate::grid::{Cell, Grid};
use std::collections::VecDeque;

/// Flood-fill clearer. Owns its scratch buffers so a scan never allocates
/// once the buffers have grown to the grid size.
#[derive(Debug, Clone, Default)]
pub struct LineClearer {
    visited: Vec<bool>,
    queue: VecDeque<usize>,
    region: Vec<usize>,
    doomed: Vec<usize>,
    regions_cleared: u32,
}

impl LineClearer {
    pub fn new(width: usize, height: usize) -> Self {
        let n = width * height;
        Self {
            visited: vec![false; n],
            queue: VecDeque::with_capacity(n),
            region: Vec::with_capacity(n),
            doomed: Vec::with_capacity(n),
            regions_cleared: 0,
        }
    }

    /// Number of regions removed by the most recent [`clear_lines`](Self::clear_lines).
    pub fn regions_cleared(&self) -> u32 {
        self.regions_cleared
    }

    /// Finds every 4-connected same-colour region seeded on the left wall that
    /// also touches the right wall, empties all of them, and returns the total
    /// number of cells removed.
    pub fn clear_lines(&mut self, grid: &mut Grid) -> usize {
        let (w, h) = (grid.width(), grid.height());
        if w == 0 {
            return 0;
        }
        self.visited.clear();
        self.visited.resize(w * h, false);
        self.doomed.clear();
        self.regions_cleared = 0;

        for y in 0..h {
            let seed = grid.index(0, y);
            let Cell::Sand(color) = grid.cell_at(seed) else {
                continue;
            };
            if self.visited[seed] {
                continue;
            }
            if self.flood(grid, seed, color) {
                self.doomed.extend_from_slice(&self.region);
                self.regions_cleared += 1;
            }
        }

        for &i in &self.doomed {
            grid.set_at(i, Cell::Empty);
        }
        if !self.doomed.is_empty() {
            log::debug!(
                "cleared {} region(s), {} cells",
                self.regions_cleared,
                self.doomed.len()
            );
        }
        self.doomed.len()
    }

    /// Breadth-first fill from `seed` over cells of `color`, collecting the
    /// region into `self.region`. Returns whether it reached the right wall.
    fn flood(&mut self, grid: &Grid, seed: usize, color: u8) -> bool {
        let (w, h) = (grid.width(), grid.height());
        let target = Cell::Sand(color);
        self.region.clear();
        self.queue.clear();
        self.visited[seed] = true;
        self.queue.push_back(seed);
        let mut reaches_right = false;

        while let Some(i) = self.queue.pop_front() {
            self.region.push(i);
            let (x, y) = (i % w, i / w);
            if x == w - 1 {
                reaches_right = true;
            }
            let neighbours = [
                (x > 0).then(|| i - 1),
                (x + 1 < w).then(|| i + 1),
                (y > 0).then(|| i - w),
                (y + 1 < h).then(|| i + w),
            ];
            for n in neighbours.into_iter().flatten() {
                if !self.visited[n] && grid.cell_at(n) == target {
                    self.visited[n] = true;
                    self.queue.push_back(n);
                }
            }
        }
        reaches_right
    }
}
