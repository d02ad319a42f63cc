//! Piece controller: active and next piece, movement, rotation with wall kicks, lock.

use crate::collision::collides;
use crate::grid::{Cell, Grid};
use crate::shape::{Piece, random_piece};
use rand::Rng;

/// Wall kick order after a rotation: none, one column left/right, one row up,
/// two columns left/right. The first legal offset wins.
pub const WALL_KICKS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Result of a translate attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Blocked sideways (or upward); piece unchanged.
    Blocked,
    /// Blocked moving down; the piece was locked into the grid.
    Locked,
    /// Controller has topped out; nothing happens.
    Ignored,
}

/// Owns the falling piece and the pre-generated next piece.
#[derive(Debug, Clone)]
pub struct PieceController {
    active: Piece,
    next: Piece,
    scale: usize,
    palette_size: u8,
    topped_out: bool,
    pieces_locked: u32,
}

impl PieceController {
    /// Generates the first active and next pieces. Does not check for overlap;
    /// a fresh session starts on an empty grid.
    pub fn new<R: Rng + ?Sized>(rng: &mut R, grid_width: usize, scale: usize, palette_size: u8) -> Self {
        let active = random_piece(rng, grid_width, scale, palette_size);
        let next = random_piece(rng, grid_width, scale, palette_size);
        Self {
            active,
            next,
            scale,
            palette_size,
            topped_out: false,
            pieces_locked: 0,
        }
    }

    #[inline]
    pub fn active(&self) -> &Piece {
        &self.active
    }

    #[inline]
    pub fn next(&self) -> &Piece {
        &self.next
    }

    /// True once a spawned piece overlapped existing sand.
    #[inline]
    pub fn topped_out(&self) -> bool {
        self.topped_out
    }

    #[inline]
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Promotes the next piece to active, centred at the top, and draws a new
    /// next piece. Returns `false` (and tops out) if the new active piece
    /// already overlaps sand.
    pub fn spawn_next<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> bool {
        let fresh = random_piece(rng, grid.width(), self.scale, self.palette_size);
        self.active = std::mem::replace(&mut self.next, fresh);
        self.active.center(grid.width());
        if collides(grid, &self.active, 0, 0) {
            log::info!(
                "spawn blocked: {:?} at ({}, {})",
                self.active.kind,
                self.active.x,
                self.active.y
            );
            self.topped_out = true;
            return false;
        }
        true
    }

    /// Shifts the active piece by `(dx, dy)` if legal. A blocked pure
    /// one-row drop locks the piece instead.
    pub fn translate<R: Rng + ?Sized>(
        &mut self,
        grid: &mut Grid,
        rng: &mut R,
        dx: i32,
        dy: i32,
    ) -> MoveOutcome {
        if self.topped_out {
            return MoveOutcome::Ignored;
        }
        if !collides(grid, &self.active, dx, dy) {
            self.active.x += dx;
            self.active.y += dy;
            return MoveOutcome::Moved;
        }
        if dx == 0 && dy == 1 {
            self.lock(grid, rng);
            return MoveOutcome::Locked;
        }
        MoveOutcome::Blocked
    }

    /// Quarter-turns the active piece clockwise, trying each of
    /// [`WALL_KICKS`] in order. Returns the kick used, or `None` if every
    /// kick collided and the piece was left unchanged.
    pub fn rotate(&mut self, grid: &Grid) -> Option<(i32, i32)> {
        if self.topped_out {
            return None;
        }
        let mut candidate = Piece {
            kind: self.active.kind,
            bitmap: self.active.bitmap.rotated_cw(),
            color: self.active.color,
            x: self.active.x,
            y: self.active.y,
        };
        let kick = WALL_KICKS
            .iter()
            .copied()
            .find(|&(kx, ky)| !collides(grid, &candidate, kx, ky))?;
        candidate.x += kick.0;
        candidate.y += kick.1;
        self.active = candidate;
        Some(kick)
    }

    /// Drops the active piece as far as it goes and locks it. Returns the
    /// number of rows travelled.
    pub fn hard_drop<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) -> u32 {
        if self.topped_out {
            return 0;
        }
        let mut rows = 0;
        while !collides(grid, &self.active, 0, 1) {
            self.active.y += 1;
            rows += 1;
        }
        self.lock(grid, rng);
        rows
    }

    /// Stamps the active piece into the grid as sand, then spawns the next
    /// piece. Cells outside the grid are skipped.
    pub fn lock<R: Rng + ?Sized>(&mut self, grid: &mut Grid, rng: &mut R) {
        let color = self.active.color;
        for (x, y) in self.active.cells() {
            if grid.in_bounds(x, y) {
                grid.set(x as usize, y as usize, Cell::Sand(color));
            }
        }
        self.pieces_locked += 1;
        log::debug!(
            "locked {:?} colour {} at ({}, {})",
            self.active.kind,
            color,
            self.active.x,
            self.active.y
        );
        self.spawn_next(grid, rng);
    }
}
