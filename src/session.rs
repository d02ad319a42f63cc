//! Game session: phase machine, fixed-rate physics tick, gravity timer, score.

use crate::automaton::SandAutomaton;
use crate::clear::LineClearer;
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::piece::{MoveOutcome, PieceController};
use crate::shape::Piece;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Playing,
    Paused,
    GameOver,
}

/// Player commands, already decoded from whatever input device the host uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    NewGame,
}

/// Observable session values, returned from every [`Session::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub score: u32,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    /// Cells removed by clears since the session (re)started.
    pub cells_cleared: u64,
    /// Cells removed during this tick.
    pub last_cleared: usize,
    pub pieces_locked: u32,
    pub gravity_interval: Duration,
}

/// One game: owns the grid, the pieces and the random source.
#[derive(Debug)]
pub struct Session<R: Rng = StdRng> {
    config: SimConfig,
    grid: Grid,
    pieces: PieceController,
    automaton: SandAutomaton,
    clearer: LineClearer,
    rng: R,
    phase: Phase,
    score: u32,
    cells_cleared: u64,
    last_cleared: usize,
    since_tick: Duration,
    since_gravity: Duration,
}

impl Session<StdRng> {
    /// Session seeded from `config.seed`, or from entropy if unset.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Session<R> {
    /// Session drawing all randomness from `rng`.
    pub fn with_rng(config: SimConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let pieces = PieceController::new(&mut rng, config.width, config.scale, config.palette_size);
        let automaton = SandAutomaton::new(config.jitter_chance, config.left_chance);
        let clearer = LineClearer::new(config.width, config.height);
        log::info!(
            "session started: {}x{} grid, scale {}, {} colours",
            config.width,
            config.height,
            config.scale,
            config.palette_size
        );
        Ok(Self {
            config,
            grid,
            pieces,
            automaton,
            clearer,
            rng,
            phase: Phase::Playing,
            score: 0,
            cells_cleared: 0,
            last_cleared: 0,
            since_tick: Duration::ZERO,
            since_gravity: Duration::ZERO,
        })
    }

    /// Empties the grid, zeroes the score and deals fresh pieces.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.pieces = PieceController::new(
            &mut self.rng,
            self.config.width,
            self.config.scale,
            self.config.palette_size,
        );
        self.phase = Phase::Playing;
        self.score = 0;
        self.cells_cleared = 0;
        self.last_cleared = 0;
        self.since_tick = Duration::ZERO;
        self.since_gravity = Duration::ZERO;
        log::info!("new game");
    }

    /// Applies a player command. Returns `false` if the current phase rejects it.
    pub fn apply(&mut self, command: Command) -> bool {
        match (self.phase, command) {
            (_, Command::NewGame) => {
                self.reset();
                return true;
            }
            (Phase::Playing, Command::TogglePause) => self.phase = Phase::Paused,
            (Phase::Paused, Command::TogglePause) => self.phase = Phase::Playing,
            (Phase::Playing, Command::MoveLeft) => {
                self.pieces.translate(&mut self.grid, &mut self.rng, -1, 0);
            }
            (Phase::Playing, Command::MoveRight) => {
                self.pieces.translate(&mut self.grid, &mut self.rng, 1, 0);
            }
            (Phase::Playing, Command::SoftDrop) => {
                self.pieces.translate(&mut self.grid, &mut self.rng, 0, 1);
            }
            (Phase::Playing, Command::Rotate) => {
                self.pieces.rotate(&self.grid);
            }
            (Phase::Playing, Command::HardDrop) => {
                self.pieces.hard_drop(&mut self.grid, &mut self.rng);
            }
            _ => return false,
        }
        self.sync_phase();
        true
    }

    /// Advances the clocks by `delta`. Runs at most one physics step (sand,
    /// then clears) and at most one gravity drop per call; extra elapsed
    /// periods are dropped rather than caught up.
    pub fn tick(&mut self, delta: Duration) -> SessionSnapshot {
        self.last_cleared = 0;
        if self.phase != Phase::Playing {
            return self.snapshot();
        }

        self.since_tick += delta;
        if self.since_tick >= self.config.tick_interval {
            self.since_tick = Duration::ZERO;
            self.step_physics();
        }

        self.since_gravity += delta;
        if self.since_gravity >= self.gravity_interval() {
            self.since_gravity = Duration::ZERO;
            if self.pieces.translate(&mut self.grid, &mut self.rng, 0, 1) == MoveOutcome::Locked {
                self.sync_phase();
            }
        }
        self.snapshot()
    }

    /// One sand step followed by one clear scan. Returns cells cleared.
    pub fn step_physics(&mut self) -> usize {
        self.automaton.step(&mut self.grid, &mut self.rng);
        let cleared = self.clearer.clear_lines(&mut self.grid);
        if cleared > 0 {
            let points = (cleared as u32).saturating_mul(self.config.points_per_cell);
            self.score = self.score.saturating_add(points);
            self.cells_cleared += cleared as u64;
            self.last_cleared += cleared;
            log::info!(
                "cleared {} cells in {} region(s), score {}",
                cleared,
                self.clearer.regions_cleared(),
                self.score
            );
        }
        cleared
    }

    fn sync_phase(&mut self) {
        if self.phase != Phase::GameOver && self.pieces.topped_out() {
            self.phase = Phase::GameOver;
            log::info!(
                "game over: score {}, {} pieces",
                self.score,
                self.pieces.pieces_locked()
            );
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            score: self.score,
            phase: self.phase,
            paused: self.phase == Phase::Paused,
            game_over: self.phase == Phase::GameOver,
            cells_cleared: self.cells_cleared,
            last_cleared: self.last_cleared,
            pieces_locked: self.pieces.pieces_locked(),
            gravity_interval: self.gravity_interval(),
        }
    }

    #[inline]
    pub fn gravity_interval(&self) -> Duration {
        self.config.gravity_interval(self.score)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn active(&self) -> &Piece {
        self.pieces.active()
    }

    #[inline]
    pub fn next(&self) -> &Piece {
        self.pieces.next()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use rand::rngs::mock::StepRng;

    fn small_config() -> SimConfig {
        SimConfig {
            width: 10,
            height: 20,
            scale: 1,
            seed: Some(5),
            ..SimConfig::default()
        }
    }

    fn session() -> Session {
        Session::new(small_config()).unwrap()
    }

    #[test]
    fn starts_playing_with_zero_score() {
        let s = session();
        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.score, 0);
        assert!(!snap.paused && !snap.game_over);
        assert_eq!(snap.gravity_interval, Duration::from_millis(600));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = SimConfig {
            width: 3,
            ..small_config()
        };
        assert!(Session::new(cfg).is_err());
    }

    #[test]
    fn pause_blocks_movement_and_time() {
        let mut s = session();
        assert!(s.apply(Command::TogglePause));
        assert_eq!(s.phase(), Phase::Paused);
        let before = s.active().clone();
        for command in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
            Command::HardDrop,
        ] {
            assert!(!s.apply(command), "{command:?} accepted while paused");
        }
        for _ in 0..100 {
            s.tick(Duration::from_millis(100));
        }
        assert_eq!(s.active(), &before);
        assert_eq!(s.grid().occupied_count(), 0);
        assert!(s.apply(Command::TogglePause));
        assert_eq!(s.phase(), Phase::Playing);
    }

    #[test]
    fn new_game_is_accepted_while_paused() {
        let mut s = session();
        s.apply(Command::HardDrop);
        let snap = s.tick(Duration::from_millis(100));
        assert!(snap.pieces_locked > 0);
        assert!(s.grid().occupied_count() > 0);

        assert!(s.apply(Command::TogglePause));
        assert!(s.apply(Command::NewGame));
        let snap = s.snapshot();
        assert_eq!(snap.phase, Phase::Playing);
        assert!(!snap.paused);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.pieces_locked, 0);
        assert_eq!(s.grid().occupied_count(), 0);
    }

    #[test]
    fn gravity_drops_piece_after_interval() {
        let mut s = session();
        let y = s.active().y;
        s.tick(Duration::from_millis(599));
        assert_eq!(s.active().y, y);
        s.tick(Duration::from_millis(1));
        assert_eq!(s.active().y, y + 1);
    }

    #[test]
    fn long_frame_takes_a_single_gravity_step() {
        let mut s = session();
        let y = s.active().y;
        s.tick(Duration::from_secs(5));
        assert_eq!(s.active().y, y + 1);
    }

    #[test]
    fn physics_waits_for_tick_interval() {
        let mut s = session();
        s.grid.set(0, 0, Cell::Sand(1));
        s.tick(Duration::from_millis(10));
        assert!(s.grid().is_occupied(0, 0));
        s.tick(Duration::from_millis(10));
        assert!(!s.grid().is_occupied(0, 0));
    }

    #[test]
    fn physics_clear_scores_two_per_cell() {
        let mut s = session();
        s.grid.fill_row(19, 0, 10, 2);
        let snap = s.tick(Duration::from_millis(17));
        assert_eq!(snap.last_cleared, 10);
        assert_eq!(snap.score, 20);
        assert_eq!(snap.cells_cleared, 10);
        assert_eq!(s.grid().occupied_count(), 0);
        // reported once only
        assert_eq!(s.tick(Duration::ZERO).last_cleared, 0);
    }

    #[test]
    fn blocked_spawn_ends_game_and_freezes_it() {
        let mut s = session();
        // walls stay open so nothing spans left to right
        for y in 0..20 {
            s.grid.fill_row(y, 1, 9, (y % 4) as u8);
        }
        s.pieces.lock(&mut s.grid, &mut s.rng);
        s.sync_phase();
        assert_eq!(s.phase(), Phase::GameOver);

        let grid = s.grid().clone();
        let score = s.score();
        for _ in 0..50 {
            let snap = s.tick(Duration::from_millis(100));
            assert!(snap.game_over);
        }
        assert_eq!(s.grid(), &grid);
        assert_eq!(s.score(), score);
        assert!(!s.apply(Command::MoveLeft));
        assert!(!s.apply(Command::TogglePause));

        assert!(s.apply(Command::NewGame));
        assert_eq!(s.phase(), Phase::Playing);
        assert_eq!(s.grid().occupied_count(), 0);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn injected_rng_is_used() {
        let s = Session::with_rng(small_config(), StepRng::new(0, 0)).unwrap();
        // StepRng(0) always picks the first shape and colour
        assert_eq!(s.active().kind, crate::shape::TetrominoKind::I);
        assert_eq!(s.active().color, 0);
    }
}
