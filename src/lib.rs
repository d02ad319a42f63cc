//! Falling-sand tetromino engine.
//!
//! Pieces fall as rigid tetrominoes scaled up to blocks of grains. Once a
//! piece locks it turns into loose sand that the automaton settles one step
//! per tick. A single-colour region that touches both side walls is removed
//! and scored. [`Session`] drives all of it from a host-supplied clock; the
//! terminal host in `main.rs` adds input, drawing and the saved high score.

pub mod automaton;
pub mod clear;
pub mod collision;
pub mod config;
pub mod error;
pub mod grid;
pub mod highscores;
pub mod input;
pub mod piece;
pub mod session;
pub mod shape;
pub mod theme;
pub mod ui;

pub use automaton::SandAutomaton;
pub use clear::LineClearer;
pub use collision::collides;
pub use config::SimConfig;
pub use error::ConfigError;
pub use grid::{Cell, Grid};
pub use piece::{MoveOutcome, PieceController};
pub use session::{Command, Phase, Session, SessionSnapshot};
pub use shape::{Bitmap, Piece, TetrominoKind};
