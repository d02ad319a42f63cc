//! Persisted best score (XDG config or ~/.config/sandtrix).

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

const FILENAME: &str = "highscore";

/// Where the best score lives. Reads never fail: anything unreadable is 0.
pub trait ScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32) -> Result<()>;
}

/// Returns the path to the high score file (config dir / sandtrix / highscore).
pub fn config_path() -> PathBuf {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => std::env::var("HOME")
            .map(|h| PathBuf::from(h).join(".config"))
            .unwrap_or_else(|_| PathBuf::from(".")),
    };
    base.join("sandtrix").join(FILENAME)
}

impl<T: ScoreStore + ?Sized> ScoreStore for Box<T> {
    fn load(&self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) -> Result<()> {
        (**self).save(score)
    }
}

/// Single integer in a text file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new() -> Self {
        Self::at(config_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.lines().next().and_then(|l| l.trim().parse().ok()))
            .unwrap_or(0)
    }

    fn save(&mut self, score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, format!("{score}\n"))
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-process store; used by tests and by `--no-save`.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    pub value: u32,
    pub writes: u32,
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) -> Result<()> {
        self.value = score;
        self.writes += 1;
        Ok(())
    }
}

/// Best score tracker: reads the store once, writes only on improvement.
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    store: S,
    best: u32,
}

impl<S: ScoreStore> HighScore<S> {
    pub fn new(store: S) -> Self {
        let best = store.load();
        Self { store, best }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records `score` if it beats the best. Returns whether it did. A failed
    /// write is logged and the in-memory best still advances.
    pub fn observe(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        match self.store.save(score) {
            Ok(()) => log::info!("high score {score} saved"),
            Err(e) => log::warn!("could not save high score: {e:#}"),
        }
        true
    }
}
