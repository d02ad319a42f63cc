//! App: terminal init, main loop, tick and key handling.

use crate::Args;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::DefaultTerminal;
use sandtrix::highscores::{FileScoreStore, HighScore, MemoryScoreStore, ScoreStore};
use sandtrix::input::{Action, key_to_action};
use sandtrix::theme::Theme;
use sandtrix::ui::{self, View};
use sandtrix::{Session, SimConfig};
use std::time::{Duration, Instant};

/// ~60 FPS rendering.
const FRAME_DURATION: Duration = Duration::from_millis(16);

pub struct App {
    config: SimConfig,
    theme: Theme,
    high_score: HighScore<Box<dyn ScoreStore>>,
}

impl App {
    pub fn new(args: &Args, config: SimConfig, theme: Theme) -> Self {
        let store: Box<dyn ScoreStore> = if args.no_save {
            Box::new(MemoryScoreStore::default())
        } else {
            Box::new(FileScoreStore::new())
        };
        Self {
            config,
            theme,
            high_score: HighScore::new(store),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode, size},
        };

        // Shrink the requested grid so board + sidebar fit on screen.
        let (term_cols, term_rows) = size()?;
        let (fit_w, fit_h) = ui::max_grid_for_terminal(term_cols, term_rows);
        let min = self.config.min_edge();
        self.config.width = self.config.width.min(fit_w).max(min);
        self.config.height = self.config.height.min(fit_h).max(min);
        if self.config.width > fit_w || self.config.height > fit_h {
            log::warn!(
                "terminal {term_cols}x{term_rows} is smaller than the minimum {min}x{min} grid; drawing will be cut off"
            );
        }
        let mut session = Session::new(self.config.clone())?;

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal = DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        let result = self.run_loop(&mut terminal, &mut session);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        log::info!(
            "exit: score {}, best {}",
            session.score(),
            self.high_score.best()
        );
        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal, session: &mut Session) -> Result<()> {
        let mut last_frame = Instant::now();
        loop {
            let now = Instant::now();
            let snapshot = session.tick(now.duration_since(last_frame));
            last_frame = now;
            self.high_score.observe(snapshot.score);

            let view = View {
                session,
                theme: &self.theme,
                best: self.high_score.best(),
            };
            terminal.draw(|f| ui::draw(f, view))?;

            let timeout = FRAME_DURATION.saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    if let Event::Key(key) = event::read()? {
                        match key_to_action(key) {
                            Action::Quit => return Ok(()),
                            Action::Game(command) => {
                                session.apply(command);
                            }
                            Action::None => {}
                        }
                    }
                }
            }
        }
    }
}
