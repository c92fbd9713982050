//! # quiz-runner
//!
//! A terminal quiz for elementary-school students: pick a quiz set, answer
//! shuffled questions against a five minute clock, and see your score.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_runner::{AppConfig, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load the question bank from a JSON file
//!     let quiz = Quiz::from_json("quiz_bank.json", AppConfig::default())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
pub mod logging;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use thiserror::Error;
use tracing::{info, warn};

pub use app::{App, AppConfig, Screen};
pub use data::{load_bank_from_json, LoadError, QuizBank, DEFAULT_BANK_PATH};
pub use models::{Category, CorrectAnswer, Question, QuestionKind, CATEGORIES};
pub use session::{Phase, Session};

/// How long the event loop waits between frames when no key is pending.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading the question bank.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error during quiz execution.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The log subscriber could not be installed.
    #[error("Failed to set up logging: {0}")]
    Logging(String),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz over an already loaded bank.
    pub fn new(bank: QuizBank, config: AppConfig) -> Self {
        Self {
            app: App::new(bank, config),
        }
    }

    /// Load a quiz from a question bank file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_runner::{AppConfig, Quiz};
    ///
    /// let quiz = Quiz::from_json("quiz_bank.json", AppConfig::default()).expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P, config: AppConfig) -> Result<Self, QuizError> {
        let bank = load_bank_from_json(path)?;
        Ok(Self::new(bank, config))
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits. Must be awaited on a tokio
    /// runtime, which drives the session countdown.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        finish_run(result, terminal::restore())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(terminal: &mut terminal::Tui, app: &mut App) -> Result<(), QuizError> {
    info!("quiz started");

    loop {
        draw_frame(terminal, app)?;

        if !event::poll(Duration::ZERO)? {
            tokio::time::sleep(FRAME_INTERVAL).await;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key) {
                break;
            }
        }
    }

    info!("quiz closed");
    Ok(())
}

/// Bring the app up to date, then draw it.
fn draw_frame<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), B::Error> {
    app.update();
    terminal.draw(|frame| ui::render(frame, app))?;
    Ok(())
}

/// A failed restore is logged; an error from the loop itself takes precedence.
fn finish_run(result: Result<(), QuizError>, restored: io::Result<()>) -> Result<(), QuizError> {
    match restored {
        Ok(()) => result,
        Err(e) => {
            warn!(error = %e, "failed to restore terminal");
            result.and(Err(e.into()))
        }
    }
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    let phase = app.session().map(Session::phase);
    match phase {
        None => handle_selector_input(app, key.code),
        Some(Phase::Loading) => false,
        Some(Phase::Active) => handle_question_input(app, key.code),
        Some(Phase::Empty | Phase::TimedOut | Phase::Summary) => handle_final_input(app, key.code),
    }
}

fn handle_selector_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_category();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_category();
            false
        }
        KeyCode::Char(c @ '1'..='9') => {
            app.select_category(digit_index(c));
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.enter_category();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_question_input(app: &mut App, key: KeyCode) -> bool {
    let Some(session) = app.session_mut() else {
        return false;
    };

    match key {
        KeyCode::Char(c @ '1'..='9') => session.select_option(digit_index(c)),
        KeyCode::Up | KeyCode::Char('k') => step_selection(session, false),
        KeyCode::Down | KeyCode::Char('j') => step_selection(session, true),
        KeyCode::Enter | KeyCode::Char('c') => {
            if session.can_check() {
                session.check_answer();
            }
        }
        KeyCode::Char('h') | KeyCode::Char('H') => session.reveal_hint(),
        KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Right => session.advance(),
        KeyCode::Esc | KeyCode::Char('x') => session.request_exit(),
        _ => {}
    }
    false
}

fn handle_final_input(app: &mut App, key: KeyCode) -> bool {
    if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')) {
        app.exit_to_selector();
    }
    false
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map(|d| d as usize).unwrap_or(1).saturating_sub(1)
}

/// Move the option cursor, wrapping at either end.
fn step_selection(session: &mut Session, forward: bool) {
    let Some(count) = session.current_question().map(|q| q.options().len()) else {
        return;
    };
    if count == 0 {
        return;
    }

    let next = match (session.selected_option(), forward) {
        (None, true) => 0,
        (None, false) => count - 1,
        (Some(current), true) => (current + 1) % count,
        (Some(current), false) => (current + count - 1) % count,
    };
    session.select_option(next);
}
