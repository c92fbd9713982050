use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::data::QuizBank;
use crate::models::{Category, CATEGORIES};
use crate::session::{Phase, Session, DEFAULT_TIME_LIMIT_SECS};

/// Runtime settings for an [`App`].
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    /// Countdown length of every session, in seconds.
    pub time_limit: u32,
    /// Seed for reproducible shuffles; the OS seeds the generator when unset.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT_SECS,
            seed: None,
        }
    }
}

/// What the user is looking at.
pub enum Screen {
    Selector,
    Session(Session),
}

pub struct App {
    pub screen: Screen,
    bank: QuizBank,
    time_limit: u32,
    rng: StdRng,
    selected_category: usize,
}

impl App {
    pub fn new(bank: QuizBank, config: AppConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            screen: Screen::Selector,
            bank,
            time_limit: config.time_limit,
            rng,
            selected_category: 0,
        }
    }

    pub fn categories(&self) -> &'static [Category] {
        &CATEGORIES
    }

    pub fn selected_category(&self) -> usize {
        self.selected_category
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Session(session) => Some(session),
            Screen::Selector => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.screen {
            Screen::Session(session) => Some(session),
            Screen::Selector => None,
        }
    }

    pub fn select_next_category(&mut self) {
        self.selected_category = (self.selected_category + 1) % CATEGORIES.len();
    }

    pub fn select_previous_category(&mut self) {
        self.selected_category = (self.selected_category + CATEGORIES.len() - 1) % CATEGORIES.len();
    }

    /// Jump to a menu entry by position; out of range positions are ignored.
    pub fn select_category(&mut self, index: usize) {
        if index < CATEGORIES.len() {
            self.selected_category = index;
        }
    }

    /// Hand the highlighted category to a new session. The session starts in
    /// [`Phase::Loading`] and is filled on the next [`App::update`].
    pub fn enter_category(&mut self) {
        let category = CATEGORIES[self.selected_category];
        let rng = StdRng::from_rng(&mut self.rng);

        info!(category = category.id, "category selected");
        self.screen = Screen::Session(Session::new(category.id, self.time_limit, rng));
    }

    /// Advance background work: finish loading, keep the countdown armed while
    /// a question is showing and apply elapsed seconds.
    pub fn update(&mut self) {
        let Screen::Session(session) = &mut self.screen else {
            return;
        };

        if session.phase() == Phase::Loading {
            session.load(&self.bank);
        }
        session.arm_timer();
        session.poll_timer();
    }

    /// Drop the session and go back to the menu. Only allowed from the score
    /// screen or an empty category.
    pub fn exit_to_selector(&mut self) {
        if self.session().is_some_and(Session::can_exit_to_selector) {
            info!("returning to selector");
            self.screen = Screen::Selector;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{CorrectAnswer, Question, QuestionKind};

    fn bank() -> QuizBank {
        let questions = (1..=3)
            .map(|id| Question {
                id,
                prompt: format!("Question {}", id),
                kind: QuestionKind::MultipleChoice,
                body: None,
                options: Some(vec!["yes".into(), "no".into()]),
                correct_answer: Some(CorrectAnswer::Index(0)),
                hint: None,
            })
            .collect();

        let mut sets = BTreeMap::new();
        sets.insert("A".to_string(), questions);
        QuizBank::from_sets(sets).unwrap()
    }

    fn app() -> App {
        App::new(
            bank(),
            AppConfig {
                time_limit: 30,
                seed: Some(7),
            },
        )
    }

    #[test]
    fn test_category_navigation_wraps() {
        let mut app = app();
        app.select_previous_category();
        assert_eq!(app.selected_category(), CATEGORIES.len() - 1);
        app.select_next_category();
        assert_eq!(app.selected_category(), 0);

        app.select_category(3);
        assert_eq!(app.selected_category(), 3);
        app.select_category(42);
        assert_eq!(app.selected_category(), 3);
    }

    #[tokio::test]
    async fn test_enter_load_and_exit() {
        let mut app = app();
        app.enter_category();
        assert_eq!(app.session().map(Session::phase), Some(Phase::Loading));

        app.update();
        let session = app.session().unwrap();
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.total_questions(), 3);
        assert!(session.is_timer_armed());

        // Exiting straight from an active session is not allowed.
        app.exit_to_selector();
        assert!(app.session().is_some());

        app.session_mut().unwrap().request_exit();
        app.exit_to_selector();
        assert!(matches!(app.screen, Screen::Selector));
    }

    #[tokio::test]
    async fn test_reentry_starts_fresh() {
        let mut app = app();
        app.enter_category();
        app.update();
        {
            let session = app.session_mut().unwrap();
            session.select_option(0);
            session.check_answer();
            session.request_exit();
            assert_eq!(session.score(), 1);
        }
        app.exit_to_selector();

        app.enter_category();
        app.update();
        let session = app.session().unwrap();
        assert_eq!(session.score(), 0);
        assert!(session.graded_ids().is_empty());
        assert_eq!(session.remaining_secs(), 30);
    }

    #[tokio::test]
    async fn test_missing_category_can_exit() {
        let mut app = app();
        app.select_category(5);
        app.enter_category();
        app.update();

        let session = app.session().unwrap();
        assert_eq!(session.phase(), Phase::Empty);
        assert!(!session.is_timer_armed());

        app.exit_to_selector();
        assert!(matches!(app.screen, Screen::Selector));
    }
}
