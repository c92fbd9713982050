//! Quiz session state machine.
//!
//! A session runs through a shuffled copy of one category's questions under a
//! countdown. Every operation is a no-op outside the phase it applies to.

use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::data::QuizBank;
use crate::models::{Question, QuestionKind};

use super::countdown::Countdown;

pub const DEFAULT_TIME_LIMIT_SECS: u32 = 300;

/// Remaining time at or below which the clock is shown as a warning.
pub const LOW_TIME_SECS: u32 = 60;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The bank has not been consulted yet.
    Loading,
    /// A question is showing and the countdown runs.
    Active,
    /// The category has no questions.
    Empty,
    /// The countdown reached zero.
    TimedOut,
    /// The user left the questions for the score screen.
    Summary,
}

impl Phase {
    /// Both end states share the score screen.
    pub fn is_final(self) -> bool {
        matches!(self, Self::TimedOut | Self::Summary)
    }
}

/// Qualitative result shown on the score screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// 80% or more.
    Top,
    /// 60% or more.
    Middle,
    Encouragement,
}

impl ScoreBand {
    pub fn for_score(score: usize, total: usize) -> Self {
        if total == 0 {
            Self::Encouragement
        } else if score * 100 >= total * 80 {
            Self::Top
        } else if score * 100 >= total * 60 {
            Self::Middle
        } else {
            Self::Encouragement
        }
    }
}

pub struct Session<R = StdRng> {
    category: String,
    phase: Phase,
    rng: R,
    time_limit: u32,
    active_set: Vec<Question>,
    position: usize,
    remaining_secs: u32,
    time_expired: bool,
    selected_option: Option<usize>,
    answer_revealed: bool,
    hint_revealed: bool,
    score: usize,
    graded_ids: HashSet<u32>,
    session_ended: bool,
    countdown: Option<Countdown>,
}

impl<R: Rng> Session<R> {
    /// A session for `category` waiting in [`Phase::Loading`]. The clock always
    /// starts with at least one second on it.
    pub fn new(category: impl Into<String>, time_limit: u32, rng: R) -> Self {
        let time_limit = time_limit.max(1);
        Self {
            category: category.into(),
            phase: Phase::Loading,
            rng,
            time_limit,
            active_set: Vec::new(),
            position: 0,
            remaining_secs: time_limit,
            time_expired: false,
            selected_option: None,
            answer_revealed: false,
            hint_revealed: false,
            score: 0,
            graded_ids: HashSet::new(),
            session_ended: false,
            countdown: None,
        }
    }

    /// Create a session and immediately load it from `bank`.
    pub fn initialize(category: impl Into<String>, bank: &QuizBank, time_limit: u32, rng: R) -> Self {
        let mut session = Self::new(category, time_limit, rng);
        session.load(bank);
        session
    }

    /// Take a fresh shuffled copy of the category's questions and reset all
    /// progress. Leaves the session `Active`, or `Empty` if there is nothing to ask.
    pub fn load(&mut self, bank: &QuizBank) {
        self.release_timer();

        let mut questions = bank.questions(&self.category).to_vec();
        questions.shuffle(&mut self.rng);

        self.active_set = questions;
        self.position = 0;
        self.remaining_secs = self.time_limit;
        self.time_expired = false;
        self.score = 0;
        self.graded_ids.clear();
        self.session_ended = false;
        self.clear_question_state();

        self.phase = if self.active_set.is_empty() {
            Phase::Empty
        } else {
            Phase::Active
        };

        info!(
            category = %self.category,
            questions = self.active_set.len(),
            phase = ?self.phase,
            "session loaded"
        );
    }

    /// Start the countdown if the session is active and none is running.
    /// Must be called from within a tokio runtime.
    pub fn arm_timer(&mut self) {
        if self.phase == Phase::Active && self.countdown.is_none() {
            self.countdown = Some(Countdown::start());
            debug!(category = %self.category, "countdown armed");
        }
    }

    /// Apply every second the countdown has reported since the last poll.
    pub fn poll_timer(&mut self) {
        let elapsed = self
            .countdown
            .as_mut()
            .map(Countdown::take_elapsed)
            .unwrap_or(0);

        for _ in 0..elapsed {
            self.tick();
        }
    }

    pub fn is_timer_armed(&self) -> bool {
        self.countdown.is_some()
    }

    /// One elapsed second.
    pub fn tick(&mut self) {
        if self.phase != Phase::Active || self.remaining_secs == 0 {
            return;
        }

        self.remaining_secs -= 1;
        if self.remaining_secs == 0 {
            self.time_expired = true;
            self.session_ended = true;
            self.phase = Phase::TimedOut;
            self.release_timer();
            info!(category = %self.category, score = self.score, "time expired");
        }
    }

    pub fn select_option(&mut self, index: usize) {
        if self.phase != Phase::Active || self.answer_revealed {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };
        if question.is_multiple_choice() && index < question.options().len() {
            self.selected_option = Some(index);
        }
    }

    pub fn reveal_hint(&mut self) {
        if self.phase == Phase::Active && self.current_question().is_some_and(|q| q.hint.is_some()) {
            self.hint_revealed = true;
        }
    }

    /// Show the expected answer and, the first time a multiple-choice question
    /// is checked in this session, grade the current selection.
    pub fn check_answer(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        let Some(question) = self.active_set.get(self.position) else {
            return;
        };
        self.answer_revealed = true;

        if !question.is_multiple_choice() || self.graded_ids.contains(&question.id) {
            return;
        }

        let correct = match (self.selected_option, &question.correct_answer) {
            (Some(selected), Some(answer)) => answer.matches_option(selected),
            _ => false,
        };
        if correct {
            self.score += 1;
        }
        self.graded_ids.insert(question.id);

        debug!(
            question = question.id,
            selected = ?self.selected_option,
            correct,
            score = self.score,
            "answer graded"
        );
    }

    /// Move to the next question; after the last one, reshuffle the set and
    /// start a new lap.
    pub fn advance(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.clear_question_state();

        if self.position + 1 < self.active_set.len() {
            self.position += 1;
        } else {
            self.active_set.shuffle(&mut self.rng);
            self.position = 0;
            debug!(category = %self.category, "lap finished, set reshuffled");
        }
    }

    /// Leave the questions for the score screen.
    pub fn request_exit(&mut self) {
        if self.phase != Phase::Active {
            return;
        }
        self.session_ended = true;
        self.phase = Phase::Summary;
        self.release_timer();
        info!(category = %self.category, score = self.score, "session ended by user");
    }

    /// Whether the session may hand control back to the selector.
    pub fn can_exit_to_selector(&self) -> bool {
        self.phase.is_final() || self.phase == Phase::Empty
    }

    /// Whether the check-answer control is enabled for the current question.
    pub fn can_check(&self) -> bool {
        if self.phase != Phase::Active || self.answer_revealed {
            return false;
        }
        match self.current_question().map(|q| &q.kind) {
            Some(QuestionKind::MultipleChoice) => self.selected_option.is_some(),
            Some(QuestionKind::FillBlank) => true,
            _ => false,
        }
    }

    fn clear_question_state(&mut self) {
        self.selected_option = None;
        self.answer_revealed = false;
        self.hint_revealed = false;
    }

    fn release_timer(&mut self) {
        self.countdown = None;
    }
}

impl<R> Session<R> {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.phase == Phase::Active {
            self.active_set.get(self.position)
        } else {
            None
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.active_set
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current_question_number(&self) -> usize {
        self.position + 1
    }

    pub fn total_questions(&self) -> usize {
        self.active_set.len()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_low_on_time(&self) -> bool {
        self.remaining_secs <= LOW_TIME_SECS
    }

    pub fn time_expired(&self) -> bool {
        self.time_expired
    }

    pub fn session_ended(&self) -> bool {
        self.session_ended
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn graded_ids(&self) -> &HashSet<u32> {
        &self.graded_ids
    }

    /// Number of scoreable questions in the set.
    pub fn max_score(&self) -> usize {
        self.active_set.iter().filter(|q| q.is_multiple_choice()).count()
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.score, self.max_score())
    }
}

/// Render seconds as `mm:ss`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
