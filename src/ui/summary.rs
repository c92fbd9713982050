use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::session::{Phase, ScoreBand, Session};

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let score = session.score();
    let total = session.max_score();
    let band = session.score_band();
    let percentage = calculate_percentage(score, total);

    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    let heading = if session.phase() == Phase::TimedOut {
        "⏰ TIME'S UP!"
    } else {
        "FINISHED"
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(heading, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}%)", score, total, percentage),
            Style::default().fg(band_color(band)).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(band_message(band), Style::default().fg(Color::White))),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::TOP | Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, chunks[1]);
    render_controls(frame, chunks[3]);
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::Top => Color::Green,
        ScoreBand::Middle => Color::Yellow,
        ScoreBand::Encouragement => Color::Magenta,
    }
}

pub fn band_message(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Top => "Excellent work! You really know this.",
        ScoreBand::Middle => "Good job! A little more practice and you'll have it.",
        ScoreBand::Encouragement => "Nice try! Keep practicing and you'll get better.",
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("enter back to menu")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::QuizBank;
    use crate::models::{CorrectAnswer, Question, QuestionKind};
    use crate::ui::test_support::render_to_string;

    fn session_with_three() -> Session {
        let questions = (1..=3)
            .map(|id| Question {
                id,
                prompt: format!("Question {}", id),
                kind: QuestionKind::MultipleChoice,
                body: None,
                options: Some(vec!["a".into(), "b".into()]),
                correct_answer: Some(CorrectAnswer::Index(1)),
                hint: None,
            })
            .collect();
        let mut sets = BTreeMap::new();
        sets.insert("A".to_string(), questions);
        let bank = QuizBank::from_sets(sets).unwrap();
        Session::initialize("A", &bank, 300, StdRng::seed_from_u64(3))
    }

    fn screen(session: &Session) -> String {
        render_to_string(80, 24, |frame| {
            let area = frame.area();
            render(frame, area, session)
        })
    }

    #[test]
    fn test_perfect_lap_summary() {
        let mut session = session_with_three();
        for _ in 0..3 {
            session.select_option(1);
            session.check_answer();
            session.advance();
        }
        session.request_exit();

        let screen = screen(&session);
        assert!(screen.contains("FINISHED"));
        assert!(screen.contains("3 / 3"));
        assert!(screen.contains(band_message(ScoreBand::Top)));
    }

    #[test]
    fn test_timed_out_summary() {
        let mut session = session_with_three();
        session.select_option(1);
        session.check_answer();
        for _ in 0..300 {
            session.tick();
        }

        let screen = screen(&session);
        assert!(screen.contains("TIME'S UP!"));
        assert!(screen.contains("1 / 3"));
        assert!(screen.contains(band_message(ScoreBand::Encouragement)));
    }
}
