use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{Question, QuestionKind};
use crate::session::{format_time, Session};

pub fn render(frame: &mut Frame, area: Rect, session: &Session) {
    let Some(question) = session.current_question() else {
        return;
    };

    let mut constraints = vec![Constraint::Length(1), Constraint::Length(3)];
    if question.body.is_some() {
        constraints.push(Constraint::Min(5));
    }
    constraints.extend([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ]);
    let chunks = Layout::vertical(constraints).margin(1).split(area);

    render_header(frame, chunks[0], session);
    render_prompt(frame, chunks[1], question, session.current_question_number());

    let mut next = 2;
    if let Some(body) = &question.body {
        render_body(frame, chunks[next], body);
        next += 1;
    }

    render_answer_area(frame, chunks[next], question, session);
    render_hint(frame, chunks[next + 1], question, session.hint_revealed());
    render_controls(frame, chunks[next + 2], question, session);
}

fn render_header(frame: &mut Frame, area: Rect, session: &Session) {
    let clock_style = if session.is_low_on_time() {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Green)
    };

    let [clock_area, progress_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let clock = Paragraph::new(Line::from(vec![
        Span::styled("⏱ ", Style::default().fg(Color::DarkGray)),
        Span::styled(format_time(session.remaining_secs()), clock_style),
    ]));
    frame.render_widget(clock, clock_area);

    let progress = Paragraph::new(format!(
        "Question {} of {}",
        session.current_question_number(),
        session.total_questions()
    ))
    .alignment(Alignment::Right)
    .fg(Color::DarkGray);
    frame.render_widget(progress, progress_area);
}

fn render_prompt(frame: &mut Frame, area: Rect, question: &Question, number: usize) {
    let content = Line::from(vec![
        Span::styled(format!("{}. ", number), Style::default().fg(Color::Cyan).bold()),
        Span::styled(question.prompt.as_str(), Style::default().fg(Color::White).bold()),
    ]);
    let widget = Paragraph::new(content).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_body(frame: &mut Frame, area: Rect, body: &str) {
    let lines: Vec<Line> = body
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(Color::Yellow))))
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_answer_area(frame: &mut Frame, area: Rect, question: &Question, session: &Session) {
    match question.kind {
        QuestionKind::MultipleChoice => render_options(frame, area, question, session),
        QuestionKind::FillBlank if session.answer_revealed() => {
            let answer = question.answer_text().unwrap_or_default();
            let widget = Paragraph::new(Line::from(vec![
                Span::styled(" Answer: ", Style::default().fg(Color::DarkGray)),
                Span::styled(answer, Style::default().fg(Color::Green).bold()),
            ]))
            .wrap(Wrap { trim: true });
            frame.render_widget(widget, area);
        }
        QuestionKind::FillBlank => {
            let widget = Paragraph::new(" Think of your answer, then press enter to check it.")
                .fg(Color::DarkGray);
            frame.render_widget(widget, area);
        }
        QuestionKind::Other(_) => {}
    }
}

/// How an option is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionMark {
    Plain,
    Selected,
    Correct,
    Incorrect,
}

fn option_mark(question: &Question, index: usize, selected: Option<usize>, revealed: bool) -> OptionMark {
    let is_selected = selected == Some(index);
    if revealed {
        if question.is_correct_option(index) {
            OptionMark::Correct
        } else if is_selected {
            OptionMark::Incorrect
        } else {
            OptionMark::Plain
        }
    } else if is_selected {
        OptionMark::Selected
    } else {
        OptionMark::Plain
    }
}

fn render_options(frame: &mut Frame, area: Rect, question: &Question, session: &Session) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options().len() * 2);

    for (index, option) in question.options().iter().enumerate() {
        let mark = option_mark(question, index, session.selected_option(), session.answer_revealed());
        let (marker, style) = match mark {
            OptionMark::Plain => (" ", Style::default().fg(Color::Gray)),
            OptionMark::Selected => (">", Style::default().fg(Color::Cyan).bold()),
            OptionMark::Correct => ("✓", Style::default().fg(Color::Green).bold()),
            OptionMark::Incorrect => ("✗", Style::default().fg(Color::Red).bold()),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", index + 1), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_hint(frame: &mut Frame, area: Rect, question: &Question, revealed: bool) {
    let Some(hint) = &question.hint else {
        return;
    };

    let line = if revealed {
        Line::from(vec![
            Span::styled(" 💡 Hint: ", Style::default().fg(Color::Yellow).bold()),
            Span::styled(hint.as_str(), Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(" 💡 press h for a hint".fg(Color::DarkGray))
    };

    let widget = Paragraph::new(line).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, question: &Question, session: &Session) {
    let enabled = Style::default().fg(Color::Gray);
    let disabled = Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM);
    let separator = Span::styled("  ·  ", Style::default().fg(Color::DarkGray));

    let mut spans = vec![Span::styled("esc finish", enabled), separator.clone()];
    if question.is_multiple_choice() {
        spans.extend([Span::styled("1-9 choose", enabled), separator.clone()]);
    }
    if matches!(question.kind, QuestionKind::MultipleChoice | QuestionKind::FillBlank) {
        let style = if session.can_check() { enabled } else { disabled };
        spans.extend([Span::styled("enter check", style), separator.clone()]);
    }
    spans.push(Span::styled("n next →", enabled));

    let widget = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::data::QuizBank;
    use crate::models::CorrectAnswer;
    use crate::ui::test_support::render_to_string;

    fn question() -> Question {
        Question {
            id: 1,
            prompt: "Which word is a noun?".into(),
            kind: QuestionKind::MultipleChoice,
            body: Some("Read carefully:\n  run, dog, blue".into()),
            options: Some(vec!["run".into(), "dog".into(), "blue".into()]),
            correct_answer: Some(CorrectAnswer::Index(1)),
            hint: Some("It can bark.".into()),
        }
    }

    fn session(time_limit: u32) -> Session {
        let mut sets = BTreeMap::new();
        sets.insert("A".to_string(), vec![question()]);
        let bank = QuizBank::from_sets(sets).unwrap();
        Session::initialize("A", &bank, time_limit, StdRng::seed_from_u64(0))
    }

    fn screen(session: &Session) -> String {
        render_to_string(80, 30, |frame| {
            let area = frame.area();
            render(frame, area, session)
        })
    }

    #[test]
    fn test_option_marks() {
        let question = question();
        assert_eq!(option_mark(&question, 0, Some(0), false), OptionMark::Selected);
        assert_eq!(option_mark(&question, 1, Some(0), false), OptionMark::Plain);
        assert_eq!(option_mark(&question, 0, Some(0), true), OptionMark::Incorrect);
        assert_eq!(option_mark(&question, 1, Some(0), true), OptionMark::Correct);
        assert_eq!(option_mark(&question, 2, Some(0), true), OptionMark::Plain);
    }

    #[test]
    fn test_active_screen_shows_question() {
        let session = session(300);
        let screen = screen(&session);

        assert!(screen.contains("05:00"));
        assert!(screen.contains("Question 1 of 1"));
        assert!(screen.contains("Which word is a noun?"));
        assert!(screen.contains("  run, dog, blue"));
        assert!(screen.contains("2. dog"));
        assert!(screen.contains("press h for a hint"));
        assert!(!screen.contains("It can bark."));
    }

    #[test]
    fn test_hint_and_reveal() {
        let mut session = session(300);
        session.reveal_hint();
        session.select_option(0);
        session.check_answer();

        let screen = screen(&session);
        assert!(screen.contains("It can bark."));
        assert!(screen.contains("✗ 1. run"));
        assert!(screen.contains("✓ 2. dog"));
    }

    #[test]
    fn test_low_time_clock() {
        let session = session(60);
        let mut terminal = ratatui::Terminal::new(ratatui::backend::TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render(frame, area, &session)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let clock_cell = buffer
            .content()
            .chunks(80)
            .nth(1)
            .and_then(|row| row.iter().find(|cell| cell.symbol() == "0"))
            .unwrap();
        assert_eq!(clock_cell.fg, Color::Red);
    }
}
