mod quiz;
mod selector;
mod summary;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};
use crate::session::{Phase, Session};

const TITLE: &str = "QUIZ TIME";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.screen {
        Screen::Selector => selector::render(frame, area, app),
        Screen::Session(session) => render_session(frame, area, session),
    }
}

fn render_session(frame: &mut Frame, area: Rect, session: &Session) {
    match session.phase() {
        Phase::Loading => render_notice(frame, area, "Loading questions...", Color::Yellow, None),
        Phase::Active => quiz::render(frame, area, session),
        Phase::Empty => render_notice(
            frame,
            area,
            "There are no questions in this set yet.",
            Color::Yellow,
            Some("enter back to menu"),
        ),
        Phase::TimedOut | Phase::Summary => summary::render(frame, area, session),
    }
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str, color: Color, controls: Option<&str>) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(color))),
        Line::from(""),
    ];
    if let Some(controls) = controls {
        content.push(Line::from(Span::styled(controls, Style::default().fg(Color::DarkGray))));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center);
    frame.render_widget(widget, chunks[1]);
}
