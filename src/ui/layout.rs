//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::{Connection, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into content and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    let conn_status = match app.state.connection {
        Connection::Connected => Span::styled(" ● ", Style::default().fg(Color::Green)),
        Connection::Unreachable => Span::styled(" ○ ", Style::default().fg(Color::Red)),
        Connection::Unknown => Span::styled(" ◌ ", Style::default().fg(Color::Yellow)),
    };
    spans.push(conn_status);

    spans.push(Span::styled(
        app.state.current_view.title(),
        Style::default().fg(Color::White),
    ));

    if app.form.is_submitting() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Submitting…",
            Style::default().fg(Color::Yellow),
        ));
    } else if app.form.options().loading {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Yellow)));
    } else if app.form.options().disabled && app.state.current_view == View::CreateConversation {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            "Submission disabled (Ctrl+R to reload)",
            Style::default().fg(Color::Red),
        ));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}
