//! Created conversation view

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the conversation returned by the last successful submission
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Details
            Constraint::Length(2), // Help text
        ])
        .margin(1)
        .split(area);

    let block = Block::default()
        .title(" Conversation created ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(block, area);

    let Some(record) = app.state.last_created.as_ref() else {
        let empty = Paragraph::new("No conversation created yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, chunks[0]);
        return;
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let tags = if record.tags.is_empty() {
        "(none)".to_string()
    } else {
        record.tags.join(", ")
    };

    let lines = vec![
        Line::from(Span::styled(
            record.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Slug:    ", label_style), Span::raw(record.slug.as_str())]),
        Line::from(vec![Span::styled("Id:      ", label_style), Span::raw(record.id.as_str())]),
        Line::from(vec![Span::styled("Tags:    ", label_style), Span::raw(tags)]),
        Line::from(vec![
            Span::styled("Created: ", label_style),
            Span::raw(record.created_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]),
        Line::from(""),
        Line::from(record.summary.as_str()),
    ];

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[0],
    );

    let key_style = Style::default().fg(Color::Cyan);
    let help = Paragraph::new(Line::from(vec![
        Span::styled("n", key_style),
        Span::raw(": new conversation  "),
        Span::styled("y", key_style),
        Span::raw(": copy slug  "),
        Span::styled("q", key_style),
        Span::raw(": quit"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[1]);
}
