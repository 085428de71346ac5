//! Field rendering utilities for forms

use crate::state::{ErrorKind, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a form field. A field with a validation error gets a red border.
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<ErrorKind>,
    placeholder: &str,
) {
    let border_style = match (error, is_active) {
        (Some(_), _) => Style::default().fg(Color::Red),
        (None, true) => Style::default().fg(Color::Cyan),
        (None, false) => Style::default().fg(Color::DarkGray),
    };

    let cursor = Span::styled(
        if is_active { "▌" } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let content = if field.is_empty() {
        Paragraph::new(Line::from(vec![
            cursor,
            Span::styled(placeholder, Style::default().fg(Color::DarkGray)),
        ]))
    } else if field.is_multiline {
        let mut lines: Vec<Line> = field
            .as_text()
            .split('\n')
            .map(|l| Line::from(l.to_string()))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![Span::raw(field.as_text()), cursor]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a loading placeholder in place of an input
pub fn draw_placeholder(frame: &mut Frame, area: Rect, label: &str) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new("Loading…")
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .block(block);

    frame.render_widget(paragraph, area);
}

/// Draw the validation message of a field, if any
pub fn draw_field_error(frame: &mut Frame, area: Rect, error: Option<ErrorKind>) {
    if let Some(kind) = error {
        let paragraph = Paragraph::new(kind.message()).style(Style::default().fg(Color::Red));
        frame.render_widget(paragraph, area);
    }
}
