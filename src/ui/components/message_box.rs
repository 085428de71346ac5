//! Inline message box

use super::dialog::wrap_text;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render a bordered message inside `area`, wrapped to its width
pub fn render_message_box(frame: &mut Frame, area: Rect, color: Color, message: &str) {
    let width = area.width.saturating_sub(4).max(1) as usize;
    let lines: Vec<Line> = wrap_text(message, width).into_iter().map(Line::from).collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(paragraph, area);
}

/// Rows needed to show `message` in a box `width` columns wide
pub fn message_box_height(message: &str, width: u16) -> u16 {
    let inner = width.saturating_sub(4).max(1) as usize;
    wrap_text(message, inner).len() as u16 + 2
}
