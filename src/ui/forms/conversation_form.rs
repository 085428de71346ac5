//! Conversation create form rendering

use super::field_renderer::{draw_field, draw_field_error, draw_placeholder};
use crate::app::App;
use crate::state::Field;
use crate::ui::components::{
    message_box_height, render_button, render_message_box, BUTTON_HEIGHT,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TITLE_PLACEHOLDER: &str = "Start with a title for your conversation here";
const BODY_PLACEHOLDER: &str =
    "Type and start adding content to your conversation here. Blank lines separate paragraphs.";
const TAGS_PLACEHOLDER: &str = "e.g. design, budget";
const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Draw the conversation create form with its side panel
pub fn draw_create(frame: &mut Frame, area: Rect, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(34), // Tags and submit
        ])
        .split(area);

    draw_form(frame, main_chunks[0], app);
    draw_side_panel(frame, main_chunks[1], app);
}

/// Draw title, body and the mutation error
fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let collective = app
        .state
        .collective
        .as_ref()
        .map(|c| format!("{} (@{})", c.name, c.slug))
        .unwrap_or_else(|| app.form.options().collective_id.clone());

    let block = Block::default()
        .title(format!(" New conversation in {collective} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let submit_message = app.form.submit_error().map(|err| err.user_message());
    let message_height = submit_message
        .as_deref()
        .map(|m| message_box_height(m, inner.width))
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),              // Title
            Constraint::Length(1),              // Title error
            Constraint::Min(6),                 // Body
            Constraint::Length(1),              // Body error
            Constraint::Length(message_height), // Mutation error
        ])
        .split(inner);

    let errors = &app.form.state().errors;
    let active = app.compose.active_form_field();

    if app.form.options().loading {
        draw_placeholder(frame, chunks[0], &app.compose.title.label);
        draw_placeholder(frame, chunks[2], &app.compose.body.label);
    } else {
        draw_field(
            frame,
            chunks[0],
            &app.compose.title,
            active == Some(Field::Title),
            errors.get(&Field::Title).copied(),
            TITLE_PLACEHOLDER,
        );
        draw_field(
            frame,
            chunks[2],
            &app.compose.body,
            active == Some(Field::Body),
            errors.get(&Field::Body).copied(),
            BODY_PLACEHOLDER,
        );
    }

    draw_field_error(frame, chunks[1], errors.get(&Field::Title).copied());
    draw_field_error(frame, chunks[3], errors.get(&Field::Body).copied());

    if let Some(message) = submit_message {
        render_message_box(frame, chunks[4], Color::Red, &message);
    }
}

/// Draw tags, suggested tags, submit button and help
fn draw_side_panel(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tags
            Constraint::Min(3),                // Suggested tags
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(4),             // Help
        ])
        .split(area);

    let options = app.form.options();

    if options.loading {
        draw_placeholder(frame, chunks[0], &app.compose.tags.label);
    } else {
        draw_field(
            frame,
            chunks[0],
            &app.compose.tags,
            app.compose.active_form_field() == Some(Field::Tags),
            None,
            TAGS_PLACEHOLDER,
        );
    }

    let suggestions: Vec<Line> = if options.suggested_tags.is_empty() {
        vec![Line::from(Span::styled(
            "No suggestions",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        options
            .suggested_tags
            .iter()
            .take(9)
            .enumerate()
            .map(|(i, tag)| {
                Line::from(vec![
                    Span::styled(format!("Alt+{} ", i + 1), Style::default().fg(Color::Cyan)),
                    Span::raw(tag.as_str()),
                ])
            })
            .collect()
    };
    let suggestions = Paragraph::new(suggestions)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Suggested tags ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(suggestions, chunks[1]);

    let label = if app.form.is_submitting() {
        "Submitting…"
    } else {
        "Submit conversation"
    };
    render_button(
        frame,
        chunks[2],
        label,
        app.compose.is_submit_row_active(),
        app.form.can_submit() && !app.form.is_submitting(),
        Some(Color::Green),
    );

    let key_style = Style::default().fg(Color::Cyan);
    let help = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Tab", key_style),
            Span::raw(": next field"),
        ]),
        Line::from(vec![
            Span::styled(SUBMIT_SHORTCUT, key_style),
            Span::raw(": submit"),
        ]),
        Line::from(vec![
            Span::styled("Esc", key_style),
            Span::raw(": discard and quit"),
        ]),
    ])
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
