//! Input buffers and focus handling for the compose view

use super::conversation_form::{parse_tags, FieldChange};
use super::field::FormField;
use super::validation::{Field, TITLE_MAX_LENGTH};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
}

/// Index of the submit button row
const SUBMIT_ROW: usize = 3;

/// Editing buffers of the title input, body editor and tag input.
///
/// Each edit yields the [`FieldChange`] that the form session must receive,
/// the same way a widget reports its new value through a change callback.
#[derive(Debug, Clone)]
pub struct ComposeForm {
    pub title: FormField,
    pub body: FormField,
    pub tags: FormField,
    pub active_field_index: usize,
}

impl ComposeForm {
    pub fn new() -> Self {
        Self {
            title: FormField::text("Title", false).with_max_length(TITLE_MAX_LENGTH),
            body: FormField::text("Body", true),
            tags: FormField::text("Tags (comma separated)", false),
            active_field_index: 0,
        }
    }

    /// Returns true if the submit button is currently focused
    pub fn is_submit_row_active(&self) -> bool {
        self.active_field_index == SUBMIT_ROW
    }

    /// Which form field has focus, if any
    pub fn active_form_field(&self) -> Option<Field> {
        field_at(self.active_field_index)
    }

    /// Move focus to the input of `field`
    pub fn focus(&mut self, field: Field) {
        self.active_field_index = match field {
            Field::Title => 0,
            Field::Body => 1,
            Field::Tags => 2,
        };
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char) -> Option<FieldChange> {
        let field = self.active_form_field()?;
        let input = self.get_active_field_mut()?;
        if !input.push_char(c) {
            return None;
        }
        Some(self.change_for(field))
    }

    /// Delete the last character of the focused input
    pub fn backspace(&mut self) -> Option<FieldChange> {
        let field = self.active_form_field()?;
        let input = self.get_active_field_mut()?;
        if !input.pop_char() {
            return None;
        }
        Some(self.change_for(field))
    }

    /// Append a suggested tag unless it is already listed
    pub fn add_tag(&mut self, tag: &str) -> Option<FieldChange> {
        let mut tags = parse_tags(self.tags.as_text());
        if tags.iter().any(|existing| existing == tag) {
            return None;
        }
        tags.push(tag.to_string());
        self.tags.set_text(tags.join(", "));
        Some(self.change_for(Field::Tags))
    }

    /// The value the form session should hold for `field`
    fn change_for(&self, field: Field) -> FieldChange {
        match field {
            Field::Title => FieldChange::Title(self.title.as_text().to_string()),
            Field::Body => FieldChange::Body(body_html(self.body.as_text())),
            Field::Tags => FieldChange::Tags(parse_tags(self.tags.as_text())),
        }
    }
}

impl Default for ComposeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for ComposeForm {
    fn field_count(&self) -> usize {
        4 // title, body, tags, submit
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(SUBMIT_ROW);
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self.active_field_index {
            0 => Some(&mut self.title),
            1 => Some(&mut self.body),
            2 => Some(&mut self.tags),
            _ => None,
        }
    }
}

fn field_at(index: usize) -> Option<Field> {
    match index {
        0 => Some(Field::Title),
        1 => Some(Field::Body),
        2 => Some(Field::Tags),
        _ => None,
    }
}

/// Render the body editor's plain text as HTML paragraphs.
/// Whitespace-only text produces an empty body.
pub fn body_html(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(|paragraph| {
            let escaped = escape_html(paragraph).replace('\n', "<br>");
            format!("<p>{escaped}</p>")
        })
        .collect()
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
