//! Form field value objects

/// A single editable text input with its label and editing limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    value: String,
    pub is_multiline: bool,
    /// Maximum number of characters accepted by the input (not a validation rule)
    pub max_length: Option<usize>,
}

impl FormField {
    /// Create a new empty text field
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value: String::new(),
            is_multiline,
            max_length: None,
        }
    }

    /// Cap the number of characters the input accepts
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the value, truncating to `max_length` characters
    pub fn set_text(&mut self, value: String) {
        self.value = match self.max_length {
            Some(max) if value.chars().count() > max => value.chars().take(max).collect(),
            _ => value,
        };
    }

    /// Push a character to the field value.
    /// Returns false when the input is full.
    pub fn push_char(&mut self, c: char) -> bool {
        if let Some(max) = self.max_length {
            if self.value.chars().count() >= max {
                return false;
            }
        }
        self.value.push(c);
        true
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) -> bool {
        self.value.pop().is_some()
    }
}
