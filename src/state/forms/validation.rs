//! Validation pass for the conversation form

use super::conversation_form::ConversationFormState;
use std::collections::BTreeMap;
use std::fmt;

/// Minimum title length, inclusive
pub const TITLE_MIN_LENGTH: usize = 3;
/// Maximum title length, inclusive
pub const TITLE_MAX_LENGTH: usize = 255;

/// Fields of the conversation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Body,
    Tags,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::Tags => "tags",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Required,
    MinLength,
    MaxLength,
}

impl ErrorKind {
    /// Message displayed under the offending input
    pub fn message(&self) -> String {
        match self {
            Self::Required => "This field is required".to_string(),
            Self::MinLength => format!("Must be at least {TITLE_MIN_LENGTH} characters"),
            Self::MaxLength => format!("Must be at most {TITLE_MAX_LENGTH} characters"),
        }
    }
}

/// Complete error set of one validation pass. Only failing fields are present.
pub type FieldErrors = BTreeMap<Field, ErrorKind>;

/// Compute the full error set for the current field values.
///
/// Pure and deterministic: the same state always yields the same errors and the
/// state is never touched. Each field gets at most one error, first matching rule wins.
pub fn validate(state: &ConversationFormState) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if let Some(kind) = validate_title(&state.title) {
        errors.insert(Field::Title, kind);
    }

    if state.body.is_empty() {
        errors.insert(Field::Body, ErrorKind::Required);
    }

    errors
}

fn validate_title(title: &str) -> Option<ErrorKind> {
    let length = title.chars().count();
    if length == 0 {
        Some(ErrorKind::Required)
    } else if length < TITLE_MIN_LENGTH {
        Some(ErrorKind::MinLength)
    } else if length > TITLE_MAX_LENGTH {
        Some(ErrorKind::MaxLength)
    } else {
        None
    }
}
