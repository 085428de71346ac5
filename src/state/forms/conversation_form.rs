//! Conversation form state and its transition function

use super::validation::FieldErrors;

/// Mutable record of one conversation form session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationFormState {
    pub title: String,
    /// Rich content (HTML) produced by the body editor
    pub body: String,
    /// `None` when no tag was picked. Never `Some(vec![])`.
    pub tags: Option<Vec<String>>,
    pub errors: FieldErrors,
    pub submitting: bool,
}

/// A new value for one user-editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    Title(String),
    Body(String),
    Tags(Vec<String>),
}

/// Every transition the form state can go through
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Change(FieldChange),
    /// Replace the whole error set with the result of a validation pass
    ReplaceErrors(FieldErrors),
    SetSubmitting(bool),
}

/// Apply one action, replacing exactly one field of the state
pub fn reduce(state: ConversationFormState, action: FormAction) -> ConversationFormState {
    match action {
        FormAction::Change(FieldChange::Title(title)) => ConversationFormState { title, ..state },
        FormAction::Change(FieldChange::Body(body)) => ConversationFormState { body, ..state },
        FormAction::Change(FieldChange::Tags(tags)) => ConversationFormState {
            tags: normalize_tags(tags),
            ..state
        },
        FormAction::ReplaceErrors(errors) => ConversationFormState { errors, ..state },
        FormAction::SetSubmitting(submitting) => ConversationFormState { submitting, ..state },
    }
}

/// Trim tags and drop blank ones. An empty selection becomes `None`.
pub fn normalize_tags(tags: Vec<String>) -> Option<Vec<String>> {
    let tags: Vec<String> = tags
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    if tags.is_empty() {
        None
    } else {
        Some(tags)
    }
}

/// Split the comma-separated text of the tag input into tags
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
