//! Application state definitions

use crate::api::{Collective, ConversationRecord};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    CreateConversation,
    ConversationCreated,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            Self::CreateConversation => "New conversation",
            Self::ConversationCreated => "Conversation created",
        }
    }
}

/// Whether the conversations service answered the last collective lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Unknown,
    Connected,
    Unreachable,
}

/// Global application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub connection: Connection,
    /// Collective the form creates conversations under, once loaded
    pub collective: Option<Collective>,
    /// Most recently created conversation
    pub last_created: Option<ConversationRecord>,
    /// Application-level errors waiting to be shown in the error dialog
    errors: VecDeque<String>,
}

impl AppState {
    /// Queue an error for the error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}
