//! Records exchanged with the conversations service

use chrono::{DateTime, Utc};

/// Payload of the "create conversation" mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateConversationRequest {
    pub collective_id: String,
    pub title: String,
    /// Rich body as HTML
    pub html: String,
    /// Absent rather than empty when no tag was picked
    pub tags: Option<Vec<String>>,
}

/// A conversation as returned by the service once created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRecord {
    pub id: String,
    pub slug: String,
    pub title: String,
    /// Plain-text summary generated by the service from the body
    pub summary: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// The collective a conversation is created under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collective {
    pub id: String,
    pub slug: String,
    pub name: String,
    /// Tags already used by the collective's conversations
    pub suggested_tags: Vec<String>,
}
