//! Trait abstraction for the conversations service to enable mocking in tests

use super::error::MutationError;
use super::types::{Collective, ConversationRecord, CreateConversationRequest};
use anyhow::Result;
use async_trait::async_trait;

/// Remote operations the conversation form depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Create a conversation and return the persisted record
    async fn create_conversation(
        &self,
        request: CreateConversationRequest,
    ) -> std::result::Result<ConversationRecord, MutationError>;

    /// Load the target collective and the tags it suggests
    async fn fetch_collective(&self, collective_id: &str) -> Result<Collective>;
}
