//! Client for the remote conversations service

mod client;
mod error;
mod traits;
mod types;

pub use client::ConversationClient;
pub use error::MutationError;
pub use traits::ConversationApi;
pub use types::{Collective, ConversationRecord, CreateConversationRequest};

#[cfg(test)]
pub use traits::MockConversationApi;
