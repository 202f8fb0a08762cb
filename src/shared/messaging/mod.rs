//! Messaging Module
//!
//! Data structures for two-party direct messaging:
//!
//! - `ChatMessage` - A message in a conversation
//! - `Conversation` - A stored conversation between two users
//! - `ConversationSummary` - A conversation as listed for one participant

pub mod message;
pub mod conversation;

pub use message::{ChatMessage, ListMessagesParams, SendMessageRequest};
pub use conversation::{
    participant_pair, Conversation, ConversationSummary, CreateConversationRequest,
};
