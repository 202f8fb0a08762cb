//! Direct Message Data Structure
//!
//! Represents a message in a two-party conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default and maximum page size when listing messages
pub const DEFAULT_MESSAGE_PAGE: i64 = 50;
pub const MAX_MESSAGE_PAGE: i64 = 200;

/// A message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct ChatMessage {
    /// Unique message ID
    pub id: Uuid,
    /// Conversation this message belongs to
    pub conversation_id: Uuid,
    /// User who sent the message
    pub sender_id: Uuid,
    /// Message text (trimmed, never empty)
    pub content: String,
    /// URLs of attached files
    pub attachments: Vec<String>,
    /// Whether the recipient has read this message
    pub is_read: bool,
    /// When the message was sent
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new unread message
    pub fn new(conversation_id: Uuid, sender_id: Uuid, content: String, attachments: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation_id,
            sender_id,
            content,
            attachments,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// Request to send a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub conversation_id: Option<Uuid>,
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// Query parameters for listing messages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesParams {
    pub limit: Option<i64>,
}

impl ListMessagesParams {
    /// Page size clamped to `1..=MAX_MESSAGE_PAGE`
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_MESSAGE_PAGE)
            .clamp(1, MAX_MESSAGE_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_unread() {
        let msg = ChatMessage::new(Uuid::new_v4(), Uuid::new_v4(), "hi".into(), vec![]);
        assert!(!msg.is_read);
        assert!(msg.attachments.is_empty());
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(ListMessagesParams::default().limit(), 50);
        assert_eq!(ListMessagesParams { limit: Some(0) }.limit(), 1);
        assert_eq!(ListMessagesParams { limit: Some(10_000) }.limit(), MAX_MESSAGE_PAGE);
    }
}
