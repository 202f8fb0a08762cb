//! Conversation Data Structure
//!
//! A conversation always has exactly two participants. The pair is stored
//! in a canonical (low, high) order so that the database can enforce one
//! conversation per pair of users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::ChatMessage;
use crate::shared::profile::UserSummary;

/// Canonical ordering of a participant pair
///
/// Returns `None` when both ids are the same user.
pub fn participant_pair(a: Uuid, b: Uuid) -> Option<(Uuid, Uuid)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => Some((a, b)),
        std::cmp::Ordering::Greater => Some((b, a)),
        std::cmp::Ordering::Equal => None,
    }
}

/// Stored conversation row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: Uuid,
    /// Lower participant id of the pair
    pub participant_low: Uuid,
    /// Higher participant id of the pair
    pub participant_high: Uuid,
    /// Most recent message, if any
    pub last_message_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Both participants
    pub fn participants(&self) -> [Uuid; 2] {
        [self.participant_low, self.participant_high]
    }

    /// Check if user is a participant
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participant_low == user_id || self.participant_high == user_id
    }

    /// Get the other participant
    pub fn other_participant(&self, current_user_id: Uuid) -> Option<Uuid> {
        if self.participant_low == current_user_id {
            Some(self.participant_high)
        } else if self.participant_high == current_user_id {
            Some(self.participant_low)
        } else {
            None
        }
    }
}

/// Conversation as listed for one participant
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationSummary {
    pub id: Uuid,
    pub participants: [Uuid; 2],
    /// Public profile of the other participant
    pub other_participant: Option<UserSummary>,
    pub last_message: Option<ChatMessage>,
    /// Unread messages for the requesting user
    pub unread_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to open a conversation with another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateConversationRequest {
    pub participant_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(a: Uuid, b: Uuid) -> Conversation {
        let (low, high) = participant_pair(a, b).unwrap();
        Conversation {
            id: Uuid::new_v4(),
            participant_low: low,
            participant_high: high,
            last_message_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_participant_pair_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(participant_pair(a, b), participant_pair(b, a));
        assert_eq!(participant_pair(a, a), None);
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let conv = conversation(a, b);

        assert_eq!(conv.other_participant(a), Some(b));
        assert_eq!(conv.other_participant(b), Some(a));
        assert_eq!(conv.other_participant(Uuid::new_v4()), None);
        assert!(conv.has_participant(a));
        assert!(!conv.has_participant(Uuid::new_v4()));
    }
}
