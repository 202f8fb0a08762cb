//! Messaging HTTP Handlers
//!
//! Two-party conversations between any two accounts. Only participants may
//! read or post to a conversation.

use std::collections::HashMap;

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::db::{self, ConversationEntry};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path, Query};
use crate::backend::middleware::AuthUser;
use crate::shared::messaging::{
    participant_pair, ChatMessage, Conversation, ConversationSummary, CreateConversationRequest,
    ListMessagesParams, SendMessageRequest,
};
use crate::shared::validation::required;
use crate::shared::UserSummary;

/// Load a conversation the user takes part in
async fn participant_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
    user_id: Uuid,
    denied: &str,
) -> Result<Conversation, BackendError> {
    let conversation = db::get_conversation(pool, conversation_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Conversation not found"))?;

    if !conversation.has_participant(user_id) {
        tracing::warn!("User {} is not in conversation {}", user_id, conversation_id);
        return Err(BackendError::forbidden(denied));
    }
    Ok(conversation)
}

/// Assemble listed conversations from their loaded parts
pub fn build_summaries(
    user_id: Uuid,
    entries: Vec<ConversationEntry>,
    messages: Vec<ChatMessage>,
    users: Vec<UserSummary>,
) -> Vec<ConversationSummary> {
    let mut messages: HashMap<Uuid, ChatMessage> =
        messages.into_iter().map(|m| (m.id, m)).collect();
    let users: HashMap<Uuid, UserSummary> = users.into_iter().map(|u| (u.id, u)).collect();

    entries
        .into_iter()
        .map(|entry| {
            let conversation = entry.conversation;
            let other_participant = conversation
                .other_participant(user_id)
                .and_then(|id| users.get(&id).cloned());
            let last_message = conversation
                .last_message_id
                .and_then(|id| messages.remove(&id));

            ConversationSummary {
                id: conversation.id,
                participants: conversation.participants(),
                other_participant,
                last_message,
                unread_count: entry.unread_count,
                created_at: conversation.created_at,
                updated_at: conversation.updated_at,
            }
        })
        .collect()
}

/// Open a conversation with another user
///
/// Returns the existing conversation (200) or a new one (201).
pub async fn create_conversation(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>), BackendError> {
    let participant_id = request
        .participant_id
        .ok_or_else(|| BackendError::bad_request("participant_id is required"))?;
    let (low, high) = participant_pair(auth.user_id, participant_id)
        .ok_or_else(|| BackendError::bad_request("Cannot start a conversation with yourself"))?;

    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    if get_user_by_id(pool, participant_id).await?.is_none() {
        return Err(BackendError::not_found("User not found"));
    }

    let (conversation, created) = db::create_conversation(pool, low, high).await?;

    if created {
        tracing::info!(
            "Conversation {} opened between {} and {}",
            conversation.id,
            auth.user_id,
            participant_id
        );
        Ok((StatusCode::CREATED, Json(conversation)))
    } else {
        Ok((StatusCode::OK, Json(conversation)))
    }
}

/// The caller's conversations, most recent activity first
pub async fn get_conversations(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Vec<ConversationSummary>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let entries = db::get_conversations_for_user(pool, auth.user_id).await?;

    let message_ids: Vec<Uuid> = entries
        .iter()
        .filter_map(|e| e.conversation.last_message_id)
        .collect();
    let other_ids: Vec<Uuid> = entries
        .iter()
        .filter_map(|e| e.conversation.other_participant(auth.user_id))
        .collect();

    let messages = db::get_messages_by_id(pool, &message_ids).await?;
    let users = db::get_user_summaries(pool, &other_ids).await?;

    Ok(Json(build_summaries(auth.user_id, entries, messages, users)))
}

/// Messages of a conversation, newest first; marks them read for the caller
pub async fn get_messages(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(conversation_id): Path<Uuid>,
    Query(params): Query<ListMessagesParams>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    participant_conversation(
        pool,
        conversation_id,
        auth.user_id,
        "Not authorized to view this conversation",
    )
    .await?;

    let messages = db::get_messages_for_conversation(pool, conversation_id, params.limit()).await?;
    db::mark_conversation_read(pool, conversation_id, auth.user_id).await?;

    Ok(Json(messages))
}

/// Send a message to a conversation
pub async fn send_message(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Json(request): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<ChatMessage>), BackendError> {
    let conversation_id = request
        .conversation_id
        .ok_or_else(|| BackendError::bad_request("conversation_id is required"))?;
    let content = required(
        request.content.as_deref(),
        "content",
        "Message content is required",
    )?
    .to_string();
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    participant_conversation(
        pool,
        conversation_id,
        auth.user_id,
        "Not authorized to send message in this conversation",
    )
    .await?;

    let message = ChatMessage::new(
        conversation_id,
        auth.user_id,
        content,
        request.attachments,
    );
    db::store_message(pool, &message).await?;

    tracing::info!(
        "User {} sent message {} to conversation {}",
        auth.user_id,
        message.id,
        message.conversation_id
    );

    Ok((StatusCode::CREATED, Json(message)))
}

/// Total unread messages of the caller
pub async fn get_unread_count(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<Value>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let unread = db::total_unread(pool, auth.user_id).await?;
    Ok(Json(json!({ "unread_count": unread })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(id: Uuid, name: &str) -> UserSummary {
        UserSummary {
            id,
            username: Some(name.to_string()),
            display_name: None,
            first_name: None,
            last_name: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_build_summaries_attaches_other_user_and_last_message() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (low, high) = participant_pair(me, other).unwrap();
        let conversation_id = Uuid::new_v4();
        let message = ChatMessage::new(conversation_id, other, "hello".into(), vec![]);

        let entry = ConversationEntry {
            conversation: Conversation {
                id: conversation_id,
                participant_low: low,
                participant_high: high,
                last_message_id: Some(message.id),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            unread_count: 3,
        };

        let summaries = build_summaries(me, vec![entry], vec![message.clone()], vec![summary(other, "bob")]);

        assert_eq!(summaries.len(), 1);
        let listed = &summaries[0];
        assert_eq!(listed.unread_count, 3);
        assert_eq!(listed.last_message.as_ref(), Some(&message));
        assert_eq!(
            listed.other_participant.as_ref().and_then(|u| u.username.as_deref()),
            Some("bob")
        );
    }

    #[test]
    fn test_build_summaries_without_messages() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (low, high) = participant_pair(me, other).unwrap();
        let entry = ConversationEntry {
            conversation: Conversation {
                id: Uuid::new_v4(),
                participant_low: low,
                participant_high: high,
                last_message_id: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            unread_count: 0,
        };

        let summaries = build_summaries(me, vec![entry], vec![], vec![]);
        assert!(summaries[0].last_message.is_none());
        assert!(summaries[0].other_participant.is_none());
    }
}
