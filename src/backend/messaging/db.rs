//! Database operations for messaging
//!
//! Conversations, their per-participant unread counters and messages.

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::messaging::{ChatMessage, Conversation};
use crate::shared::UserSummary;

/// A conversation with the listing user's unread counter
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ConversationEntry {
    #[sqlx(flatten)]
    pub conversation: Conversation,
    pub unread_count: i32,
}

/// Get a conversation by ID
pub async fn get_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
) -> Result<Option<Conversation>, sqlx::Error> {
    sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
        .bind(conversation_id)
        .fetch_optional(pool)
        .await
}

/// Create the conversation for a canonical participant pair
///
/// Returns the conversation and whether it was created by this call. When
/// the pair already has one, it is returned unchanged.
pub async fn create_conversation(
    pool: &PgPool,
    participant_low: Uuid,
    participant_high: Uuid,
) -> Result<(Conversation, bool), sqlx::Error> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Conversation>(
        r#"
        INSERT INTO conversations (id, participant_low, participant_high)
        VALUES ($1, $2, $3)
        ON CONFLICT (participant_low, participant_high) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(participant_low)
    .bind(participant_high)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(conversation) = created else {
        tx.rollback().await?;
        let existing = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations WHERE participant_low = $1 AND participant_high = $2",
        )
        .bind(participant_low)
        .bind(participant_high)
        .fetch_one(pool)
        .await?;
        return Ok((existing, false));
    };

    sqlx::query(
        r#"
        INSERT INTO conversation_participants (conversation_id, user_id, unread_count)
        VALUES ($1, $2, 0), ($1, $3, 0)
        "#,
    )
    .bind(conversation.id)
    .bind(participant_low)
    .bind(participant_high)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok((conversation, true))
}

/// Conversations of a user, most recent activity first
pub async fn get_conversations_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ConversationEntry>, sqlx::Error> {
    sqlx::query_as::<_, ConversationEntry>(
        r#"
        SELECT c.*, cp.unread_count
        FROM conversations c
        JOIN conversation_participants cp ON cp.conversation_id = c.id
        WHERE cp.user_id = $1
        ORDER BY c.updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Messages by id
pub async fn get_messages_by_id(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>("SELECT * FROM messages WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await
}

/// Public summaries of several users
pub async fn get_user_summaries(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(
        r#"
        SELECT id, username, display_name, first_name, last_name, avatar_url
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await
}

/// Store a message
///
/// In one transaction: insert the message, point the conversation at it and
/// bump the unread counter of every participant except the sender.
pub async fn store_message(pool: &PgPool, message: &ChatMessage) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO messages (id, conversation_id, sender_id, content, attachments, is_read, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(message.id)
    .bind(message.conversation_id)
    .bind(message.sender_id)
    .bind(&message.content)
    .bind(&message.attachments)
    .bind(message.is_read)
    .bind(message.created_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("UPDATE conversations SET last_message_id = $1, updated_at = $2 WHERE id = $3")
        .bind(message.id)
        .bind(message.created_at)
        .bind(message.conversation_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        UPDATE conversation_participants
        SET unread_count = unread_count + 1
        WHERE conversation_id = $1 AND user_id <> $2
        "#,
    )
    .bind(message.conversation_id)
    .bind(message.sender_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await
}

/// Messages of a conversation, newest first
pub async fn get_messages_for_conversation(
    pool: &PgPool,
    conversation_id: Uuid,
    limit: i64,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    sqlx::query_as::<_, ChatMessage>(
        r#"
        SELECT * FROM messages
        WHERE conversation_id = $1
        ORDER BY created_at DESC
        LIMIT $2
        "#,
    )
    .bind(conversation_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Mark the other party's messages read and reset the reader's counter
pub async fn mark_conversation_read(
    pool: &PgPool,
    conversation_id: Uuid,
    reader_id: Uuid,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE messages SET is_read = TRUE
        WHERE conversation_id = $1 AND sender_id <> $2 AND NOT is_read
        "#,
    )
    .bind(conversation_id)
    .bind(reader_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE conversation_participants SET unread_count = 0 WHERE conversation_id = $1 AND user_id = $2",
    )
    .bind(conversation_id)
    .bind(reader_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await
}

/// Unread messages across all of a user's conversations
pub async fn total_unread(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(unread_count), 0)::BIGINT FROM conversation_participants WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}
