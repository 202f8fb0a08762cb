//! Comment and like types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::content::types::PostAuthor;

/// A comment on a post, with the viewer's like flag
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    #[sqlx(flatten)]
    pub author: PostAuthor,
    pub content: String,
    pub like_count: i64,
    pub liked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub content: Option<String>,
}

/// Result of a like toggle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LikeResponse {
    /// Like count after the toggle
    pub likes: i64,
    /// Whether the caller now likes the target
    pub liked: bool,
}
