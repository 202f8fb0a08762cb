//! Interaction HTTP Handlers
//!
//! - `POST   /api/interactions/posts/{post_id}/comments`
//! - `POST   /api/interactions/posts/{post_id}/like`
//! - `POST   /api/interactions/posts/{post_id}/comments/{comment_id}/like`
//! - `DELETE /api/interactions/posts/{post_id}/comments/{comment_id}`

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{Comment, CreateCommentRequest, LikeResponse};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::shared::validation::required;

/// Author of an existing post
async fn require_post(pool: &PgPool, post_id: Uuid) -> Result<Uuid, BackendError> {
    db::post_author(pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))
}

async fn require_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
    viewer: Uuid,
) -> Result<Comment, BackendError> {
    db::get_comment(pool, post_id, comment_id, Some(viewer))
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))
}

/// Comment on a post
pub async fn add_comment(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), BackendError> {
    let content = required(
        request.content.as_deref(),
        "content",
        "Comment content is required",
    )?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    require_post(pool, post_id).await?;
    let comment_id = db::create_comment(pool, post_id, auth.user_id, content).await?;
    let comment = require_comment(pool, post_id, comment_id, auth.user_id).await?;

    tracing::info!("User {} commented on post {}", auth.user_id, post_id);

    Ok((StatusCode::CREATED, Json(comment)))
}

/// Like or unlike a post
pub async fn toggle_post_like(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<LikeResponse>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    require_post(pool, post_id).await?;
    Ok(Json(db::toggle_post_like(pool, post_id, auth.user_id).await?))
}

/// Like or unlike a comment
pub async fn toggle_comment_like(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<LikeResponse>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    require_post(pool, post_id).await?;
    require_comment(pool, post_id, comment_id, auth.user_id).await?;
    Ok(Json(db::toggle_comment_like(pool, comment_id, auth.user_id).await?))
}

/// Whether `user_id` may delete a comment
pub fn can_delete_comment(user_id: Uuid, comment_author: Uuid, post_author: Uuid) -> bool {
    user_id == comment_author || user_id == post_author
}

/// Delete a comment; allowed for its author and the post's author
pub async fn delete_comment(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let post_author = require_post(pool, post_id).await?;
    let comment = require_comment(pool, post_id, comment_id, auth.user_id).await?;

    if !can_delete_comment(auth.user_id, comment.user_id, post_author) {
        tracing::warn!("User {} may not delete comment {}", auth.user_id, comment_id);
        return Err(BackendError::forbidden("Not authorized to delete this comment"));
    }

    db::delete_comment(pool, comment_id).await?;
    tracing::info!("Comment {} deleted by {}", comment_id, auth.user_id);

    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_and_post_authors_may_delete() {
        let commenter = Uuid::new_v4();
        let creator = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        assert!(can_delete_comment(commenter, commenter, creator));
        assert!(can_delete_comment(creator, commenter, creator));
        assert!(!can_delete_comment(stranger, commenter, creator));
    }
}
