//! Database operations for comments and likes

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{Comment, LikeResponse};

/// `$1` is the viewer id (may be NULL)
const COMMENT_SELECT: &str = r#"
    SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
           u.username AS author_username,
           u.display_name AS author_display_name,
           u.avatar_url AS author_avatar_url,
           (SELECT COUNT(*) FROM comment_likes l WHERE l.comment_id = c.id) AS like_count,
           EXISTS (SELECT 1 FROM comment_likes l WHERE l.comment_id = c.id AND l.user_id = $1) AS liked
    FROM post_comments c
    JOIN users u ON u.id = c.user_id
"#;

/// Comments of a post, oldest first
pub async fn list_comments(
    pool: &PgPool,
    post_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<Vec<Comment>, sqlx::Error> {
    let sql = format!("{COMMENT_SELECT} WHERE c.post_id = $2 ORDER BY c.created_at ASC");
    sqlx::query_as::<_, Comment>(&sql)
        .bind(viewer)
        .bind(post_id)
        .fetch_all(pool)
        .await
}

/// A comment of a specific post
pub async fn get_comment(
    pool: &PgPool,
    post_id: Uuid,
    comment_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<Option<Comment>, sqlx::Error> {
    let sql = format!("{COMMENT_SELECT} WHERE c.id = $2 AND c.post_id = $3");
    sqlx::query_as::<_, Comment>(&sql)
        .bind(viewer)
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO post_comments (id, post_id, user_id, content) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .execute(pool)
        .await?;
    Ok(id)
}

pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM post_comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Author of a post, `None` when the post does not exist
pub async fn post_author(pool: &PgPool, post_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT author_id FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}

/// Like `post_id` if the user has not, unlike it otherwise
pub async fn toggle_post_like(
    pool: &PgPool,
    post_id: Uuid,
    user_id: Uuid,
) -> Result<LikeResponse, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        sqlx::query("INSERT INTO post_likes (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING")
            .bind(post_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    let likes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    Ok(LikeResponse {
        likes,
        liked: removed == 0,
    })
}

/// Like `comment_id` if the user has not, unlike it otherwise
pub async fn toggle_comment_like(
    pool: &PgPool,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<LikeResponse, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2")
        .bind(comment_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed == 0 {
        sqlx::query(
            "INSERT INTO comment_likes (comment_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    }

    let likes =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comment_likes WHERE comment_id = $1")
            .bind(comment_id)
            .fetch_one(&mut *tx)
            .await?;

    tx.commit().await?;

    Ok(LikeResponse {
        likes,
        liked: removed == 0,
    })
}
