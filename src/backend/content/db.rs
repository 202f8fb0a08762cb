//! Database operations for posts

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use super::types::{CreatorStats, MediaItem, NewPost, Post, PostChanges, PostMediaRow};

/// Post columns plus author fields, counters and the viewer's flags.
/// `$1` is the viewer id (may be NULL).
const POST_SELECT: &str = r#"
    SELECT p.*,
           u.username AS author_username,
           u.display_name AS author_display_name,
           u.avatar_url AS author_avatar_url,
           (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
           (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comment_count,
           (SELECT COUNT(*) FROM post_purchases b WHERE b.post_id = p.id) AS purchase_count,
           EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1) AS liked,
           EXISTS (SELECT 1 FROM post_purchases b WHERE b.post_id = p.id AND b.user_id = $1) AS purchased
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

/// Media of the given posts, grouped by post in upload order
async fn load_media(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<MediaItem>>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, PostMediaRow>(
        "SELECT post_id, url, media_type FROM post_media WHERE post_id = ANY($1) ORDER BY position",
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let mut media: HashMap<Uuid, Vec<MediaItem>> = HashMap::new();
    for row in rows {
        media.entry(row.post_id).or_default().push(MediaItem {
            url: row.url,
            media_type: row.media_type,
        });
    }
    Ok(media)
}

async fn with_media(pool: &PgPool, mut posts: Vec<Post>) -> Result<Vec<Post>, sqlx::Error> {
    let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let mut media = load_media(pool, &ids).await?;
    for post in &mut posts {
        post.media = media.remove(&post.id).unwrap_or_default();
    }
    Ok(posts)
}

async fn insert_media(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    post_id: Uuid,
    media: &[MediaItem],
) -> Result<(), sqlx::Error> {
    for (position, item) in media.iter().enumerate() {
        sqlx::query(
            "INSERT INTO post_media (id, post_id, url, media_type, position) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(post_id)
        .bind(&item.url)
        .bind(item.media_type.as_str())
        .bind(position as i32)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

/// Get a post as seen by `viewer`
pub async fn get_post(
    pool: &PgPool,
    post_id: Uuid,
    viewer: Option<Uuid>,
) -> Result<Option<Post>, sqlx::Error> {
    let sql = format!("{POST_SELECT} WHERE p.id = $2");
    let post = sqlx::query_as::<_, Post>(&sql)
        .bind(viewer)
        .bind(post_id)
        .fetch_optional(pool)
        .await?;

    match post {
        Some(post) => Ok(with_media(pool, vec![post]).await?.pop()),
        None => Ok(None),
    }
}

/// Insert a post with its media
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    post: &NewPost,
    media: &[MediaItem],
) -> Result<Uuid, sqlx::Error> {
    let post_id = Uuid::new_v4();
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO posts (id, author_id, title, content, is_private, price, tags)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.is_private)
    .bind(post.price)
    .bind(&post.tags)
    .execute(&mut *tx)
    .await?;

    insert_media(&mut tx, post_id, media).await?;
    tx.commit().await?;

    Ok(post_id)
}

/// Update a post of `author_id`
///
/// `media` replaces every existing media item when given. Returns false when
/// no post with that id belongs to the author.
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    changes: &PostChanges,
    media: Option<&[MediaItem]>,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query(
        r#"
        UPDATE posts
        SET title = COALESCE($3, title),
            content = COALESCE($4, content),
            is_private = $5,
            price = $6,
            tags = COALESCE($7, tags),
            updated_at = NOW()
        WHERE id = $1 AND author_id = $2
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(&changes.title)
    .bind(&changes.content)
    .bind(changes.is_private)
    .bind(changes.price)
    .bind(&changes.tags)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if updated == 0 {
        return Ok(false);
    }

    if let Some(media) = media {
        sqlx::query("DELETE FROM post_media WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
        insert_media(&mut tx, post_id, media).await?;
    }

    tx.commit().await?;
    Ok(true)
}

/// Delete a post of `author_id`; false when nothing matched
pub async fn delete_post(pool: &PgPool, post_id: Uuid, author_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
        .bind(post_id)
        .bind(author_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add one view
pub async fn increment_views(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("UPDATE posts SET views = views + 1 WHERE id = $1 RETURNING views")
        .bind(post_id)
        .fetch_one(pool)
        .await
}

/// A page of an author's posts, newest first
pub async fn list_author_posts(
    pool: &PgPool,
    author_id: Uuid,
    is_private: Option<bool>,
    viewer: Option<Uuid>,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        "{POST_SELECT} WHERE p.author_id = $2 AND ($3::BOOLEAN IS NULL OR p.is_private = $3) \
         ORDER BY p.created_at DESC LIMIT $4 OFFSET $5"
    );
    let posts = sqlx::query_as::<_, Post>(&sql)
        .bind(viewer)
        .bind(author_id)
        .bind(is_private)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    with_media(pool, posts).await
}

pub async fn count_author_posts(
    pool: &PgPool,
    author_id: Uuid,
    is_private: Option<bool>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM posts WHERE author_id = $1 AND ($2::BOOLEAN IS NULL OR is_private = $2)",
    )
    .bind(author_id)
    .bind(is_private)
    .fetch_one(pool)
    .await
}

/// A page of posts by creators `follower_id` follows, newest first
pub async fn list_feed_posts(
    pool: &PgPool,
    follower_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        "{POST_SELECT} WHERE p.author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1) \
         ORDER BY p.created_at DESC LIMIT $2 OFFSET $3"
    );
    let posts = sqlx::query_as::<_, Post>(&sql)
        .bind(follower_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
    with_media(pool, posts).await
}

pub async fn count_feed_posts(pool: &PgPool, follower_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM posts
        WHERE author_id IN (SELECT followed_id FROM follows WHERE follower_id = $1)
        "#,
    )
    .bind(follower_id)
    .fetch_one(pool)
    .await
}

/// Post count, views, purchases and earnings of an author
pub async fn creator_stats(pool: &PgPool, author_id: Uuid) -> Result<CreatorStats, sqlx::Error> {
    sqlx::query_as::<_, CreatorStats>(
        r#"
        SELECT COUNT(*) AS total_posts,
               COALESCE(SUM(p.views), 0)::BIGINT AS total_views,
               COALESCE(SUM(b.purchases), 0)::BIGINT AS total_purchases,
               COALESCE(SUM(b.purchases * p.price), 0)::DOUBLE PRECISION AS total_earnings
        FROM posts p
        LEFT JOIN (
            SELECT post_id, COUNT(*) AS purchases
            FROM post_purchases
            GROUP BY post_id
        ) b ON b.post_id = p.id
        WHERE p.author_id = $1
        "#,
    )
    .bind(author_id)
    .fetch_one(pool)
    .await
}

/// Record a purchase; false when the user had already bought the post
pub async fn record_purchase(pool: &PgPool, post_id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO post_purchases (post_id, user_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(post_id)
    .bind(user_id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}
