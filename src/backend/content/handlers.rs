//! Content HTTP Handlers
//!
//! Creator uploads and the post views built on them. Creators must be
//! verified to publish, edit or delete; subscribers (`user` role) read a
//! feed of followed creators and buy private posts.

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use super::types::{
    total_pages, CreatePostResponse, CreatorStats, ListPostsParams, MediaItem, NewPost, Post,
    PostChanges, PostDetail, PostResponse, PostsPage, MAX_MEDIA_BYTES,
};
use crate::backend::auth::users::get_creator_by_username;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Multipart, Path, Query};
use crate::backend::interactions::db::list_comments;
use crate::backend::middleware::{AuthUser, AuthenticatedUser, MaybeAuthUser};
use crate::backend::storage::{FormData, MediaStore, UploadedFile};
use crate::shared::validation::required;
use crate::shared::{MediaType, Role};

/// Upload folder for post media
const CONTENT_FOLDER: &str = "content";

fn require_publisher(auth: &AuthenticatedUser) -> Result<(), BackendError> {
    auth.require_role(Role::Creator)?;
    auth.require_verification()
}

/// Post body text: `description`, falling back to `content`
fn body_text(form: &FormData) -> Option<String> {
    form.trimmed("description").or_else(|| form.trimmed("content"))
}

/// Price of a post given its visibility
///
/// Private posts need a positive price; public posts are always free.
pub fn post_price(is_private: bool, price: Option<f64>) -> Result<f64, BackendError> {
    if !is_private {
        return Ok(0.0);
    }
    match price {
        Some(price) if price > 0.0 => Ok(price),
        _ => Err(BackendError::bad_request("Price is required for private content")),
    }
}

/// Validate the text fields of a new post
pub fn validate_new_post(form: &FormData) -> Result<NewPost, BackendError> {
    let title = required(form.text("title"), "title", "Title is required")?;
    let is_private = form.flag("isPrivate").unwrap_or(false);
    let price = post_price(is_private, form.number("price")?)?;

    Ok(NewPost {
        title: title.to_string(),
        content: body_text(form).unwrap_or_default(),
        is_private,
        price,
        tags: form.string_list("tags")?.unwrap_or_default(),
    })
}

/// Validate an update against the stored post
pub fn validate_post_changes(form: &FormData, current: &Post) -> Result<PostChanges, BackendError> {
    let is_private = form.flag("isPrivate").unwrap_or(current.is_private);
    let price = form
        .number("price")?
        .or(Some(current.price).filter(|_| current.is_private));

    Ok(PostChanges {
        title: form.trimmed("title"),
        content: body_text(form),
        is_private,
        price: post_price(is_private, price)?,
        tags: form.string_list("tags")?,
    })
}

/// Check an uploaded video
pub fn check_video(file: &UploadedFile) -> Result<(), BackendError> {
    if MediaType::from_mime(file.mime()) != Some(MediaType::Video) {
        return Err(BackendError::bad_request("File must be a video"));
    }
    if file.len() > MAX_MEDIA_BYTES {
        return Err(BackendError::bad_request("Video file size must be less than 100MB"));
    }
    Ok(())
}

/// The `video` part, or the `media` part for the posts endpoint
fn take_media(form: &mut FormData) -> Option<UploadedFile> {
    form.take_file("video").or_else(|| form.take_file("media"))
}

async fn store_video(storage: &MediaStore, file: &UploadedFile) -> Result<MediaItem, BackendError> {
    check_video(file)?;
    let url = storage.store_file(CONTENT_FOLDER, file).await?;
    Ok(MediaItem {
        url,
        media_type: MediaType::Video,
    })
}

fn page_of(posts: Vec<Post>, total: i64, params: &ListPostsParams, viewer: Option<Uuid>) -> PostsPage {
    PostsPage {
        posts: posts.into_iter().map(|post| post.redact_for(viewer)).collect(),
        total_pages: total_pages(total, params.limit()),
        current_page: params.page(),
    }
}

/// Publish a post with one video
pub async fn create_post(
    State(db_pool): State<Option<PgPool>>,
    State(storage): State<MediaStore>,
    AuthUser(auth): AuthUser,
    Multipart(multipart): Multipart,
) -> Result<(StatusCode, Json<CreatePostResponse>), BackendError> {
    require_publisher(&auth)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let mut form = FormData::from_multipart(multipart).await?;
    let post = validate_new_post(&form)?;

    let Some(video) = take_media(&mut form) else {
        return Err(BackendError::bad_request("Video file is required"));
    };
    let media = store_video(&storage, &video).await?;

    let post_id = db::create_post(pool, auth.user_id, &post, &[media]).await?;
    let post = db::get_post(pool, post_id, Some(auth.user_id))
        .await?
        .ok_or_else(|| BackendError::state("Created post could not be loaded"))?;

    tracing::info!("Creator {} published post {}", auth.user_id, post_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            success: true,
            message: "Video uploaded successfully".to_string(),
            data: post,
        }),
    ))
}

/// Update one of the caller's posts
pub async fn update_post(
    State(db_pool): State<Option<PgPool>>,
    State(storage): State<MediaStore>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
    Multipart(multipart): Multipart,
) -> Result<Json<PostResponse<Post>>, BackendError> {
    require_publisher(&auth)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let not_found = || BackendError::not_found("Post not found or unauthorized");

    let current = db::get_post(pool, post_id, Some(auth.user_id))
        .await?
        .filter(|post| post.author_id == auth.user_id)
        .ok_or_else(not_found)?;

    let mut form = FormData::from_multipart(multipart).await?;
    let changes = validate_post_changes(&form, &current)?;

    let media = match take_media(&mut form) {
        Some(file) => Some(vec![store_video(&storage, &file).await?]),
        None => None,
    };

    if !db::update_post(pool, post_id, auth.user_id, &changes, media.as_deref()).await? {
        return Err(not_found());
    }

    let post = db::get_post(pool, post_id, Some(auth.user_id))
        .await?
        .ok_or_else(not_found)?;

    tracing::info!("Creator {} updated post {}", auth.user_id, post_id);

    Ok(Json(PostResponse { post }))
}

/// Delete one of the caller's posts
pub async fn delete_post(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, BackendError> {
    require_publisher(&auth)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    if !db::delete_post(pool, post_id, auth.user_id).await? {
        return Err(BackendError::not_found("Post not found or unauthorized"));
    }

    tracing::info!("Creator {} deleted post {}", auth.user_id, post_id);

    Ok(Json(json!({ "message": "Post deleted successfully" })))
}

/// The caller's own posts
pub async fn get_own_posts(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostsPage>, BackendError> {
    auth.require_role(Role::Creator)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let is_private = params.visibility().is_private();
    let posts = db::list_author_posts(
        pool,
        auth.user_id,
        is_private,
        Some(auth.user_id),
        params.limit(),
        params.offset(),
    )
    .await?;
    let total = db::count_author_posts(pool, auth.user_id, is_private).await?;

    Ok(Json(page_of(posts, total, &params, Some(auth.user_id))))
}

/// A creator's posts, private ones redacted for viewers who have not bought them
pub async fn get_creator_posts(
    State(db_pool): State<Option<PgPool>>,
    MaybeAuthUser(auth): MaybeAuthUser,
    Path(username): Path<String>,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostsPage>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let viewer = auth.map(|user| user.user_id);

    let creator = get_creator_by_username(pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found("Creator not found"))?;

    let is_private = params.visibility().is_private();
    let posts = db::list_author_posts(
        pool,
        creator.id,
        is_private,
        viewer,
        params.limit(),
        params.offset(),
    )
    .await?;
    let total = db::count_author_posts(pool, creator.id, is_private).await?;

    Ok(Json(page_of(posts, total, &params, viewer)))
}

/// Totals over the caller's posts
pub async fn get_creator_stats(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> Result<Json<CreatorStats>, BackendError> {
    auth.require_role(Role::Creator)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    Ok(Json(db::creator_stats(pool, auth.user_id).await?))
}

/// One post with its comments; counts a view
pub async fn get_post(
    State(db_pool): State<Option<PgPool>>,
    MaybeAuthUser(auth): MaybeAuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse<PostDetail>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let viewer = auth.map(|user| user.user_id);

    let mut post = db::get_post(pool, post_id, viewer)
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    if !post.can_view(viewer) {
        tracing::warn!("Viewer {:?} denied private post {}", viewer, post_id);
        return Err(BackendError::forbidden("Access denied"));
    }

    post.views = db::increment_views(pool, post_id).await?;
    let comments = list_comments(pool, post_id, viewer).await?;

    Ok(Json(PostResponse {
        post: PostDetail { post, comments },
    }))
}

/// Newest posts of creators the caller follows
pub async fn get_subscriber_feed(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Query(params): Query<ListPostsParams>,
) -> Result<Json<PostsPage>, BackendError> {
    auth.require_role(Role::User)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let posts = db::list_feed_posts(pool, auth.user_id, params.limit(), params.offset()).await?;
    let total = db::count_feed_posts(pool, auth.user_id).await?;

    Ok(Json(page_of(posts, total, &params, Some(auth.user_id))))
}

/// Buy access to a private post
///
/// Buying a post twice is not an error.
pub async fn purchase_post(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Value>, BackendError> {
    auth.require_role(Role::User)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let post = db::get_post(pool, post_id, Some(auth.user_id))
        .await?
        .ok_or_else(|| BackendError::not_found("Post not found"))?;

    if !post.is_private {
        return Err(BackendError::bad_request("Public posts cannot be purchased"));
    }

    if db::record_purchase(pool, post_id, auth.user_id).await? {
        tracing::info!("User {} purchased post {} for {}", auth.user_id, post_id, post.price);
    }

    Ok(Json(json!({
        "message": "Purchase successful",
        "post_id": post_id,
        "price": post.price,
    })))
}
