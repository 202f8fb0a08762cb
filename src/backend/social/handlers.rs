//! Social graph HTTP handlers
//!
//! - `POST /api/users/follow/{username}`
//! - `POST /api/users/unfollow/{username}`
//! - `GET  /api/users/{username}/followers`
//! - `GET  /api/users/{username}/following`

use axum::extract::State;
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::shared::{FollowCounts, UserSummary};

async fn user_id_for(pool: &PgPool, username: &str) -> Result<Uuid, BackendError> {
    get_user_by_username(pool, username)
        .await?
        .map(|user| user.id)
        .ok_or_else(|| BackendError::not_found("User not found"))
}

async fn counts(
    pool: &PgPool,
    message: &str,
    caller: Uuid,
    target: Uuid,
) -> Result<FollowCounts, BackendError> {
    Ok(FollowCounts {
        message: message.to_string(),
        following: db::count_following(pool, caller).await?,
        followers: db::count_followers(pool, target).await?,
    })
}

/// Follow a user by username
pub async fn follow_user(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<FollowCounts>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let target = user_id_for(pool, &username).await?;

    if target == auth.user_id {
        return Err(BackendError::bad_request("Cannot follow yourself"));
    }

    if !db::follow(pool, auth.user_id, target).await? {
        return Err(BackendError::bad_request("Already following this user"));
    }

    tracing::info!("User {} followed {}", auth.user_id, target);

    Ok(Json(
        counts(pool, "Successfully followed user", auth.user_id, target).await?,
    ))
}

/// Unfollow a user by username
pub async fn unfollow_user(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<FollowCounts>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let target = user_id_for(pool, &username).await?;

    if !db::unfollow(pool, auth.user_id, target).await? {
        return Err(BackendError::bad_request("Not following this user"));
    }

    tracing::info!("User {} unfollowed {}", auth.user_id, target);

    Ok(Json(
        counts(pool, "Successfully unfollowed user", auth.user_id, target).await?,
    ))
}

pub async fn get_followers(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let user_id = user_id_for(pool, &username).await?;
    Ok(Json(db::list_followers(pool, user_id).await?))
}

pub async fn get_following(
    State(db_pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(username): Path<String>,
) -> Result<Json<Vec<UserSummary>>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;
    let user_id = user_id_for(pool, &username).await?;
    Ok(Json(db::list_following(pool, user_id).await?))
}
