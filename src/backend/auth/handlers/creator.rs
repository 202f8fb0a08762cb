/**
 * Creator Profile Handlers
 *
 * - GET  /api/auth/creator/{username} - public creator profile
 * - POST /api/auth/verify-profile     - submit verification documents
 * - PUT  /api/auth/creator/profile    - update bio, display name, categories, avatar
 *
 * The last two take `multipart/form-data` and are limited to creators.
 */

use axum::extract::State;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::{
    get_creator_by_username, submit_verification, update_creator_profile, CreatorProfileUpdate,
};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Multipart, Path};
use crate::backend::middleware::AuthUser;
use crate::backend::storage::{FormData, MediaStore, UploadedFile};
use crate::shared::Role;

/// Largest accepted verification document
pub const MAX_DOCUMENT_BYTES: usize = 10 * 1024 * 1024;

/// Largest accepted profile image
pub const MAX_PROFILE_IMAGE_BYTES: usize = 5 * 1024 * 1024;

fn check_document(file: &UploadedFile, label: &str) -> Result<(), BackendError> {
    let mime = file.mime();
    if !(mime.starts_with("image/") || mime == "application/pdf") {
        return Err(BackendError::bad_request(format!(
            "{} must be an image or PDF",
            label
        )));
    }
    if file.len() > MAX_DOCUMENT_BYTES {
        return Err(BackendError::bad_request(format!("{} is too large", label)));
    }
    Ok(())
}

/// Public creator profile by username
pub async fn get_creator_profile(
    State(db_pool): State<Option<PgPool>>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let user = get_creator_by_username(pool, &username)
        .await?
        .ok_or_else(|| BackendError::not_found("Creator not found"))?;

    Ok(Json(UserResponse { user }))
}

/// Submit creator verification documents
///
/// Form fields: `idDocument` and `selfieWithId` files (both required),
/// `bio`, and `contentCategories` (JSON array string).
pub async fn verify_profile(
    State(db_pool): State<Option<PgPool>>,
    State(storage): State<MediaStore>,
    AuthUser(auth): AuthUser,
    Multipart(multipart): Multipart,
) -> Result<Json<UserResponse>, BackendError> {
    auth.require_role(Role::Creator)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let mut form = FormData::from_multipart(multipart).await?;

    let (Some(id_document), Some(selfie)) =
        (form.take_file("idDocument"), form.take_file("selfieWithId"))
    else {
        tracing::warn!("Verification from {} missing documents", auth.user_id);
        return Err(BackendError::bad_request("ID document and selfie are required"));
    };
    check_document(&id_document, "ID document")?;
    check_document(&selfie, "Selfie")?;

    let categories = form.string_list("contentCategories")?.unwrap_or_default();
    let bio = form.trimmed("bio");

    let id_document_url = storage.store_file("verification", &id_document).await?;
    let selfie_url = storage.store_file("verification", &selfie).await?;

    let user = submit_verification(
        pool,
        auth.user_id,
        &id_document_url,
        &selfie_url,
        bio.as_deref(),
        &categories,
    )
    .await?;

    tracing::info!("Creator {} submitted verification documents", auth.user_id);

    Ok(Json(UserResponse {
        user: user.to_public(),
    }))
}

/// Update the calling creator's profile
///
/// Form fields: `bio`, `displayName`, `contentCategories` and an optional
/// `profileImage` file. Absent fields are left unchanged.
pub async fn update_profile(
    State(db_pool): State<Option<PgPool>>,
    State(storage): State<MediaStore>,
    AuthUser(auth): AuthUser,
    Multipart(multipart): Multipart,
) -> Result<Json<UserResponse>, BackendError> {
    auth.require_role(Role::Creator)?;
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let mut form = FormData::from_multipart(multipart).await?;

    let mut update = CreatorProfileUpdate {
        bio: form.trimmed("bio"),
        display_name: form.trimmed("displayName"),
        content_categories: form.string_list("contentCategories")?,
        avatar_url: None,
    };

    if let Some(image) = form.take_file("profileImage") {
        if !image.mime().starts_with("image/") {
            return Err(BackendError::bad_request("Profile image must be an image"));
        }
        if image.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(BackendError::bad_request("Profile image is too large"));
        }
        update.avatar_url = Some(storage.store_file("profiles", &image).await?);
    }

    let user = update_creator_profile(pool, auth.user_id, &update).await?;

    tracing::info!("Creator {} updated profile", auth.user_id);

    Ok(Json(UserResponse {
        user: user.to_public(),
    }))
}
