/**
 * Token Refresh Handler
 *
 * POST /api/auth/refresh exchanges a refresh token (sent as the bearer
 * token) for a new token pair. Access tokens are rejected here.
 */

use axum::{extract::State, http::HeaderMap};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::auth::sessions::{create_token_pair, verify_token, TokenKind};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::auth::bearer_token;

/// Refresh handler
///
/// # Errors
///
/// * `401 Unauthorized` - Missing, invalid or non-refresh token, or the user no longer exists
/// * `503 Service Unavailable` - If database is not configured
pub async fn refresh(
    State(db_pool): State<Option<PgPool>>,
    headers: HeaderMap,
) -> Result<Json<AuthResponse>, BackendError> {
    let token = bearer_token(&headers)?;

    let claims = verify_token(token, TokenKind::Refresh).map_err(|e| {
        tracing::warn!("Rejected refresh token: {:?}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;
    let user_id = claims
        .user_id()
        .map_err(|_| BackendError::unauthorized("Invalid refresh token"))?;

    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let user = get_user_by_id(pool, user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("User not found."))?;

    let tokens = create_token_pair(user.id, &user.email, user.role)?;

    tracing::info!("Refreshed tokens for {}", user.id);

    Ok(Json(AuthResponse::new(tokens, user.to_public())))
}
