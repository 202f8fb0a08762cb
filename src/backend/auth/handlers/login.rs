/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by (normalized) email
 * 2. Verify password using bcrypt
 * 3. Back-fill initials for recruiting accounts that lack them
 * 4. Return a token pair and the public user
 *
 * # Security
 *
 * - Unknown email and wrong password share one 401 message
 * - User passwords are never returned in responses
 */

use axum::extract::State;
use bcrypt::verify;
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::create_token_pair;
use crate::backend::auth::users::{get_user_by_email, set_initials};
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::shared::validation::{initials, normalize_email};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - Email or password missing
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If database is not configured
pub async fn login(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let (Some(email), Some(password)) = (
        request.email.as_deref().filter(|v| !v.trim().is_empty()),
        request.password.as_deref().filter(|v| !v.is_empty()),
    ) else {
        return Err(BackendError::bad_request("Email and password are required"));
    };

    let email = normalize_email(email);
    tracing::info!("Login attempt for {}", email);

    let Some(mut user) = get_user_by_email(pool, &email).await? else {
        tracing::warn!("Login failed: no user with email {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    };

    if !verify(password, &user.password_hash)? {
        tracing::warn!("Login failed: wrong password for {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    if user.initials.is_none() {
        if let (Some(first), Some(last)) = (&user.first_name, &user.last_name) {
            let derived = initials(first, last);
            match set_initials(pool, user.id, &derived).await {
                Ok(()) => user.initials = Some(derived),
                Err(e) => tracing::error!("Failed to back-fill initials for {}: {:?}", user.id, e),
            }
        }
    }

    let tokens = create_token_pair(user.id, &user.email, user.role)?;

    tracing::info!("User logged in: {} ({})", user.email, user.id);

    Ok(Json(AuthResponse::new(tokens, user.to_public())))
}
