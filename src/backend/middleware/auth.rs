/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT access tokens from the
 * Authorization header and provides the caller to handlers.
 *
 * Routers whose every route is protected use `auth_middleware` as a route
 * layer. Routes that mix public and protected methods on one path take the
 * `AuthUser` extractor instead, which authenticates on its own when the
 * middleware did not run.
 */

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::auth::sessions::{verify_token, TokenKind};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::Role;

/// Authenticated user data attached to the request
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub is_verified: bool,
}

impl AuthenticatedUser {
    /// 403 unless the caller has `role`
    pub fn require_role(&self, role: Role) -> Result<(), BackendError> {
        self.require_any_role(&[role])
    }

    /// 403 unless the caller has one of `roles`
    pub fn require_any_role(&self, roles: &[Role]) -> Result<(), BackendError> {
        if roles.contains(&self.role) {
            return Ok(());
        }

        let required = roles
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(" or ");
        tracing::warn!(
            "User {} with role {} denied, requires {}",
            self.user_id,
            self.role,
            required
        );
        Err(BackendError::forbidden(format!(
            "Access denied. This endpoint requires {} role.",
            required
        )))
    }

    /// 403 for creators that have not submitted verification
    pub fn require_verification(&self) -> Result<(), BackendError> {
        if self.role == Role::Creator && !self.is_verified {
            return Err(BackendError::forbidden(
                "Account verification required. Please complete the verification process to access creator features.",
            ));
        }
        Ok(())
    }

    /// Caller must be this user
    pub fn require_self(&self, user_id: Uuid) -> Result<(), BackendError> {
        if self.user_id != user_id {
            tracing::warn!("User {} denied access to {}", self.user_id, user_id);
            return Err(BackendError::forbidden("Not authorized to access this resource"));
        }
        Ok(())
    }
}

/// Bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("No authentication token provided.")
        })?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized("Invalid authentication token.")
        })
}

/// Authenticate a request from its headers
///
/// This:
/// 1. Extracts the bearer token
/// 2. Verifies it as an access token
/// 3. Loads the user when a database is configured, so role and
///    verification state are current
pub async fn authenticate(
    headers: &HeaderMap,
    db_pool: Option<&PgPool>,
) -> Result<AuthenticatedUser, BackendError> {
    let token = bearer_token(headers)?;

    let claims = verify_token(token, TokenKind::Access).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid authentication token.")
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid authentication token.")
    })?;

    let Some(pool) = db_pool else {
        return Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            role: claims.role,
            is_verified: false,
        });
    };

    let user = get_user_by_id(pool, user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user {}", user_id);
        BackendError::unauthorized("User not found.")
    })?;

    Ok(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
        role: user.role,
        is_verified: user.is_verified,
    })
}

/// Authentication middleware
///
/// Attaches `AuthenticatedUser` to request extensions for use in handlers.
/// Returns 401 if the token is missing or invalid.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let user = authenticate(request.headers(), app_state.db_pool.as_ref()).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Uses the user attached by `auth_middleware` when present and
/// authenticates the request itself otherwise.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    Option<PgPool>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let db_pool = Option::<PgPool>::from_ref(state);
        let user = authenticate(&parts.headers, db_pool.as_ref()).await?;
        parts.extensions.insert(user.clone());
        Ok(AuthUser(user))
    }
}

/// Extractor for routes where authentication is optional
///
/// No Authorization header yields `None`; a header with a bad token is
/// still rejected with 401.
#[derive(Clone, Debug)]
pub struct MaybeAuthUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    Option<PgPool>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(MaybeAuthUser(None));
        }
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;
        Ok(MaybeAuthUser(Some(user)))
    }
}
