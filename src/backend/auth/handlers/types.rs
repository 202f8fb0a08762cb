/**
 * Authentication Handler Types
 *
 * Request and response types used by the authentication handlers.
 * Request fields are optional so that missing values produce a readable
 * 400 from the handler instead of a deserialization rejection.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::sessions::TokenPair;
use crate::shared::PublicUser;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    /// Plain password (hashed before storage)
    pub password: Option<String>,
    /// One of `job_seeker`, `employer`, `user`, `creator`
    pub role: Option<String>,
    /// Required for job seekers and employers
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Required for users and creators
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Auth response
///
/// Returned by register, login and refresh: a fresh token pair and the
/// public user record.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// Access token (24 hours)
    pub token: String,
    /// Refresh token (30 days)
    pub refresh_token: String,
    /// Expiry of `token`
    pub expires_at: DateTime<Utc>,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: PublicUser) -> Self {
        Self {
            token: tokens.token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_at,
            user,
        }
    }
}

/// `{"user": ...}` envelope used by me and the creator profile endpoints
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserResponse {
    pub user: PublicUser,
}
