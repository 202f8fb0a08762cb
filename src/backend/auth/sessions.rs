/**
 * Session Management and JWT Tokens
 *
 * This module handles JWT token generation and validation for user sessions.
 *
 * Two kinds of token share one claim set: short-lived access tokens sent as
 * `Authorization: Bearer` on every protected route, and long-lived refresh
 * tokens accepted only by `POST /api/auth/refresh`.
 */

use std::sync::OnceLock;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::Role;

/// Access tokens live for a day
pub const ACCESS_TOKEN_TTL_HOURS: i64 = 24;

/// Refresh tokens live for 30 days
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

const DEV_SECRET: &str = "pathmatch-dev-secret-change-in-production";

/// Which of the two token kinds a JWT is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn ttl(&self) -> Duration {
        match self {
            TokenKind::Access => Duration::hours(ACCESS_TOKEN_TTL_HOURS),
            TokenKind::Refresh => Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Role at the time the token was issued
    pub role: Role,
    /// Access or refresh
    pub kind: TokenKind,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

impl Claims {
    /// Parse the subject as a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Access/refresh token pair returned by register, login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
    /// Expiry of the access token
    pub expires_at: DateTime<Utc>,
}

/// Get JWT secret from environment
///
/// Falls back to a development secret (with a warning) when `JWT_SECRET`
/// is unset.
fn get_jwt_secret() -> &'static str {
    static SECRET: OnceLock<String> = OnceLock::new();
    SECRET.get_or_init(|| {
        std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_SECRET.to_string()
        })
    })
}

/// Create a JWT token for a user
///
/// # Arguments
/// * `user_id` - User ID (UUID)
/// * `email` - User email
/// * `role` - User role
/// * `kind` - Access or refresh
///
/// # Returns
/// JWT token string
pub fn create_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    kind: TokenKind,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role,
        kind,
        exp: (now + kind.ttl()).timestamp() as u64,
        iat: now.timestamp() as u64,
    };

    let key = EncodingKey::from_secret(get_jwt_secret().as_bytes());
    encode(&Header::default(), &claims, &key)
}

/// Create an access token and a refresh token for a user
pub fn create_token_pair(
    user_id: Uuid,
    email: &str,
    role: Role,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let token = create_token(user_id, email, role, TokenKind::Access)?;
    let refresh_token = create_token(user_id, email, role, TokenKind::Refresh)?;
    let claims = decode_claims(&token)?;

    let expires_at = Utc
        .timestamp_opt(claims.exp as i64, 0)
        .single()
        .unwrap_or_else(|| Utc::now() + TokenKind::Access.ttl());

    Ok(TokenPair {
        token,
        refresh_token,
        expires_at,
    })
}

fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(get_jwt_secret().as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Verify and decode a JWT token of the expected kind
///
/// A valid token of the other kind is rejected as `InvalidToken`.
pub fn verify_token(token: &str, expected: TokenKind) -> Result<Claims, jsonwebtoken::errors::Error> {
    let claims = decode_claims(token)?;
    if claims.kind != expected {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_token() {
        let token = create_token(Uuid::new_v4(), "test@example.com", Role::User, TokenKind::Access).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, "test@example.com", Role::Employer, TokenKind::Access).unwrap();

        let claims = verify_token(&token, TokenKind::Access).unwrap();
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Employer);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn test_token_kinds_are_not_interchangeable() {
        let user_id = Uuid::new_v4();
        let pair = create_token_pair(user_id, "a@b.com", Role::Creator).unwrap();

        assert!(verify_token(&pair.token, TokenKind::Refresh).is_err());
        assert!(verify_token(&pair.refresh_token, TokenKind::Access).is_err());
        assert!(verify_token(&pair.refresh_token, TokenKind::Refresh).is_ok());
    }

    #[test]
    fn test_expiry_windows() {
        let user_id = Uuid::new_v4();
        let access = create_token(user_id, "a@b.com", Role::User, TokenKind::Access).unwrap();
        let refresh = create_token(user_id, "a@b.com", Role::User, TokenKind::Refresh).unwrap();

        let access = verify_token(&access, TokenKind::Access).unwrap();
        let refresh = verify_token(&refresh, TokenKind::Refresh).unwrap();

        assert_eq!(access.exp - access.iat, 24 * 60 * 60);
        assert_eq!(refresh.exp - refresh.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_pair_expires_at_matches_access_token() {
        let pair = create_token_pair(Uuid::new_v4(), "a@b.com", Role::JobSeeker).unwrap();
        let claims = verify_token(&pair.token, TokenKind::Access).unwrap();
        assert_eq!(pair.expires_at.timestamp() as u64, claims.exp);
    }

    #[test]
    fn test_verify_invalid_token() {
        assert!(verify_token("invalid.token.here", TokenKind::Access).is_err());
    }
}
