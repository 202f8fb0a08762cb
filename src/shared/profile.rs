//! Public user representations
//!
//! These are the only user shapes returned over the API. Neither carries
//! the password hash or verification documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{Role, VerificationStatus};

/// Short public profile used in lists (followers, conversations, authors)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Full public profile of an account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub initials: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub content_categories: Vec<String>,
    pub is_verified: bool,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    pub subscription_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Follower/following counts returned by follow and unfollow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowCounts {
    pub message: String,
    /// Number of users the caller follows
    pub following: i64,
    /// Number of followers of the target user
    pub followers: i64,
}
