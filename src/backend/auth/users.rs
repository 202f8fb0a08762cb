/**
 * User Model and Database Operations
 *
 * One `users` table holds every account. Job seekers and employers also get
 * a row in `job_seekers` / `employers` at registration.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::{PublicUser, Role, VerificationStatus};

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Lower-cased email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    /// Required for creators and subscribers
    pub username: Option<String>,
    pub display_name: Option<String>,
    /// Required for job seekers and employers
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub initials: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub content_categories: Vec<String>,
    pub is_verified: bool,
    #[sqlx(try_from = "String")]
    pub verification_status: VerificationStatus,
    /// Uploaded ID document (never returned over the API)
    pub id_document_url: Option<String>,
    /// Uploaded selfie with ID (never returned over the API)
    pub selfie_url: Option<String>,
    pub subscription_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Public representation without the password hash or documents
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            initials: self.initials.clone(),
            avatar_url: self.avatar_url.clone(),
            bio: self.bio.clone(),
            content_categories: self.content_categories.clone(),
            is_verified: self.is_verified,
            verification_status: self.verification_status,
            subscription_price: self.subscription_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields of a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub initials: Option<String>,
}

/// Create a new user
///
/// Unique violations on email or username surface as
/// `sqlx::Error::Database`.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, password_hash, role, username, display_name,
                           first_name, last_name, initials, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(new_user.role.as_str())
    .bind(&new_user.username)
    .bind(&new_user.display_name)
    .bind(&new_user.first_name)
    .bind(&new_user.last_name)
    .bind(&new_user.initials)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Create the empty `employers` row for a new employer
pub async fn create_employer_profile(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO employers (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Create the empty `job_seekers` row for a new job seeker
pub async fn create_job_seeker_profile(pool: &PgPool, user_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO job_seekers (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Get user by email
pub async fn get_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Get the public profile of a creator by username
pub async fn get_creator_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<PublicUser>, sqlx::Error> {
    sqlx::query_as::<_, PublicUser>(
        "SELECT * FROM users WHERE username = $1 AND role = 'creator'",
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Store initials for accounts created before they were derived
pub async fn set_initials(pool: &PgPool, user_id: Uuid, initials: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET initials = $2 WHERE id = $1")
        .bind(user_id)
        .bind(initials)
        .execute(pool)
        .await?;
    Ok(())
}

/// Record submitted verification documents
///
/// Marks the creator verified with a `pending` review status.
pub async fn submit_verification(
    pool: &PgPool,
    user_id: Uuid,
    id_document_url: &str,
    selfie_url: &str,
    bio: Option<&str>,
    content_categories: &[String],
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET id_document_url = $2,
            selfie_url = $3,
            bio = COALESCE($4, bio),
            content_categories = $5,
            is_verified = TRUE,
            verification_status = 'pending',
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(id_document_url)
    .bind(selfie_url)
    .bind(bio)
    .bind(content_categories)
    .fetch_one(pool)
    .await
}

/// Partial update of a creator's public profile
#[derive(Debug, Clone, Default)]
pub struct CreatorProfileUpdate {
    pub bio: Option<String>,
    pub display_name: Option<String>,
    pub content_categories: Option<Vec<String>>,
    pub avatar_url: Option<String>,
}

/// Apply a creator profile update; absent fields are left unchanged
pub async fn update_creator_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &CreatorProfileUpdate,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET bio = COALESCE($2, bio),
            display_name = COALESCE($3, display_name),
            content_categories = COALESCE($4, content_categories),
            avatar_url = COALESCE($5, avatar_url),
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.bio)
    .bind(&update.display_name)
    .bind(&update.content_categories)
    .bind(&update.avatar_url)
    .fetch_one(pool)
    .await
}
