/**
 * Registration Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email, password and role
 * 2. Validate the role-specific fields (names or username)
 * 3. Check that email and username are free
 * 4. Hash password using bcrypt
 * 5. Create the user, then the employer / job seeker row
 * 6. Return a token pair and the public user
 */

use axum::{extract::State, http::StatusCode};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::sessions::create_token_pair;
use crate::backend::auth::users::{
    create_employer_profile, create_job_seeker_profile, create_user, get_user_by_email,
    get_user_by_username, NewUser,
};
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::shared::validation::{
    initials, is_reserved_username, is_valid_email, is_valid_username, normalize_email,
    optional_trimmed, required, MIN_PASSWORD_LEN,
};
use crate::shared::Role;

/// Validate a registration request and build the account to insert
///
/// The password hash is filled in by the caller.
pub fn validate_registration(request: &RegisterRequest) -> Result<NewUser, BackendError> {
    let (Some(email), Some(password), Some(role)) = (
        request.email.as_deref().filter(|v| !v.trim().is_empty()),
        request.password.as_deref().filter(|v| !v.is_empty()),
        request.role.as_deref().filter(|v| !v.trim().is_empty()),
    ) else {
        return Err(BackendError::bad_request("Email, password and role are required"));
    };

    let email = normalize_email(email);
    if !is_valid_email(&email) {
        return Err(BackendError::bad_request("Invalid email format"));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BackendError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }

    let role: Role = role.trim().parse()?;

    let mut new_user = NewUser {
        email,
        password_hash: String::new(),
        role,
        username: None,
        display_name: None,
        first_name: None,
        last_name: None,
        initials: None,
    };

    if role.is_recruiting() {
        let message = "First name and last name are required";
        let first = required(request.first_name.as_deref(), "first_name", message)?;
        let last = required(request.last_name.as_deref(), "last_name", message)?;
        new_user.initials = Some(initials(first, last));
        new_user.first_name = Some(first.to_string());
        new_user.last_name = Some(last.to_string());
        new_user.username = optional_trimmed(request.username.clone());
        new_user.display_name = optional_trimmed(request.display_name.clone());
    } else {
        let message = "Username and display name are required";
        let username = required(request.username.as_deref(), "username", message)?;
        let display_name = required(request.display_name.as_deref(), "display_name", message)?;
        new_user.username = Some(username.to_string());
        new_user.display_name = Some(display_name.to_string());
    }

    if let Some(username) = &new_user.username {
        if !is_valid_username(username) {
            return Err(BackendError::bad_request(
                "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores",
            ));
        }
        if is_reserved_username(username) {
            return Err(BackendError::bad_request("This username is reserved"));
        }
    }

    Ok(new_user)
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing or invalid fields, duplicate email or username
/// * `503 Service Unavailable` - If database is not configured
/// * `500 Internal Server Error` - If hashing, insertion or token generation fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "email": "jane@example.com",
///   "password": "securepassword123",
///   "role": "job_seeker",
///   "first_name": "Jane",
///   "last_name": "Doe"
/// }
/// ```
pub async fn register(
    State(db_pool): State<Option<PgPool>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let pool = db_pool.as_ref().ok_or_else(BackendError::database_unavailable)?;

    let mut new_user = validate_registration(&request).map_err(|e| {
        tracing::warn!("Rejected registration: {}", e.message());
        e
    })?;

    tracing::info!("Register request for {} as {}", new_user.email, new_user.role);

    if get_user_by_email(pool, &new_user.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", new_user.email);
        return Err(BackendError::bad_request("Email already registered"));
    }

    if let Some(username) = &new_user.username {
        if get_user_by_username(pool, username).await?.is_some() {
            tracing::warn!("Username already exists: {}", username);
            return Err(BackendError::bad_request("Username already taken"));
        }
    }

    let password = request.password.as_deref().unwrap_or_default();
    new_user.password_hash = hash(password, DEFAULT_COST)?;

    let user = create_user(pool, &new_user).await.map_err(|e| {
        let err = BackendError::from(e);
        if err.is_unique_violation() {
            tracing::warn!("Duplicate account for {}", new_user.email);
            BackendError::bad_request("Email or username already registered")
        } else {
            tracing::error!("Failed to create user: {}", err);
            err
        }
    })?;

    let profile_result = match user.role {
        Role::Employer => create_employer_profile(pool, user.id).await,
        Role::JobSeeker => create_job_seeker_profile(pool, user.id).await,
        Role::User | Role::Creator => Ok(()),
    };
    if let Err(e) = profile_result {
        tracing::error!("Failed to create {} profile for {}: {:?}", user.role, user.id, e);
    }

    let tokens = create_token_pair(user.id, &user.email, user.role)?;

    tracing::info!("User created successfully: {} ({})", user.email, user.id);

    Ok((StatusCode::CREATED, Json(AuthResponse::new(tokens, user.to_public()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::SharedError;

    fn request(role: &str) -> RegisterRequest {
        RegisterRequest {
            email: Some(" Jane@Example.com ".into()),
            password: Some("password123".into()),
            role: Some(role.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_recruiting_roles_need_names() {
        let err = validate_registration(&request("employer")).unwrap_err();
        assert_eq!(err.message(), "First name and last name are required");

        let mut req = request("employer");
        req.first_name = Some("jane".into());
        req.last_name = Some("doe".into());
        let user = validate_registration(&req).unwrap();
        assert_eq!(user.email, "jane@example.com");
        assert_eq!(user.initials.as_deref(), Some("JD"));
        assert_eq!(user.role, Role::Employer);
    }

    #[test]
    fn test_creator_roles_need_username() {
        let err = validate_registration(&request("creator")).unwrap_err();
        assert_eq!(err.message(), "Username and display name are required");

        let mut req = request("creator");
        req.username = Some("9lives".into());
        req.display_name = Some("Nine".into());
        let err = validate_registration(&req).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        req.username = Some("ninelives".into());
        let user = validate_registration(&req).unwrap();
        assert_eq!(user.username.as_deref(), Some("ninelives"));
        assert_eq!(user.initials, None);

        req.username = Some("Posts".into());
        assert_eq!(
            validate_registration(&req).unwrap_err().message(),
            "This username is reserved"
        );
    }

    #[test]
    fn test_basic_field_checks() {
        let err = validate_registration(&RegisterRequest::default()).unwrap_err();
        assert_eq!(err.message(), "Email, password and role are required");

        let mut req = request("user");
        req.email = Some("not-an-email".into());
        assert_eq!(validate_registration(&req).unwrap_err().message(), "Invalid email format");

        let mut req = request("user");
        req.password = Some("short".into());
        assert_eq!(
            validate_registration(&req).unwrap_err().message(),
            "Password must be at least 8 characters"
        );
    }

    #[test]
    fn test_unknown_role() {
        match validate_registration(&request("admin")).unwrap_err() {
            BackendError::SharedError(SharedError::InvalidValue { kind, value }) => {
                assert_eq!(kind, "role");
                assert_eq!(value, "admin");
            }
            other => panic!("Expected invalid role, got {:?}", other),
        }
    }
}
