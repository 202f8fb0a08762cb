//! Server and authentication test helpers

use axum_test::TestServer;
use serde_json::{json, Value};
use sqlx::PgPool;
use tempfile::TempDir;
use uuid::Uuid;

use pathmatch::backend::auth::sessions::{create_token, TokenKind};
use pathmatch::backend::routes::create_router;
use pathmatch::backend::server::AppState;
use pathmatch::backend::storage::MediaStore;
use pathmatch::shared::Role;

/// A test server and the upload directory it writes to
pub struct TestApp {
    pub server: TestServer,
    pub uploads: TempDir,
}

/// Build the application around an optional pool and a temporary blob store
pub fn test_app(pool: Option<PgPool>) -> TestApp {
    let uploads = TempDir::new().expect("Failed to create upload dir");
    let storage = MediaStore::new(uploads.path(), "");
    let server = TestServer::new(create_router(AppState::new(pool, storage)))
        .expect("Failed to start test server");
    TestApp { server, uploads }
}

/// A registered account
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub username: Option<String>,
    pub token: String,
    pub refresh_token: String,
}

/// Generate an access token without touching the database
pub fn generate_test_token(user_id: Uuid, email: &str, role: Role) -> String {
    create_token(user_id, email, role, TokenKind::Access).expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

/// Registration body for a role with unique email and username
pub fn registration_body(role: Role) -> Value {
    let suffix = unique_suffix();
    let mut body = json!({
        "email": format!("test_{}@example.com", suffix),
        "password": "password123",
        "role": role.as_str(),
    });

    if role.is_recruiting() {
        body["first_name"] = json!("Jane");
        body["last_name"] = json!("Doe");
    } else {
        body["username"] = json!(format!("u{}", suffix));
        body["display_name"] = json!("Test Account");
    }
    body
}

/// Register an account through the API
pub async fn register_user(server: &TestServer, role: Role) -> TestUser {
    let response = server
        .post("/api/auth/register")
        .json(&registration_body(role))
        .await;
    assert_eq!(response.status_code(), axum::http::StatusCode::CREATED, "{}", response.text());

    let body: Value = response.json();
    TestUser {
        id: body["user"]["id"]
            .as_str()
            .and_then(|id| Uuid::parse_str(id).ok())
            .expect("user id"),
        email: body["user"]["email"].as_str().unwrap_or_default().to_string(),
        username: body["user"]["username"].as_str().map(str::to_string),
        token: body["token"].as_str().unwrap_or_default().to_string(),
        refresh_token: body["refresh_token"].as_str().unwrap_or_default().to_string(),
    }
}

/// Register a creator and mark it verified
pub async fn register_verified_creator(server: &TestServer, pool: &PgPool) -> TestUser {
    let creator = register_user(server, Role::Creator).await;
    sqlx::query("UPDATE users SET is_verified = TRUE, verification_status = 'approved' WHERE id = $1")
        .bind(creator.id)
        .execute(pool)
        .await
        .expect("Failed to verify creator");
    creator
}
