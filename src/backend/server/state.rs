/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # State Extraction
 *
 * Handlers extract only what they use: `State<Option<PgPool>>` for database
 * work, `State<MediaStore>` for uploads, or the whole `AppState`.
 *
 * ```rust
 * use axum::extract::State;
 * use sqlx::PgPool;
 *
 * async fn handler(State(db_pool): State<Option<PgPool>>) {
 *     if let Some(pool) = db_pool.as_ref() {
 *         // query
 *     }
 * }
 * ```
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::storage::MediaStore;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g., if
    /// `DATABASE_URL` environment variable is not set). Handlers answer
    /// 503 in that case.
    pub db_pool: Option<PgPool>,

    /// Blob store for uploaded files
    pub storage: MediaStore,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>, storage: MediaStore) -> Self {
        Self { db_pool, storage }
    }
}

/// Implement FromRef for Option<PgPool>
///
/// This allows Axum handlers to extract the optional database pool
/// directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for MediaStore
impl FromRef<AppState> for MediaStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.storage.clone()
    }
}
