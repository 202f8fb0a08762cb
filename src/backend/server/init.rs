/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including configuration, database loading, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Read `ServerConfig` from the environment
 * 2. Load the optional database (runs migrations)
 * 3. Create the blob store
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::storage::MediaStore;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: Server starts and data routes answer 503
/// - Migration failures: Logged but don't prevent startup
pub async fn create_app() -> Router<()> {
    create_app_with_config(&ServerConfig::from_env()).await
}

/// Same as [`create_app`] with explicit settings
pub async fn create_app_with_config(config: &ServerConfig) -> Router<()> {
    tracing::info!("Initializing PathMatch backend server");

    let db_pool = load_database().await;
    let storage = MediaStore::new(&config.upload_dir, &config.public_base_url);

    tracing::info!("Uploads stored under {}", config.upload_dir.display());

    let app = create_router(AppState::new(db_pool, storage));

    tracing::info!("Router configured");

    app
}
